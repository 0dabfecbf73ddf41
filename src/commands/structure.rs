// Copyright 2025 - 2026 The rilldb developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::commands::plural;
use itertools::Itertools;
use query_ast::Definition;
use query_executor::{apply, DefinitionOutcome, SharedDatabase};
use std::error::Error;
use std::io::Write;

/// Applies a structure or metadata statement and prints its confirmation.
pub fn definition<W: Write>(definition: Definition, database: &SharedDatabase, out: &mut W) -> Result<(), Box<dyn Error>> {
    match apply(definition, database)? {
        DefinitionOutcome::TableCreated { name } => writeln!(out, "created table {}", name)?,
        DefinitionOutcome::ColumnsCreated { table, columns } => writeln!(
            out,
            "created column{} {} in table {}",
            plural(columns.len()),
            columns.iter().join(", "),
            table
        )?,
        DefinitionOutcome::TableDropped { name } => writeln!(out, "table {} dropped", name)?,
        DefinitionOutcome::ColumnsDropped { table, columns } => writeln!(
            out,
            "dropped column{} {}, in table {}",
            plural(columns.len()),
            columns.iter().join(", "),
            table
        )?,
        DefinitionOutcome::DatabaseDropped { tables } => {
            writeln!(out, "dropped {} table{}", tables, plural(tables))?
        }
        DefinitionOutcome::Description { table, columns } => {
            writeln!(out, "Table: {}", table)?;
            for column in columns {
                writeln!(out, "{}", column)?;
            }
        }
        DefinitionOutcome::TableNames(names) => writeln!(out, "{}", names.join("\n"))?,
    }
    Ok(())
}
