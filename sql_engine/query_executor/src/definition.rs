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

use crate::{ExecutionError, SharedDatabase};
use query_ast::Definition;
use std::collections::BTreeMap;
use storage::Schema;

/// What a definition statement did, for the caller to report.
#[derive(Debug, PartialEq, Clone)]
pub enum DefinitionOutcome {
    TableCreated { name: String },
    ColumnsCreated { table: String, columns: Vec<String> },
    TableDropped { name: String },
    ColumnsDropped { table: String, columns: Vec<String> },
    DatabaseDropped { tables: usize },
    Description { table: String, columns: Vec<String> },
    TableNames(Vec<String>),
}

/// Applies one structure or metadata statement synchronously.
pub fn apply(definition: Definition, database: &SharedDatabase) -> Result<DefinitionOutcome, ExecutionError> {
    match definition {
        Definition::CreateTable { name, columns } => {
            let mut database = database.write().unwrap();
            database.alter_database(&single_table(&name, &columns, true));
            Ok(DefinitionOutcome::TableCreated { name })
        }
        Definition::CreateColumns { table, columns } => {
            let mut database = database.write().unwrap();
            database.table(&table)?;
            database.alter_database(&single_table(&table, &columns, true));
            Ok(DefinitionOutcome::ColumnsCreated { table, columns })
        }
        Definition::DropTable { name } => {
            let mut database = database.write().unwrap();
            database.table(&name)?;
            database.alter_database(&drop_table(&name));
            Ok(DefinitionOutcome::TableDropped { name })
        }
        Definition::DropColumns { table, columns } => {
            let mut database = database.write().unwrap();
            let known = database.describe(&table)?;
            for column in &columns {
                if !known.contains(column) {
                    return Err(ExecutionError::UnknownColumn(column.clone()));
                }
            }
            database.alter_database(&single_table(&table, &columns, false));
            Ok(DefinitionOutcome::ColumnsDropped { table, columns })
        }
        Definition::DropDatabase { tables } => {
            let mut database = database.write().unwrap();
            let names = if tables.is_empty() {
                database.table_names()
            } else {
                for name in &tables {
                    database.table(name)?;
                }
                tables
            };
            let mut schema = Schema::new();
            for name in &names {
                schema.insert(name.clone(), BTreeMap::new());
            }
            database.alter_database(&schema);
            Ok(DefinitionOutcome::DatabaseDropped { tables: names.len() })
        }
        Definition::Describe { table } => {
            let columns = database.read().unwrap().describe(&table)?;
            Ok(DefinitionOutcome::Description { table, columns })
        }
        Definition::Tables => Ok(DefinitionOutcome::TableNames(database.read().unwrap().table_names())),
    }
}

fn single_table(name: &str, columns: &[String], keep: bool) -> Schema {
    let mut table = BTreeMap::new();
    for column in columns {
        table.insert(column.clone(), keep);
    }
    let mut schema = Schema::new();
    schema.insert(name.to_owned(), table);
    schema
}

fn drop_table(name: &str) -> Schema {
    let mut schema = Schema::new();
    schema.insert(name.to_owned(), BTreeMap::new());
    schema
}
