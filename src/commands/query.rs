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

use itertools::Itertools;
use query_ast::Query;
use query_executor::{cancellation, execute, SharedDatabase};
use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use storage::Values;
use where_clause::NULL;

/// Runs one query to completion and prints the rows grouped by table: a
/// `Table:` line, a tab-separated header in column-name order, then one
/// line per row with NULL standing in for unset values.
pub fn query<W: Write>(query: Query, database: &SharedDatabase, out: &mut W) -> Result<(), Box<dyn Error>> {
    let (source, token) = cancellation();
    let rows = execute(query, token, database.clone())?;
    let mut grouped: BTreeMap<String, Vec<Values>> = BTreeMap::new();
    for result in rows.iter() {
        grouped.entry(result.table).or_insert_with(Vec::new).push(result.values);
    }
    drop(source);

    if grouped.is_empty() {
        writeln!(out, "no results")?;
        return Ok(());
    }
    for (table, rows) in grouped {
        writeln!(out, "Table: {}", table)?;
        let columns: Vec<String> = rows[0].keys().cloned().collect();
        writeln!(out, "{}", columns.iter().join("\t"))?;
        for row in &rows {
            let line = columns.iter().map(|column| value_string(row.get(column))).join("\t");
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn value_string(value: Option<&Option<String>>) -> &str {
    match value {
        Some(Some(value)) => value,
        _ => NULL,
    }
}
