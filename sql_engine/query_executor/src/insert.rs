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

use crate::select::execute_select;
use crate::{
    cancellation, error_row, is_error_row, CancelSource, CancelToken, ExecutionError, QueryResult, SharedDatabase,
};
use crossbeam_channel::{bounded, select, Receiver};
use query_ast::{InsertSelectQuery, InsertValuesQuery};
use std::thread;
use storage::{Table, Values, ID_COLUMN};

pub(crate) fn execute_insert_values(
    query: InsertValuesQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    let columns = {
        let guard = database.read().unwrap();
        let table = guard.table(&query.table)?;
        expand_insert_columns(table, &query.columns)?
    };
    if columns.len() != query.values.len() {
        return Err(ExecutionError::Arity {
            columns: columns.len(),
            values: query.values.len(),
        });
    }
    let values: Values = columns.into_iter().zip(query.values).collect();
    let (sender, receiver) = bounded(1);
    let table = query.table;
    thread::spawn(move || {
        let row = insert_row(&database, &table, &values);
        select! {
            recv(token.as_receiver()) -> _ => {}
            send(sender, row) -> _ => {}
        }
    });
    Ok(receiver)
}

pub(crate) fn execute_insert_select(
    query: InsertSelectQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    {
        let guard = database.read().unwrap();
        let table = guard.table(&query.table)?;
        for column in &query.columns {
            if column != "*" && !table.contains_column(column) {
                return Err(ExecutionError::UnknownColumn(column.clone()));
            }
        }
    }
    // the inner select gets its own scope so one failed insert stops it
    let (source, child_token) = cancellation();
    let rows = execute_select(*query.select, child_token, database.clone())?;
    Ok(insert_stream(query.table, rows, token, database, Some(source)))
}

/// Feeds a stream of rows into the values-insert path, one insert per row,
/// `_id` stripped. The first failed insert emits one error row, drops the
/// inner scope and closes the stream. Incoming error rows are forwarded
/// and also end the stream.
pub(crate) fn insert_stream(
    table: String,
    rows: Receiver<QueryResult>,
    token: CancelToken,
    database: SharedDatabase,
    inner_scope: Option<CancelSource>,
) -> Receiver<QueryResult> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let _inner_scope = inner_scope;
        loop {
            let row = select! {
                recv(token.as_receiver()) -> _ => return,
                recv(rows) -> row => match row {
                    Ok(row) => row,
                    Err(_) => return,
                }
            };
            let result = if is_error_row(&row) {
                row
            } else {
                let mut values = row.values;
                values.remove(ID_COLUMN);
                insert_row(&database, &table, &values)
            };
            let failed = is_error_row(&result);
            select! {
                recv(token.as_receiver()) -> _ => return,
                send(sender, result) -> sent => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
            if failed {
                return;
            }
        }
    });
    receiver
}

/// One insert, one result row: `{"inserted": "<table>:<id>"}` on success,
/// an error row otherwise.
pub(crate) fn insert_row(database: &SharedDatabase, table: &str, values: &Values) -> QueryResult {
    let inserted = database
        .write()
        .unwrap()
        .table_mut(table)
        .and_then(|t| t.insert(values));
    match inserted {
        Ok(id) => {
            let mut values = Values::new();
            values.insert("inserted".to_owned(), Some(format!("{}:{}", table, id)));
            QueryResult::new(table.to_owned(), values)
        }
        Err(error) => error_row(table, error.to_string()),
    }
}

/// `*` in an insert column list stands for every user column; `_id` is not
/// writable and never expands.
fn expand_insert_columns(table: &Table, columns: &[String]) -> Result<Vec<String>, ExecutionError> {
    let mut resolved = vec![];
    for column in columns {
        if column == "*" {
            resolved.extend(table.column_names().into_iter().filter(|name| name != ID_COLUMN));
        } else {
            if !table.contains_column(column) {
                return Err(ExecutionError::UnknownColumn(column.clone()));
            }
            resolved.push(column.clone());
        }
    }
    Ok(resolved)
}
