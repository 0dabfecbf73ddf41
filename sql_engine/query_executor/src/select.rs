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

use crate::insert::insert_stream;
use crate::{cancellation, error_row, scan, CancelToken, ExecutionError, QueryResult, SharedDatabase};
use crossbeam_channel::{bounded, select, Receiver};
use query_ast::{OrderBy, SelectQuery};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::thread;
use storage::{Schema, Table, Values, ID_COLUMN};
use where_clause::{Expression, Operator};

pub(crate) fn execute_select(
    query: SelectQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    match query.into.clone() {
        None => select_pipeline(query, token, database).map(|(rows, _names)| rows),
        Some(target) => {
            if database.read().unwrap().contains_table(&target) {
                return Err(ExecutionError::TargetTableExists(target));
            }
            let mut inner = query;
            inner.into = None;
            // the inner select runs in its own scope so a failed insert can
            // shut it down without touching the caller's token
            let (source, child_token) = cancellation();
            let (rows, names) = select_pipeline(inner, child_token, database.clone())?;
            let mut columns = BTreeMap::new();
            for name in &names {
                if name != ID_COLUMN {
                    columns.insert(name.clone(), true);
                }
            }
            let mut schema = Schema::new();
            schema.insert(target.clone(), columns);
            database.write().unwrap().alter_database(&schema);
            Ok(insert_stream(target, rows, token, database, Some(source)))
        }
    }
}

/// The plain select pipeline: scan keys, project rows, optionally buffer
/// and sort, then rename to the output names. Also returns the resolved
/// output names for `INTO` target creation.
pub(crate) fn select_pipeline(
    query: SelectQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<(Receiver<QueryResult>, Vec<String>), ExecutionError> {
    let (columns, names) = {
        let guard = database.read().unwrap();
        let table = guard.table(&query.table)?;
        expand_columns(table, &query.columns, &query.names)?
    };
    let rows = project(
        database,
        query.table,
        columns.clone(),
        query.filter,
        token.clone(),
    );
    let rows = match query.order_by {
        Some(order) => sort(rows, order, token.clone()),
        None => rows,
    };
    let rows = rename(rows, columns, names.clone(), token);
    Ok((rows, names))
}

/// Expands `*` against the table at execute time and validates everything
/// else, pairing each resolved column with its output name.
fn expand_columns(
    table: &Table,
    columns: &[String],
    names: &[String],
) -> Result<(Vec<String>, Vec<String>), ExecutionError> {
    let mut resolved_columns = vec![];
    let mut resolved_names = vec![];
    for (column, name) in columns.iter().zip(names) {
        if column == "*" {
            for expanded in table.column_names() {
                resolved_columns.push(expanded.clone());
                resolved_names.push(expanded);
            }
        } else {
            if !table.contains_column(column) {
                return Err(ExecutionError::UnknownColumn(column.clone()));
            }
            resolved_columns.push(column.clone());
            resolved_names.push(name.clone());
        }
    }
    Ok((resolved_columns, resolved_names))
}

/// Producer stage: one row projection per matching key. A projection
/// failure emits one error row and ends the stream.
fn project(
    database: SharedDatabase,
    table: String,
    columns: Vec<String>,
    filter: Option<Expression>,
    token: CancelToken,
) -> Receiver<QueryResult> {
    let (sender, receiver) = bounded(1);
    let keys = scan::keys(database.clone(), table.clone(), filter, token.clone());
    thread::spawn(move || {
        for key in keys.iter() {
            let projected = {
                let guard = database.read().unwrap();
                guard.table(&table).and_then(|t| t.select(key, &columns))
            };
            let row = match projected {
                Ok(values) => QueryResult::new(table.clone(), values),
                Err(error) => {
                    let row = error_row(&table, error.to_string());
                    select! {
                        recv(token.as_receiver()) -> _ => {}
                        send(sender, row) -> _ => {}
                    }
                    return;
                }
            };
            select! {
                recv(token.as_receiver()) -> _ => return,
                send(sender, row) -> sent => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
        }
    });
    receiver
}

/// Buffering stage for ORDER BY: drain everything, stable-sort, re-emit.
fn sort(rows: Receiver<QueryResult>, order: OrderBy, token: CancelToken) -> Receiver<QueryResult> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let mut buffered = vec![];
        loop {
            select! {
                recv(token.as_receiver()) -> _ => return,
                recv(rows) -> row => match row {
                    Ok(row) => buffered.push(row),
                    Err(_) => break,
                }
            }
        }
        buffered.sort_by(|left, right| compare_rows(left, right, &order));
        for row in buffered {
            select! {
                recv(token.as_receiver()) -> _ => return,
                send(sender, row) -> sent => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
        }
    });
    receiver
}

/// Compares on the first sort column where the rows differ, with the
/// operators' string semantics. Rows that differ without being ordered,
/// which takes a NULL on one side, count as equal and keep their scan
/// order.
fn compare_rows(left: &QueryResult, right: &QueryResult, order: &OrderBy) -> Ordering {
    for column in &order.columns {
        let first = left.values.get(column).and_then(|value| value.as_deref());
        let second = right.values.get(column).and_then(|value| value.as_deref());
        if Operator::Eq.compare(first, second) {
            continue;
        }
        let (first, second) = if order.descending {
            (second, first)
        } else {
            (first, second)
        };
        if Operator::Lt.compare(first, second) {
            return Ordering::Less;
        }
        if Operator::Lt.compare(second, first) {
            return Ordering::Greater;
        }
        return Ordering::Equal;
    }
    Ordering::Equal
}

/// Renames row keys to the post-alias output names. Error rows pass
/// through untouched.
fn rename(
    rows: Receiver<QueryResult>,
    columns: Vec<String>,
    names: Vec<String>,
    token: CancelToken,
) -> Receiver<QueryResult> {
    if columns == names {
        return rows;
    }
    let (sender, receiver) = bounded(1);
    thread::spawn(move || loop {
        let row = select! {
            recv(token.as_receiver()) -> _ => return,
            recv(rows) -> row => match row {
                Ok(row) => row,
                Err(_) => return,
            }
        };
        let row = if crate::is_error_row(&row) {
            row
        } else {
            let mut values = Values::new();
            for (column, name) in columns.iter().zip(&names) {
                let value = row.values.get(column).cloned().unwrap_or(None);
                values.insert(name.clone(), value);
            }
            QueryResult::new(row.table, values)
        };
        select! {
            recv(token.as_receiver()) -> _ => return,
            send(sender, row) -> sent => {
                if sent.is_err() {
                    return;
                }
            }
        }
    });
    receiver
}
