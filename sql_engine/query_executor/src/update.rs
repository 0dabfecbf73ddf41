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

use crate::{error_row, scan, CancelToken, ExecutionError, QueryResult, SharedDatabase};
use crossbeam_channel::{bounded, select, Receiver};
use query_ast::UpdateQuery;
use std::thread;
use storage::{Values, ID_COLUMN};

/// Updates every matching row in scan order, emitting `{"_id": key}` per
/// touched row. The first failure emits one error row and closes the
/// stream.
pub(crate) fn execute_update(
    query: UpdateQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    database.read().unwrap().table(&query.table)?;
    let UpdateQuery { table, values, filter } = query;
    let keys = scan::keys(database.clone(), table.clone(), filter, token.clone());
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        for key in keys.iter() {
            let outcome = database
                .write()
                .unwrap()
                .table_mut(&table)
                .and_then(|t| t.update(key, &values));
            let (row, failed) = match outcome {
                Ok(()) => {
                    let mut updated = Values::new();
                    updated.insert(ID_COLUMN.to_owned(), Some(key.to_string()));
                    (QueryResult::new(table.clone(), updated), false)
                }
                Err(error) => (error_row(&table, error.to_string()), true),
            };
            select! {
                recv(token.as_receiver()) -> _ => return,
                send(sender, row) -> sent => {
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
    Ok(receiver)
}
