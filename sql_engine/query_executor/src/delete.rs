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
use query_ast::DeleteQuery;
use std::thread;
use storage::Values;

/// Drains the key scan, tombstones everything in one call, and reports the
/// number of rows that actually went away.
pub(crate) fn execute_delete(
    query: DeleteQuery,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    database.read().unwrap().table(&query.table)?;
    let DeleteQuery { table, filter } = query;
    let keys = scan::keys(database.clone(), table.clone(), filter, token.clone());
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let mut buffered = vec![];
        loop {
            select! {
                recv(token.as_receiver()) -> _ => return,
                recv(keys) -> key => match key {
                    Ok(key) => buffered.push(key),
                    Err(_) => break,
                }
            }
        }
        let row = match database.write().unwrap().table_mut(&table) {
            Ok(t) => {
                let deleted = t.delete(&buffered);
                let mut values = Values::new();
                values.insert("deleted".to_owned(), Some(deleted.len().to_string()));
                QueryResult::new(table.clone(), values)
            }
            Err(error) => error_row(&table, error.to_string()),
        };
        select! {
            recv(token.as_receiver()) -> _ => {}
            send(sender, row) -> _ => {}
        }
    });
    Ok(receiver)
}
