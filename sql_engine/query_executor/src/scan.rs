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

use crate::{CancelToken, SharedDatabase};
use crossbeam_channel::{bounded, select, Receiver};
use std::thread;
use storage::Key;
use where_clause::Expression;

const KEY_BUFFER: usize = 255;

/// Streams the keys of every live row that matches the expression, in
/// ascending order, over a bounded channel. The id ceiling is snapshotted
/// once up front; rows are projected and evaluated one read-lock at a time.
/// A projection failure aborts the stream. Cancellation, or a dropped
/// receiver, stops the producer at the next emission point.
pub fn keys(
    database: SharedDatabase,
    table: String,
    expression: Option<Expression>,
    token: CancelToken,
) -> Receiver<Key> {
    let (sender, receiver) = bounded(KEY_BUFFER);
    thread::spawn(move || {
        let last = match database.read().unwrap().table(&table) {
            Ok(table) => table.next_id(),
            Err(error) => {
                log::warn!("key scan not started: {}", error);
                return;
            }
        };
        let columns = expression.as_ref().map(Expression::column_names).unwrap_or_default();
        for key in 0..last {
            {
                let guard = database.read().unwrap();
                let table = match guard.table(&table) {
                    Ok(table) => table,
                    Err(error) => {
                        log::warn!("key scan aborted: {}", error);
                        return;
                    }
                };
                if !table.contains_id(key) {
                    continue;
                }
                if let Some(expression) = &expression {
                    let row = match table.select(key, &columns) {
                        Ok(row) => row,
                        Err(error) => {
                            log::warn!("key scan aborted: {}", error);
                            return;
                        }
                    };
                    if !expression.compare(&row) {
                        continue;
                    }
                }
            }
            select! {
                recv(token.as_receiver()) -> _ => return,
                send(sender, key) -> sent => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
        }
    });
    receiver
}
