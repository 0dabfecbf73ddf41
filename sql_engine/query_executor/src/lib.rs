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

use crossbeam_channel::Receiver;
use query_ast::Query;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, RwLock};
use storage::{Database, Key, StorageError, Values};

mod cancel;
mod definition;
mod delete;
mod insert;
mod scan;
mod select;
mod update;

pub use cancel::{cancellation, CancelSource, CancelToken};
pub use definition::{apply, DefinitionOutcome};
pub use scan::keys;

/// The database as the executors share it: one writer or many readers, at
/// the granularity of a single storage call. Callers serialize mutating
/// queries; the lock only guarantees that no reader observes a half-applied
/// call.
pub type SharedDatabase = Arc<RwLock<Database>>;

pub fn shared(database: Database) -> SharedDatabase {
    Arc::new(RwLock::new(database))
}

/// One streamed result row.
#[derive(Debug, PartialEq, Clone)]
pub struct QueryResult {
    pub table: String,
    pub values: Values,
}

impl QueryResult {
    pub fn new(table: String, values: Values) -> QueryResult {
        QueryResult { table, values }
    }
}

pub(crate) const ERROR_COLUMN: &str = "ERROR";

pub(crate) fn error_row(table: &str, message: String) -> QueryResult {
    let mut values = Values::new();
    values.insert(ERROR_COLUMN.to_owned(), Some(message));
    QueryResult::new(table.to_owned(), values)
}

pub(crate) fn is_error_row(row: &QueryResult) -> bool {
    row.values.len() == 1 && row.values.contains_key(ERROR_COLUMN)
}

/// Failures detected before a result stream starts. Anything that goes
/// wrong later travels through the stream as an `ERROR` row.
#[derive(Debug, PartialEq, Clone)]
pub enum ExecutionError {
    UnknownTable(String),
    UnknownColumn(String),
    UnknownKey(Key),
    DuplicateKey(Key),
    Arity { columns: usize, values: usize },
    TargetTableExists(String),
}

impl Display for ExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::UnknownTable(name) => write!(f, "\"{}\" is not a known table", name),
            ExecutionError::UnknownColumn(name) => write!(f, "{} is not a known column", name),
            ExecutionError::UnknownKey(key) => write!(f, "{} is not a known _id", key),
            ExecutionError::DuplicateKey(key) => write!(f, "id {} already exists", key),
            ExecutionError::Arity { columns, values } => {
                write!(f, "{} columns stated but {} values given", columns, values)
            }
            ExecutionError::TargetTableExists(name) => write!(f, "table {} already exists", name),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl From<StorageError> for ExecutionError {
    fn from(error: StorageError) -> ExecutionError {
        match error {
            StorageError::UnknownTable(name) => ExecutionError::UnknownTable(name),
            StorageError::UnknownColumn(name) => ExecutionError::UnknownColumn(name),
            StorageError::UnknownKey(key) => ExecutionError::UnknownKey(key),
            StorageError::DuplicateKey(key) => ExecutionError::DuplicateKey(key),
        }
    }
}

/// Runs one query plan. The returned stream closes when the plan is drained
/// or the token fires; cancellation is not an error and produces no row.
pub fn execute(
    query: Query,
    token: CancelToken,
    database: SharedDatabase,
) -> Result<Receiver<QueryResult>, ExecutionError> {
    match query {
        Query::Select(select) => select::execute_select(select, token, database),
        Query::InsertValues(insert) => insert::execute_insert_values(insert, token, database),
        Query::InsertSelect(insert) => insert::execute_insert_select(insert, token, database),
        Query::Update(update) => update::execute_update(update, token, database),
        Query::Delete(delete) => delete::execute_delete(delete, token, database),
    }
}
