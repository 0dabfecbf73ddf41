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

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

mod column;
mod database;
mod dump;
mod table;

pub use column::Column;
pub use database::{Database, Schema};
pub use dump::{dump, load_schema, restore, save_schema, CodecError};
pub use table::Table;

/// Row identifier assigned by a table. Monotonically non-decreasing, never
/// reused even after deletion.
pub type Key = i64;

/// A projection of a row: column name to optional value. An absent entry
/// means the column was not referenced, `None` means SQL NULL.
pub type Values = BTreeMap<String, Option<String>>;

/// The synthetic column every table exposes. It is never materialized;
/// reads synthesize the decimal form of the row key.
pub const ID_COLUMN: &str = "_id";

#[derive(Debug, PartialEq, Clone)]
pub enum StorageError {
    UnknownTable(String),
    UnknownColumn(String),
    UnknownKey(Key),
    DuplicateKey(Key),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::UnknownTable(name) => write!(f, "\"{}\" is not a known table", name),
            StorageError::UnknownColumn(name) => write!(f, "{} is not a known column", name),
            StorageError::UnknownKey(key) => write!(f, "{} is not a known _id", key),
            StorageError::DuplicateKey(key) => write!(f, "id {} already exists", key),
        }
    }
}

impl std::error::Error for StorageError {}
