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

use crate::{StorageError, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired shape of the database: table name to column name to a "should
/// exist" flag. An empty column map on an existing table drops the table.
pub type Schema = BTreeMap<String, BTreeMap<String, bool>>;

/// The named set of tables. Names are case-sensitive.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    tables: BTreeMap<String, Table>,
}

impl From<&Schema> for Database {
    fn from(schema: &Schema) -> Database {
        let mut database = Database::default();
        database.alter_database(schema);
        database
    }
}

impl Database {
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table(&self, name: &str) -> Result<&Table, StorageError> {
        self.tables
            .get(name)
            .ok_or_else(|| StorageError::UnknownTable(name.to_owned()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, StorageError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StorageError::UnknownTable(name.to_owned()))
    }

    pub fn describe(&self, name: &str) -> Result<Vec<String>, StorageError> {
        self.table(name).map(Table::column_names)
    }

    /// Applies a schema: an empty column map drops the table, an existing
    /// table is altered in place, and a new table is created unless it would
    /// end up with no user columns.
    pub fn alter_database(&mut self, schema: &Schema) {
        for (name, columns) in schema {
            if columns.is_empty() {
                if self.tables.remove(name).is_some() {
                    log::warn!("table {:?} was dropped", name);
                }
                continue;
            }
            if let Some(table) = self.tables.get_mut(name) {
                table.alter_columns(columns);
                continue;
            }
            let table = Table::new(columns);
            if table.column_names().len() > 1 {
                log::warn!("table {:?} was created", name);
                self.tables.insert(name.clone(), table);
            }
        }
    }

    /// Merges restored tables into this database, overwriting by name.
    pub(crate) fn merge(&mut self, tables: BTreeMap<String, Table>) {
        for (name, table) in tables {
            self.tables.insert(name, table);
        }
    }
}
