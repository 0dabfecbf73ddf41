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

use crate::{Key, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse store of one column: row key to value. A row with no entry is
/// NULL in this column. Values are stored verbatim; literal normalization
/// is the parser's job.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column {
    values: BTreeMap<Key, String>,
}

impl Column {
    pub fn insert(&mut self, key: Key, value: &str) -> Result<(), StorageError> {
        if self.values.contains_key(&key) {
            return Err(StorageError::DuplicateKey(key));
        }
        self.values.insert(key, value.to_owned());
        Ok(())
    }

    pub fn update(&mut self, key: Key, value: &str) {
        self.values.insert(key, value.to_owned());
    }

    pub fn delete(&mut self, key: Key) -> Result<(), StorageError> {
        match self.values.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StorageError::UnknownKey(key)),
        }
    }

    pub fn value(&self, key: Key) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Keys whose value equals the given one under case-insensitive
    /// comparison. Free-text lookup only; WHERE comparisons stay strict.
    pub fn find(&self, value: &str) -> Vec<Key> {
        self.values
            .iter()
            .filter(|(_key, stored)| stored.eq_ignore_ascii_case(value))
            .map(|(key, _stored)| *key)
            .collect()
    }

    pub(crate) fn remove(&mut self, key: Key) {
        self.values.remove(&key);
    }
}
