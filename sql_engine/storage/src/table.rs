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

use crate::{Column, Key, StorageError, Values, ID_COLUMN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One table: a key-set and its named column stores. The key-set maps each
/// allocated key to an alive flag; tombstoned keys (flag `false`) keep their
/// entry so the key is never handed out again.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    keys: BTreeMap<Key, bool>,
    columns: BTreeMap<String, Column>,
}

impl Table {
    pub fn new(columns: &BTreeMap<String, bool>) -> Table {
        let mut table = Table::default();
        table.alter_columns(columns);
        table
    }

    /// The synthetic `_id` column followed by the user columns.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![ID_COLUMN.to_owned()];
        names.extend(self.columns.keys().cloned());
        names
    }

    pub fn contains_column(&self, name: &str) -> bool {
        name == ID_COLUMN || self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains_id(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Next id to allocate: one past the greatest key ever used, dead keys
    /// included, or 0 for a table that never held a row.
    pub fn next_id(&self) -> Key {
        match self.keys.keys().next_back() {
            Some(key) => key + 1,
            None => 0,
        }
    }

    /// Adds columns mapped to `true` (no-op when present) and drops columns
    /// mapped to `false`, values and all.
    pub fn alter_columns(&mut self, columns: &BTreeMap<String, bool>) {
        for (name, keep) in columns {
            if *keep {
                self.columns.entry(name.clone()).or_insert_with(Column::default);
            } else {
                self.columns.remove(name);
            }
        }
    }

    /// Projects the requested columns of one row. `_id` is synthesized from
    /// the key; unset columns come back as `None`.
    pub fn select(&self, id: Key, columns: &[String]) -> Result<Values, StorageError> {
        let mut values = Values::new();
        for name in columns {
            let value = if name == ID_COLUMN {
                Some(id.to_string())
            } else {
                let column = self
                    .columns
                    .get(name)
                    .ok_or_else(|| StorageError::UnknownColumn(name.clone()))?;
                column.value(id).map(str::to_owned)
            };
            values.insert(name.clone(), value);
        }
        Ok(values)
    }

    /// Allocates the next id and writes the given values. On a column error
    /// the writes already made are left in place and the key is never marked
    /// alive; callers are expected to reject the stale state.
    pub fn insert(&mut self, values: &Values) -> Result<Key, StorageError> {
        let id = self.next_id();
        for (name, value) in values {
            let column = self
                .columns
                .get_mut(name)
                .ok_or_else(|| StorageError::UnknownColumn(name.clone()))?;
            match value {
                Some(value) => column.insert(id, value)?,
                None => {
                    let _ = column.delete(id);
                }
            }
        }
        self.keys.insert(id, true);
        Ok(id)
    }

    /// Overwrites the given columns of one live row; `None` unsets. Unset
    /// errors on absent values are ignored.
    pub fn update(&mut self, id: Key, values: &Values) -> Result<(), StorageError> {
        if !self.contains_id(id) {
            return Err(StorageError::UnknownKey(id));
        }
        for (name, value) in values {
            let column = self
                .columns
                .get_mut(name)
                .ok_or_else(|| StorageError::UnknownColumn(name.clone()))?;
            match value {
                Some(value) => column.update(id, value),
                None => {
                    let _ = column.delete(id);
                }
            }
        }
        Ok(())
    }

    /// Tombstones the given keys and scrubs their values from every column.
    /// Returns the keys that actually transitioned; dead or unknown keys are
    /// a no-op.
    pub fn delete(&mut self, ids: &[Key]) -> Vec<Key> {
        let mut deleted = vec![];
        for id in ids {
            if let Some(alive) = self.keys.get_mut(id) {
                if *alive {
                    *alive = false;
                    deleted.push(*id);
                }
            }
            for column in self.columns.values_mut() {
                column.remove(*id);
            }
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> BTreeMap<String, bool> {
        names.iter().map(|name| ((*name).to_owned(), true)).collect()
    }

    fn row(pairs: &[(&str, Option<&str>)]) -> Values {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.map(str::to_owned)))
            .collect()
    }

    #[cfg(test)]
    mod schema {
        use super::*;

        #[test]
        fn column_names_include_synthetic_id() {
            let table = Table::new(&columns(&["one", "two", "three"]));

            assert_eq!(table.column_names(), vec!["_id", "one", "three", "two"]);
        }

        #[test]
        fn alter_columns_drops_and_adds() {
            let mut table = Table::new(&columns(&["one", "two", "three"]));

            let mut change = BTreeMap::new();
            change.insert("two".to_owned(), false);
            change.insert("four".to_owned(), true);
            table.alter_columns(&change);

            assert_eq!(table.column_names(), vec!["_id", "four", "one", "three"]);
        }

        #[test]
        fn dropping_a_column_preserves_the_others() {
            let mut table = Table::new(&columns(&["a", "b"]));
            let id = table.insert(&row(&[("a", Some("1")), ("b", Some("2"))])).unwrap();

            let mut change = BTreeMap::new();
            change.insert("b".to_owned(), false);
            table.alter_columns(&change);

            assert_eq!(
                table.select(id, &["a".to_owned()]),
                Ok(row(&[("a", Some("1"))]))
            );
        }

        #[test]
        fn added_column_is_null_until_written() {
            let mut table = Table::new(&columns(&["a"]));
            let id = table.insert(&row(&[("a", Some("1"))])).unwrap();

            let mut change = BTreeMap::new();
            change.insert("b".to_owned(), true);
            table.alter_columns(&change);

            assert_eq!(
                table.select(id, &["b".to_owned()]),
                Ok(row(&[("b", None)]))
            );
        }
    }

    #[cfg(test)]
    mod identifiers {
        use super::*;

        #[test]
        fn next_id_on_empty_table_is_zero() {
            let table = Table::new(&columns(&["one"]));

            assert_eq!(table.next_id(), 0);
        }

        #[test]
        fn next_id_grows_with_inserts() {
            let mut table = Table::new(&columns(&["one", "two", "three"]));

            table.insert(&row(&[("one", Some("1"))])).unwrap();
            assert_eq!(table.next_id(), 1);
            table.insert(&row(&[("two", Some("2"))])).unwrap();
            table.insert(&row(&[("three", Some("3"))])).unwrap();
            assert_eq!(table.next_id(), 3);
        }

        #[test]
        fn dead_keys_still_count_for_allocation() {
            let mut table = Table::new(&columns(&["one"]));

            table.insert(&row(&[("one", Some("1"))])).unwrap();
            table.insert(&row(&[("one", Some("2"))])).unwrap();
            table.insert(&row(&[("one", Some("3"))])).unwrap();

            table.delete(&[1]);
            assert_eq!(table.next_id(), 3);
            table.delete(&[0, 2]);
            assert_eq!(table.next_id(), 3);
        }

        #[test]
        fn id_after_delete_is_greater_than_the_deleted_one() {
            let mut table = Table::new(&columns(&["one"]));

            let first = table.insert(&row(&[("one", Some("1"))])).unwrap();
            table.delete(&[first]);
            let second = table.insert(&row(&[("one", Some("2"))])).unwrap();

            assert!(second > first);
        }
    }

    #[cfg(test)]
    mod rows {
        use super::*;

        #[test]
        fn insert_then_select_round_trips() {
            let mut table = Table::new(&columns(&["a", "b", "c"]));

            let id = table
                .insert(&row(&[("a", Some("1")), ("b", Some("2"))]))
                .unwrap();

            assert_eq!(
                table.select(
                    id,
                    &["_id".to_owned(), "a".to_owned(), "b".to_owned(), "c".to_owned()]
                ),
                Ok(row(&[
                    ("_id", Some("0")),
                    ("a", Some("1")),
                    ("b", Some("2")),
                    ("c", None)
                ]))
            );
        }

        #[test]
        fn select_rejects_unknown_column() {
            let table = Table::new(&columns(&["a"]));

            assert_eq!(
                table.select(0, &["missing".to_owned()]),
                Err(StorageError::UnknownColumn("missing".to_owned()))
            );
        }

        #[test]
        fn insert_rejects_unknown_column_without_marking_alive() {
            let mut table = Table::new(&columns(&["a"]));

            assert_eq!(
                table.insert(&row(&[("a", Some("1")), ("missing", Some("2"))])),
                Err(StorageError::UnknownColumn("missing".to_owned()))
            );
            assert_eq!(table.contains_id(0), false);
        }

        #[test]
        fn update_unsets_on_null() {
            let mut table = Table::new(&columns(&["a", "b"]));
            let id = table
                .insert(&row(&[("a", Some("1")), ("b", Some("2"))]))
                .unwrap();

            table.update(id, &row(&[("a", None)])).unwrap();

            assert_eq!(
                table.select(id, &["a".to_owned(), "b".to_owned()]),
                Ok(row(&[("a", None), ("b", Some("2"))]))
            );
        }

        #[test]
        fn update_rejects_dead_key() {
            let mut table = Table::new(&columns(&["a"]));
            let id = table.insert(&row(&[("a", Some("1"))])).unwrap();
            table.delete(&[id]);

            assert_eq!(
                table.update(id, &row(&[("a", Some("2"))])),
                Err(StorageError::UnknownKey(id))
            );
        }

        #[test]
        fn delete_reports_only_transitioned_keys() {
            let mut table = Table::new(&columns(&["a"]));
            let id = table.insert(&row(&[("a", Some("1"))])).unwrap();

            assert_eq!(table.delete(&[id]), vec![id]);
            assert_eq!(table.delete(&[id]), Vec::<Key>::new());
            assert_eq!(table.delete(&[42]), Vec::<Key>::new());
        }

        #[test]
        fn delete_scrubs_values_from_all_columns() {
            let mut table = Table::new(&columns(&["a", "b"]));
            let id = table
                .insert(&row(&[("a", Some("1")), ("b", Some("2"))]))
                .unwrap();

            table.delete(&[id]);

            assert_eq!(table.column("a").unwrap().value(id), None);
            assert_eq!(table.column("b").unwrap().value(id), None);
        }
    }
}
