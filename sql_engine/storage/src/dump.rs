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

use crate::{Database, Schema, Table};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CodecError {
    Io { path: PathBuf, cause: std::io::Error },
    Json { path: PathBuf, cause: serde_json::Error },
}

impl CodecError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> CodecError + '_ {
        move |cause| CodecError::Io {
            path: path.to_path_buf(),
            cause,
        }
    }

    fn json(path: &Path) -> impl FnOnce(serde_json::Error) -> CodecError + '_ {
        move |cause| CodecError::Json {
            path: path.to_path_buf(),
            cause,
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io { path, cause } => write!(f, "{}: {}", path.display(), cause),
            CodecError::Json { path, cause } => write!(f, "{}: {}", path.display(), cause),
        }
    }
}

impl std::error::Error for CodecError {}

/// Writes the whole database as one JSON document of table encodings.
pub fn dump(path: &Path, database: &Database) -> Result<(), CodecError> {
    let file = File::create(path).map_err(CodecError::io(path))?;
    serde_json::to_writer(BufWriter::new(file), database).map_err(CodecError::json(path))
}

/// Reads a snapshot and merges its tables into the database, overwriting
/// tables that share a name.
pub fn restore(path: &Path, database: &mut Database) -> Result<(), CodecError> {
    let file = File::open(path).map_err(CodecError::io(path))?;
    let tables: BTreeMap<String, Table> =
        serde_json::from_reader(BufReader::new(file)).map_err(CodecError::json(path))?;
    database.merge(tables);
    Ok(())
}

pub fn load_schema(path: &Path) -> Result<Schema, CodecError> {
    let file = File::open(path).map_err(CodecError::io(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(CodecError::json(path))
}

pub fn save_schema(path: &Path, schema: &Schema) -> Result<(), CodecError> {
    let file = File::create(path).map_err(CodecError::io(path))?;
    serde_json::to_writer(BufWriter::new(file), schema).map_err(CodecError::json(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Values;

    #[rstest::fixture]
    fn snapshot_path() -> (tempfile::TempDir, PathBuf) {
        let directory = tempfile::tempdir().expect("to create temporary folder");
        let path = directory.path().join("snapshot.json");
        (directory, path)
    }

    fn database_with_rows() -> Database {
        let mut schema = Schema::new();
        let mut columns = BTreeMap::new();
        columns.insert("a".to_owned(), true);
        columns.insert("b".to_owned(), true);
        schema.insert("t".to_owned(), columns);
        let mut database = Database::from(&schema);

        let table = database.table_mut("t").unwrap();
        let mut row = Values::new();
        row.insert("a".to_owned(), Some("1".to_owned()));
        row.insert("b".to_owned(), Some("2".to_owned()));
        table.insert(&row).unwrap();
        let mut row = Values::new();
        row.insert("a".to_owned(), Some("3".to_owned()));
        row.insert("b".to_owned(), None);
        table.insert(&row).unwrap();
        table.insert(&Values::new()).unwrap();
        table.delete(&[1]);

        database
    }

    #[rstest::rstest]
    fn dump_then_restore_round_trips(snapshot_path: (tempfile::TempDir, PathBuf)) {
        let (_directory, path) = snapshot_path;
        let database = database_with_rows();

        dump(&path, &database).expect("to write snapshot");

        let mut restored = Database::default();
        restore(&path, &mut restored).expect("to read snapshot");

        assert_eq!(restored, database);
    }

    #[rstest::rstest]
    fn restore_merges_over_existing_tables(snapshot_path: (tempfile::TempDir, PathBuf)) {
        let (_directory, path) = snapshot_path;
        let database = database_with_rows();
        dump(&path, &database).expect("to write snapshot");

        let mut other_schema = Schema::new();
        let mut columns = BTreeMap::new();
        columns.insert("z".to_owned(), true);
        other_schema.insert("other".to_owned(), columns);
        let mut target = Database::from(&other_schema);

        restore(&path, &mut target).expect("to read snapshot");

        assert!(target.contains_table("t"));
        assert!(target.contains_table("other"));
    }

    #[rstest::rstest]
    fn dump_uses_decimal_string_keys(snapshot_path: (tempfile::TempDir, PathBuf)) {
        let (_directory, path) = snapshot_path;
        dump(&path, &database_with_rows()).expect("to write snapshot");

        let text = std::fs::read_to_string(&path).expect("to read snapshot back");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");

        assert_eq!(value["t"]["keys"]["0"], serde_json::Value::Bool(true));
        assert_eq!(value["t"]["keys"]["1"], serde_json::Value::Bool(false));
        assert_eq!(value["t"]["columns"]["a"]["0"], serde_json::Value::String("1".to_owned()));
    }

    #[rstest::rstest]
    fn schema_round_trips(snapshot_path: (tempfile::TempDir, PathBuf)) {
        let (_directory, path) = snapshot_path;

        let mut schema = Schema::new();
        let mut columns = BTreeMap::new();
        columns.insert("a".to_owned(), true);
        schema.insert("t".to_owned(), columns);

        save_schema(&path, &schema).expect("to write schema");
        assert_eq!(load_schema(&path).expect("to read schema"), schema);
    }

    #[test]
    fn restore_from_missing_file_fails_with_path() {
        let mut database = Database::default();
        let error = restore(Path::new("/no/such/file.json"), &mut database).unwrap_err();

        assert!(error.to_string().contains("/no/such/file.json"));
    }
}
