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

use crate::commands::{plural, CommandError};
use query_executor::SharedDatabase;
use std::error::Error;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Writes a JSON snapshot. A path without an extension gets `.json`
/// appended. Returns the confirmation line and the new prompt, named after
/// the snapshot.
pub fn dump(args: &str, database: &SharedDatabase) -> Result<(String, String), Box<dyn Error>> {
    if args.is_empty() {
        return Err(CommandError("must specify the file path to write to").into());
    }
    let mut path = PathBuf::from(args);
    if path.extension().is_none() {
        path.set_extension("json");
    }
    let guard = database.read().unwrap();
    storage::dump(&path, &guard)?;
    let count = guard.table_names().len();
    let message = format!("dumped {} table{} to {}", count, plural(count), path.display());
    Ok((message, prompt_for(&path)))
}

/// Restores a snapshot, merging its tables over the current ones. When the
/// bare path does not exist and has no extension, `.json` is tried.
pub fn restore(args: &str, database: &SharedDatabase) -> Result<(String, String), Box<dyn Error>> {
    if args.is_empty() {
        return Err(CommandError("must specify the file path to restore from").into());
    }
    let mut path = PathBuf::from(args);
    if !path.exists() && path.extension().is_none() {
        path.set_extension("json");
    }
    let mut guard = database.write().unwrap();
    storage::restore(&path, &mut guard)?;
    let count = guard.table_names().len();
    let message = format!("restored {} table{} from {}", count, plural(count), path.display());
    Ok((message, prompt_for(&path)))
}

fn prompt_for(path: &Path) -> String {
    match path.file_stem().and_then(OsStr::to_str) {
        Some(stem) => format!("{}>", stem),
        None => ">".to_owned(),
    }
}
