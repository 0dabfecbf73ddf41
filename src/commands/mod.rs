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

use std::fmt::{self, Display, Formatter};

mod dump_restore;
mod query;
mod structure;

pub use dump_restore::{dump, restore};
pub use query::query;
pub use structure::definition;

pub const HELP: &str = "Query commands: SELECT, INSERT, UPDATE and DELETE are supported.\n\
\tSELECT <column>[,<column>...] [INTO <table>] FROM <table> [WHERE <expression>] [ORDER BY <column>[,<column>...] [ASC|DESC]]\n\
\tINSERT INTO <table> (<column> [,<column>...]) VALUES (<value> [,<value>...])\n\
\tINSERT INTO <table> (<column> [,<column>...]) SELECT ...\n\
\tUPDATE <table> SET <column>=<value>|NULL [,<column>=<value>|NULL...] [WHERE <expression>]\n\
\tDELETE FROM <table> [WHERE <expression>]\n\
Structure commands: CREATE and DROP shape the tables and columns.\n\
\tCREATE TABLE|COLUMN <table> (<column> [,<column>...])\n\
\tDROP TABLE <table>\n\
\tDROP COLUMN <table> (<column> [,<column>...])\n\
\tDROP DATABASE [<table>[,<table>...]]\n\
Metadata: DESCRIBE (DESC) <table> lists the columns of a table, TABLES lists the table names.\n\
Dump and restore the whole database with DUMP <file> and RESTORE <file>.\n\
EXIT (X, QUIT) leaves the prompt.";

/// A command rejected before it reached the engine.
#[derive(Debug)]
pub struct CommandError(pub &'static str);

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for CommandError {}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
