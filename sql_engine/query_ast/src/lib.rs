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
use storage::Values;
use where_clause::Expression;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Query(Query),
    Definition(Definition),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A typed query plan. Produced by the parser, consumed by the executors.
#[derive(Debug, PartialEq, Clone)]
pub enum Query {
    Select(SelectQuery),
    InsertValues(InsertValuesQuery),
    InsertSelect(InsertSelectQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
}

/// `SELECT columns [INTO table] FROM table [WHERE ...] [ORDER BY ...]`.
/// `columns` may still contain `*`; expansion happens at execute time so
/// schema changes between parse and execute stay visible. `names` carries
/// the post-`AS` output name for each entry, defaulting to the column
/// itself.
#[derive(Debug, PartialEq, Clone)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub names: Vec<String>,
    pub filter: Option<Expression>,
    pub into: Option<String>,
    pub order_by: Option<OrderBy>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OrderBy {
    pub columns: Vec<String>,
    pub descending: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InsertValuesQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Option<String>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InsertSelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub select: Box<SelectQuery>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UpdateQuery {
    pub table: String,
    pub values: Values,
    pub filter: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DeleteQuery {
    pub table: String,
    pub filter: Option<Expression>,
}

/// Structure and metadata statements. All of them resolve to schema
/// alteration or catalog lookups rather than row streams.
#[derive(Debug, PartialEq, Clone)]
pub enum Definition {
    CreateTable { name: String, columns: Vec<String> },
    CreateColumns { table: String, columns: Vec<String> },
    DropTable { name: String },
    DropColumns { table: String, columns: Vec<String> },
    /// Drops the listed tables; an empty list drops every table.
    DropDatabase { tables: Vec<String> },
    Describe { table: String },
    Tables,
}
