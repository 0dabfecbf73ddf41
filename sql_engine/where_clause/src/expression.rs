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

use crate::Operator;
use lexer::unique_strings;
use std::fmt::{self, Display, Formatter};
use storage::Values;

/// A boolean filter over one row projection. Conditions compare a column
/// against a literal; `Not`, `And` and `Or` combine them. Combinators own
/// their children directly.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Condition {
        column: String,
        op: Operator,
        value: Option<String>,
    },
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Condition { column, op, value } => {
                write!(f, "{} {} {}", column, op, value.as_deref().unwrap_or(crate::NULL))
            }
            Expression::Not(expression) => write!(f, "NOT {}", expression),
            Expression::And(left, right) => write!(f, "{} AND {}", left, right),
            Expression::Or(left, right) => write!(f, "{} OR {}", left, right),
        }
    }
}

impl Expression {
    /// Evaluates against a row projection. A condition over a column that is
    /// not present in the projection at all is false; a present-but-NULL
    /// value goes through the operator's NULL rules. `And`/`Or` short
    /// circuit left first.
    pub fn compare(&self, values: &Values) -> bool {
        match self {
            Expression::Condition { column, op, value } => match values.get(column) {
                None => false,
                Some(stored) => op.compare(stored.as_deref(), value.as_deref()),
            },
            Expression::Not(expression) => !expression.compare(values),
            Expression::And(left, right) => left.compare(values) && right.compare(values),
            Expression::Or(left, right) => left.compare(values) || right.compare(values),
        }
    }

    /// Every column the expression references, deduplicated in
    /// first-occurrence order.
    pub fn column_names(&self) -> Vec<String> {
        unique_strings(self.collect_columns())
    }

    fn collect_columns(&self) -> Vec<String> {
        match self {
            Expression::Condition { column, .. } => vec![column.clone()],
            Expression::Not(expression) => expression.collect_columns(),
            Expression::And(left, right) | Expression::Or(left, right) => {
                let mut columns = left.collect_columns();
                columns.extend(right.collect_columns());
                columns
            }
        }
    }
}
