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

mod expression;
mod operator;
mod parse;

pub use expression::Expression;
pub use operator::{split_operator, Operator};
pub use parse::{parse_expression, ExpressionError};

/// The bare literal that stands for SQL NULL in conditions.
pub const NULL: &str = "NULL";
