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

use crate::{split_operator, Expression, NULL};
use lexer::{bracketed_string, first_word, split_ignore_quoted, unquote};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionError {
    /// No comparison operator in a condition.
    NoOperator(String),
    /// An operator with nothing before it.
    MissingColumn(String),
    /// An operator with nothing after it.
    MissingValue(String),
    /// Two expressions joined by something other than AND or OR.
    ExpectedConjunction(String),
    Empty,
}

impl Display for ExpressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::NoOperator(condition) => {
                write!(f, "no operator found in condition {:?}", condition)
            }
            ExpressionError::MissingColumn(condition) => {
                write!(f, "missing condition column name in {:?}", condition)
            }
            ExpressionError::MissingValue(condition) => write!(
                f,
                "missing condition value in {:?}, use 'NULL' to compare to an empty value",
                condition
            ),
            ExpressionError::ExpectedConjunction(word) => {
                write!(f, "unexpected {:?} after expression, expected 'OR' or 'AND'", word)
            }
            ExpressionError::Empty => f.write_str("empty expression"),
        }
    }
}

impl std::error::Error for ExpressionError {}

/// Parses a whole WHERE expression: one primary, then any number of further
/// primaries joined by AND or OR. Keywords are case-insensitive.
pub fn parse_expression(s: &str) -> Result<Expression, ExpressionError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let (mut expression, mut rest) = parse_primary(s)?;
    while !rest.trim().is_empty() {
        let (conjunction, after) = first_word(rest.trim());
        let (right, remaining) = parse_primary(after)?;
        expression = if conjunction.eq_ignore_ascii_case("AND") {
            Expression::And(Box::new(expression), Box::new(right))
        } else if conjunction.eq_ignore_ascii_case("OR") {
            Expression::Or(Box::new(expression), Box::new(right))
        } else {
            return Err(ExpressionError::ExpectedConjunction(conjunction.to_owned()));
        };
        rest = remaining;
    }
    Ok(expression)
}

/// A primary is a bracketed expression, a NOT-inverted primary, or a single
/// condition. Returns the parsed expression and the unconsumed text.
fn parse_primary(s: &str) -> Result<(Expression, String), ExpressionError> {
    let s = s.trim();
    if s.starts_with('(') {
        let (inner, rest) = bracketed_string(s);
        let expression = parse_expression(inner)?;
        return Ok((expression, rest.to_owned()));
    }

    let (word, after) = first_word(s);
    if word.eq_ignore_ascii_case("NOT") {
        let (expression, rest) = parse_primary(after)?;
        return Ok((Expression::Not(Box::new(expression)), rest));
    }

    parse_condition(s)
}

/// A condition is `column OP literal`. The literal loses one layer of quotes;
/// the bare word NULL stands for SQL NULL.
fn parse_condition(s: &str) -> Result<(Expression, String), ExpressionError> {
    let (column, op, after) = split_operator(s).ok_or_else(|| ExpressionError::NoOperator(s.to_owned()))?;
    if column.is_empty() {
        return Err(ExpressionError::MissingColumn(s.to_owned()));
    }
    let tokens = split_ignore_quoted(after, ' ');
    let literal = tokens.first().map(String::as_str).unwrap_or("");
    if unquote(literal).is_empty() && !literal.eq_ignore_ascii_case(NULL) {
        return Err(ExpressionError::MissingValue(s.to_owned()));
    }
    let value = if literal.eq_ignore_ascii_case(NULL) {
        None
    } else {
        Some(unquote(literal).to_owned())
    };
    let rest = tokens[1..].join(" ");
    Ok((
        Expression::Condition {
            column: column.to_owned(),
            op,
            value,
        },
        rest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Operator;

    fn condition(column: &str, op: Operator, value: Option<&str>) -> Expression {
        Expression::Condition {
            column: column.to_owned(),
            op,
            value: value.map(str::to_owned),
        }
    }

    #[cfg(test)]
    mod conditions {
        use super::*;

        #[test]
        fn bare_condition() {
            assert_eq!(parse_expression("a=b"), Ok(condition("a", Operator::Eq, Some("b"))));
            assert_eq!(parse_expression("a = b"), Ok(condition("a", Operator::Eq, Some("b"))));
        }

        #[test]
        fn quoted_literal() {
            assert_eq!(
                parse_expression("a != 'ha ha'"),
                Ok(condition("a", Operator::NotEq, Some("ha ha")))
            );
        }

        #[test]
        fn null_literal() {
            assert_eq!(parse_expression("a = NULL"), Ok(condition("a", Operator::Eq, None)));
            assert_eq!(parse_expression("a != null"), Ok(condition("a", Operator::NotEq, None)));
        }

        #[test]
        fn quoted_null_is_a_string() {
            assert_eq!(
                parse_expression("a = 'NULL'"),
                Ok(condition("a", Operator::Eq, Some("NULL")))
            );
        }

        #[test]
        fn operator_tie_breaks() {
            assert_eq!(parse_expression("a>=1"), Ok(condition("a", Operator::GtEq, Some("1"))));
            assert_eq!(parse_expression("a!=1"), Ok(condition("a", Operator::NotEq, Some("1"))));
            assert_eq!(parse_expression("a<>1"), Ok(condition("a", Operator::NotEq, Some("1"))));
        }

        #[test]
        fn missing_pieces_are_reported() {
            assert_eq!(
                parse_expression("!= 'haha'"),
                Err(ExpressionError::MissingColumn("!= 'haha'".to_owned()))
            );
            assert_eq!(
                parse_expression("a 'haha'"),
                Err(ExpressionError::NoOperator("a 'haha'".to_owned()))
            );
            assert_eq!(parse_expression("a != "), Err(ExpressionError::MissingValue("a !=".to_owned())));
            assert_eq!(parse_expression("   "), Err(ExpressionError::Empty));
        }
    }

    #[cfg(test)]
    mod combinations {
        use super::*;

        #[test]
        fn and_joins_two_conditions() {
            assert_eq!(
                parse_expression("a=1 AND b=2"),
                Ok(Expression::And(
                    Box::new(condition("a", Operator::Eq, Some("1"))),
                    Box::new(condition("b", Operator::Eq, Some("2"))),
                ))
            );
        }

        #[test]
        fn conjunctions_are_case_insensitive() {
            assert_eq!(
                parse_expression("a=1 or b=2"),
                Ok(Expression::Or(
                    Box::new(condition("a", Operator::Eq, Some("1"))),
                    Box::new(condition("b", Operator::Eq, Some("2"))),
                ))
            );
        }

        #[test]
        fn chains_associate_left() {
            assert_eq!(
                parse_expression("a=1 AND b=2 OR c=3"),
                Ok(Expression::Or(
                    Box::new(Expression::And(
                        Box::new(condition("a", Operator::Eq, Some("1"))),
                        Box::new(condition("b", Operator::Eq, Some("2"))),
                    )),
                    Box::new(condition("c", Operator::Eq, Some("3"))),
                ))
            );
        }

        #[test]
        fn brackets_group() {
            assert_eq!(
                parse_expression("(a=1 AND b=2) OR c=3"),
                Ok(Expression::Or(
                    Box::new(Expression::And(
                        Box::new(condition("a", Operator::Eq, Some("1"))),
                        Box::new(condition("b", Operator::Eq, Some("2"))),
                    )),
                    Box::new(condition("c", Operator::Eq, Some("3"))),
                ))
            );
        }

        #[test]
        fn not_inverts_a_primary() {
            assert_eq!(
                parse_expression("NOT a=1"),
                Ok(Expression::Not(Box::new(condition("a", Operator::Eq, Some("1")))))
            );
            assert_eq!(
                parse_expression("not (a=1 OR b=2)"),
                Ok(Expression::Not(Box::new(Expression::Or(
                    Box::new(condition("a", Operator::Eq, Some("1"))),
                    Box::new(condition("b", Operator::Eq, Some("2"))),
                ))))
            );
        }

        #[test]
        fn missing_conjunction_is_reported() {
            assert_eq!(
                parse_expression("a=1 b=2"),
                Err(ExpressionError::ExpectedConjunction("b=2".to_owned()))
            );
        }
    }
}
