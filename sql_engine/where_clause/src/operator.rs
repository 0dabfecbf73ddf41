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

/// A condition operator between a column and a literal. `<>` and `!=` are
/// two spellings of the same operator.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

const TOKENS: [(&str, Operator); 8] = [
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    (">=", Operator::GtEq),
    ("<=", Operator::LtEq),
    ("<>", Operator::NotEq),
    ("!=", Operator::NotEq),
    ("LIKE", Operator::Like),
];

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Like => "LIKE",
        };
        f.write_str(token)
    }
}

/// Splits the given string around the first operator found. Ties at the same
/// offset go to the longer token, so `a>=1` is `>=` and never `>`. Both
/// halves come back trimmed. `None` when no operator occurs.
pub fn split_operator(s: &str) -> Option<(&str, Operator, &str)> {
    let mut found: Option<(usize, &str, Operator)> = None;
    for (token, operator) in TOKENS.iter().copied() {
        let index = if token == "LIKE" {
            like_index(s)
        } else {
            s.find(token)
        };
        let index = match index {
            Some(index) => index,
            None => continue,
        };
        let better = match found {
            None => true,
            Some((at, best, _op)) => index < at || (index == at && token.len() > best.len()),
        };
        if better {
            found = Some((index, token, operator));
        }
    }
    found.map(|(index, token, operator)| {
        (s[..index].trim(), operator, s[index + token.len()..].trim())
    })
}

impl Operator {
    /// Compares two optional values under this operator's NULL rules:
    /// `=` treats two NULLs as equal, `!=` as not unequal, the strict
    /// inequalities fail on any NULL, their inclusive forms accept two
    /// NULLs, and LIKE fails on any NULL. Non-null comparisons are
    /// lexicographic on the raw strings.
    pub fn compare(&self, left: Option<&str>, right: Option<&str>) -> bool {
        let both_null = left.is_none() && right.is_none();
        let either_null = left.is_none() || right.is_none();
        match self {
            Operator::Eq => {
                if both_null {
                    true
                } else if either_null {
                    false
                } else {
                    left == right
                }
            }
            Operator::NotEq => {
                if both_null {
                    false
                } else if either_null {
                    true
                } else {
                    left != right
                }
            }
            Operator::Gt => !either_null && left > right,
            Operator::Lt => !either_null && left < right,
            Operator::GtEq => {
                if both_null {
                    true
                } else if either_null {
                    false
                } else {
                    left >= right
                }
            }
            Operator::LtEq => {
                if both_null {
                    true
                } else if either_null {
                    false
                } else {
                    left <= right
                }
            }
            Operator::Like => match (left, right) {
                (Some(value), Some(pattern)) => like_matches(value, pattern),
                _ => false,
            },
        }
    }
}

/// Byte offset of LIKE as a standalone, case-insensitive word.
fn like_index(s: &str) -> Option<usize> {
    for (index, _c) in s.char_indices() {
        let candidate = match s.get(index..index + 4) {
            Some(candidate) => candidate,
            None => continue,
        };
        if candidate.eq_ignore_ascii_case("LIKE")
            && (index == 0 || s[..index].ends_with(char::is_whitespace))
            && (index + 4 == s.len() || s[index + 4..].starts_with(char::is_whitespace))
        {
            return Some(index);
        }
    }
    None
}

/// `%` matches any run of characters, `_` a single one. The pattern covers
/// the whole value, so an empty pattern matches only empty strings.
fn like_matches(value: &str, pattern: &str) -> bool {
    let pattern = format!("^{}$", pattern.replace('%', ".*").replace('_', "."));
    match regex::Regex::new(&pattern) {
        Ok(regex) => regex.is_match(value),
        Err(_) => {
            log::warn!("LIKE pattern {:?} is invalid", pattern);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod splitting {
        use super::*;

        #[test]
        fn splits_around_the_operator() {
            assert_eq!(split_operator("one=1"), Some(("one", Operator::Eq, "1")));
            assert_eq!(split_operator("one != 1"), Some(("one", Operator::NotEq, "1")));
            assert_eq!(split_operator("one<>1"), Some(("one", Operator::NotEq, "1")));
            assert_eq!(split_operator("one LIKE 'ha ha'"), Some(("one", Operator::Like, "'ha ha'")));
        }

        #[test]
        fn prefers_the_longer_token_on_ties() {
            assert_eq!(split_operator("a>=1"), Some(("a", Operator::GtEq, "1")));
            assert_eq!(split_operator("a<=1"), Some(("a", Operator::LtEq, "1")));
            assert_eq!(split_operator("a!=1"), Some(("a", Operator::NotEq, "1")));
        }

        #[test]
        fn missing_column_is_preserved() {
            assert_eq!(split_operator("=1"), Some(("", Operator::Eq, "1")));
        }

        #[test]
        fn no_operator_found() {
            assert_eq!(split_operator("one . 1"), None);
            assert_eq!(split_operator(""), None);
        }
    }

    #[cfg(test)]
    mod null_rules {
        use super::*;

        #[test]
        fn equality() {
            assert!(Operator::Eq.compare(None, None));
            assert!(!Operator::Eq.compare(Some("a"), None));
            assert!(!Operator::Eq.compare(None, Some("a")));
            assert!(Operator::Eq.compare(Some("a"), Some("a")));
            assert!(!Operator::Eq.compare(Some("a"), Some("A")));
        }

        #[test]
        fn inequality() {
            assert!(!Operator::NotEq.compare(None, None));
            assert!(Operator::NotEq.compare(Some("a"), None));
            assert!(Operator::NotEq.compare(None, Some("a")));
            assert!(Operator::NotEq.compare(Some("a"), Some("b")));
            assert!(!Operator::NotEq.compare(Some("a"), Some("a")));
        }

        #[test]
        fn strict_ordering_fails_on_null() {
            assert!(!Operator::Lt.compare(None, None));
            assert!(!Operator::Lt.compare(None, Some("a")));
            assert!(!Operator::Gt.compare(Some("a"), None));
            assert!(Operator::Lt.compare(Some("a"), Some("b")));
            assert!(Operator::Gt.compare(Some("b"), Some("a")));
        }

        #[test]
        fn inclusive_ordering_accepts_two_nulls() {
            assert!(Operator::GtEq.compare(None, None));
            assert!(Operator::LtEq.compare(None, None));
            assert!(!Operator::GtEq.compare(Some("a"), None));
            assert!(!Operator::LtEq.compare(None, Some("a")));
            assert!(Operator::LtEq.compare(Some("a"), Some("a")));
        }

        #[test]
        fn ordering_is_lexicographic() {
            assert!(Operator::Lt.compare(Some("10"), Some("2")));
            assert!(Operator::Gt.compare(Some("b"), Some("a")));
        }
    }

    #[cfg(test)]
    mod like {
        use super::*;

        #[test]
        fn percent_matches_any_run() {
            assert!(Operator::Like.compare(Some("hello"), Some("h%o")));
            assert!(Operator::Like.compare(Some("hippo"), Some("h%o")));
            assert!(!Operator::Like.compare(Some("world"), Some("h%o")));
        }

        #[test]
        fn underscore_matches_one_character() {
            assert!(Operator::Like.compare(Some("hat"), Some("h_t")));
            assert!(!Operator::Like.compare(Some("heat"), Some("h_t")));
        }

        #[test]
        fn empty_pattern_matches_only_empty_strings() {
            assert!(Operator::Like.compare(Some(""), Some("")));
            assert!(!Operator::Like.compare(Some("x"), Some("")));
        }

        #[test]
        fn lone_percent_matches_anything_non_null() {
            assert!(Operator::Like.compare(Some(""), Some("%")));
            assert!(Operator::Like.compare(Some("anything"), Some("%")));
            assert!(!Operator::Like.compare(None, Some("%")));
        }

        #[test]
        fn null_on_either_side_fails() {
            assert!(!Operator::Like.compare(None, None));
            assert!(!Operator::Like.compare(Some("a"), None));
        }
    }
}
