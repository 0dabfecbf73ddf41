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

use itertools::Itertools;

/// Splits on the first run of whitespace. Returns the leading word and the
/// trimmed remainder. When the input holds no whitespace the whole input is
/// the word and the remainder is empty.
pub fn first_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(index) => (&s[..index], s[index..].trim()),
        None => (s, ""),
    }
}

/// Splits on the last run of whitespace. Returns the trimmed text before the
/// word and the trailing word itself. When the input holds no whitespace the
/// whole input is the word.
pub fn last_word(s: &str) -> (&str, &str) {
    let s = s.trim_end();
    match s.rfind(char::is_whitespace) {
        Some(index) => (s[..index].trim(), &s[index + 1..]),
        None => ("", s),
    }
}

/// Finds the first string enclosed in brackets. When the input starts with an
/// opening bracket the result holds everything enclosed between it and its
/// matching closing bracket, tracking nesting, and the text after the close.
/// When the input does not start with a bracket, or the brackets are
/// unmatched, the whole input is returned as the rest.
///
/// e.g. "(hello)" = "hello", ""
///      "(hello (world)) (goodbye)" = "hello (world)", " (goodbye)"
///      "hello world" = "", "hello world"
pub fn bracketed_string(s: &str) -> (&str, &str) {
    if !s.starts_with('(') {
        return ("", s);
    }
    let mut depth = 0usize;
    for (index, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (&s[1..index], &s[index + 1..]);
                }
            }
            _ => {}
        }
    }
    ("", s)
}

/// Splits the given string on the separator, treating spans enclosed in
/// quotes as atomic. Quotes may be double or single; whichever appears first
/// in the string decides the quote kind. Quoted spans keep their quotes in
/// the output.
pub fn split_ignore_quoted(s: &str, sep: char) -> Vec<String> {
    let quote = match first_quote(s) {
        Some(q) => q,
        None => return s.split(sep).map(str::to_owned).collect(),
    };
    let mut result: Vec<String> = vec![];
    let mut in_quote = false;
    for segment in s.split(quote) {
        if in_quote {
            // inside the quote, glue the quoted span onto the previous entry
            let last = result.len() - 1;
            result[last] = format!("{}{}{}{}", result[last], quote, segment, quote);
        } else {
            result.extend(segment.split(sep).map(str::to_owned));
        }
        in_quote = !in_quote;
    }
    result
}

/// Strips one layer of surrounding quotes, single or double, when the string
/// both starts and ends with the same quote character.
pub fn unquote(s: &str) -> &str {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '\'' || first == '"') => &s[1..s.len() - 1],
        _ => s,
    }
}

/// Parses a leading bracketed, comma separated list: "(a, b, c) rest" gives
/// the rest and the elements, each trimmed and stripped of one layer of
/// surrounding quotes. Returns `None` when the input does not start with a
/// bracketed list.
pub fn parse_list(s: &str) -> Option<(&str, Vec<String>)> {
    let (rest, raw) = parse_raw_list(s)?;
    Some((rest, raw.iter().map(|e| unquote(e).to_owned()).collect()))
}

/// Same as [`parse_list`] but leaves the elements unquoted for callers that
/// need to tell a bare word from a quoted literal.
pub fn parse_raw_list(s: &str) -> Option<(&str, Vec<String>)> {
    let (inner, rest) = bracketed_string(s.trim_start());
    if inner.is_empty() && rest.len() == s.trim_start().len() {
        return None;
    }
    let elements = split_ignore_quoted(inner, ',')
        .iter()
        .map(|e| e.trim().to_owned())
        .collect();
    Some((rest.trim(), elements))
}

/// De-duplicates by exact equality, preserving first-occurrence order.
pub fn unique_strings<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    items.into_iter().unique().collect()
}

/// Locates a standalone, case-insensitive keyword outside quoted spans and
/// splits around it. Both halves come back trimmed.
pub fn find_keyword<'a>(s: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let mut quote: Option<char> = None;
    for (index, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c == '\'' || c == '"' => quote = Some(c),
            None => {
                let candidate = match s.get(index..index + keyword.len()) {
                    Some(candidate) => candidate,
                    None => continue,
                };
                if candidate.eq_ignore_ascii_case(keyword)
                    && boundary_before(s, index)
                    && boundary_after(s, index + keyword.len())
                {
                    return Some((s[..index].trim(), s[index + keyword.len()..].trim()));
                }
            }
        }
    }
    None
}

fn boundary_before(s: &str, index: usize) -> bool {
    index == 0 || s[..index].ends_with(char::is_whitespace)
}

fn boundary_after(s: &str, index: usize) -> bool {
    index >= s.len() || s[index..].starts_with(char::is_whitespace)
}

fn first_quote(s: &str) -> Option<char> {
    s.chars().find(|c| *c == '\'' || *c == '"')
}
