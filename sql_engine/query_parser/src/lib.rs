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

use lexer::{find_keyword, first_word, last_word, parse_list, parse_raw_list, split_ignore_quoted, unquote};
use query_ast::{
    Definition, DeleteQuery, InsertSelectQuery, InsertValuesQuery, OrderBy, Query, SelectQuery, Statement,
    UpdateQuery,
};
use std::fmt::{self, Display, Formatter};
use storage::Values;
use where_clause::{parse_expression, Expression, ExpressionError, NULL};

#[derive(Debug, PartialEq, Clone)]
pub enum ParseError {
    UnknownCommand(String),
    MissingFrom(String),
    MissingInto(String),
    MissingTable,
    MissingColumns(String),
    MissingValues(String),
    MissingSet(String),
    InvalidAlias(String),
    DuplicateName(String),
    Arity { columns: usize, values: usize },
    InvalidAssignment(String),
    InvalidOrderBy(String),
    ExpectedWhere(String),
    Where(ExpressionError),
    Empty,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(command) => write!(f, "{:?} is an unknown command", command),
            ParseError::MissingFrom(query) => write!(f, "missing FROM in query {:?}", query),
            ParseError::MissingInto(query) => write!(f, "missing INTO in query {:?}", query),
            ParseError::MissingTable => f.write_str("missing table name"),
            ParseError::MissingColumns(text) => write!(f, "no columns stated in {:?}", text),
            ParseError::MissingValues(text) => {
                write!(f, "invalid INSERT, expected VALUES or SELECT, found {:?}", text)
            }
            ParseError::MissingSet(text) => write!(f, "missing SET in UPDATE, found {:?}", text),
            ParseError::InvalidAlias(entry) => {
                write!(f, "invalid column alias {:?}, expected '<column> AS <name>'", entry)
            }
            ParseError::DuplicateName(name) => write!(f, "duplicate output column name {:?}", name),
            ParseError::Arity { columns, values } => {
                write!(f, "{} columns stated but {} values given", columns, values)
            }
            ParseError::InvalidAssignment(entry) => {
                write!(f, "invalid assignment {:?}, expected '<column>=<value>'", entry)
            }
            ParseError::InvalidOrderBy(text) => write!(f, "no column names found in sort {:?}", text),
            ParseError::ExpectedWhere(word) => write!(f, "unexpected {:?}, expected WHERE", word),
            ParseError::Where(error) => write!(f, "invalid WHERE: {}", error),
            ParseError::Empty => f.write_str("empty query"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ExpressionError> for ParseError {
    fn from(error: ExpressionError) -> ParseError {
        ParseError::Where(error)
    }
}

/// Parses one statement. Keywords are case-insensitive; table and column
/// names are taken verbatim and stay case-sensitive.
pub fn parse(input: &str) -> Result<Statement, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let (command, rest) = first_word(input);
    match command.to_uppercase().as_str() {
        "SELECT" => parse_select(rest).map(|query| Statement::Query(Query::Select(query))),
        "INSERT" => parse_insert(rest).map(Statement::Query),
        "UPDATE" => parse_update(rest).map(Statement::Query),
        "DELETE" => parse_delete(rest).map(Statement::Query),
        "CREATE" => parse_create(rest).map(Statement::Definition),
        "DROP" => parse_drop(rest).map(Statement::Definition),
        "DESCRIBE" | "DESC" => {
            let (table, _rest) = first_word(rest);
            if table.is_empty() {
                return Err(ParseError::MissingTable);
            }
            Ok(Statement::Definition(Definition::Describe {
                table: table.to_owned(),
            }))
        }
        "TABLES" => Ok(Statement::Definition(Definition::Tables)),
        _ => Err(ParseError::UnknownCommand(command.to_owned())),
    }
}

fn parse_select(q: &str) -> Result<SelectQuery, ParseError> {
    // the ORDER BY tail comes off first, then INTO is stripped so the
    // remaining text is plain `columns FROM table [WHERE ...]`
    let (q, order_by) = match find_keyword(q, "ORDER") {
        Some((before, after)) => {
            let (by, rest) = first_word(after);
            if !by.eq_ignore_ascii_case("BY") {
                return Err(ParseError::InvalidOrderBy(after.to_owned()));
            }
            (before, Some(parse_order_by(rest)?))
        }
        None => (q, None),
    };
    let (q, into) = match find_keyword(q, "INTO") {
        Some((before, after)) => {
            let (table, rest) = first_word(after);
            if table.is_empty() {
                return Err(ParseError::MissingTable);
            }
            (format!("{} {}", before, rest), Some(table.to_owned()))
        }
        None => (q.to_owned(), None),
    };
    let (columns_text, after_from) = find_keyword(&q, "FROM").ok_or_else(|| ParseError::MissingFrom(q.clone()))?;
    let (table, rest) = first_word(after_from);
    if table.is_empty() {
        return Err(ParseError::MissingTable);
    }
    let filter = parse_where(rest)?;
    let (columns, names) = parse_column_list(columns_text)?;
    Ok(SelectQuery {
        table: table.to_owned(),
        columns,
        names,
        filter,
        into,
        order_by,
    })
}

/// Each entry is `<column>` or `<column> AS <name>`. Output names must be
/// unique after aliasing. `*` entries are kept as-is and expanded at
/// execute time.
fn parse_column_list(text: &str) -> Result<(Vec<String>, Vec<String>), ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::MissingColumns(text.to_owned()));
    }
    let mut columns = vec![];
    let mut names: Vec<String> = vec![];
    for entry in split_ignore_quoted(text, ',') {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(ParseError::MissingColumns(text.to_owned()));
        }
        let (column, rest) = first_word(entry);
        let name = if rest.is_empty() {
            column.to_owned()
        } else {
            let (as_keyword, alias) = first_word(rest);
            let (alias, trailing) = first_word(alias);
            if !as_keyword.eq_ignore_ascii_case("AS") || alias.is_empty() || !trailing.is_empty() {
                return Err(ParseError::InvalidAlias(entry.to_owned()));
            }
            alias.to_owned()
        };
        if names.contains(&name) {
            return Err(ParseError::DuplicateName(name));
        }
        columns.push(column.to_owned());
        names.push(name);
    }
    Ok((columns, names))
}

fn parse_order_by(text: &str) -> Result<OrderBy, ParseError> {
    let (before, last) = last_word(text);
    let (text, descending) = if last.eq_ignore_ascii_case("DESC") {
        (before, true)
    } else if last.eq_ignore_ascii_case("ASC") {
        (before, false)
    } else {
        (text, false)
    };
    let columns: Vec<String> = text
        .split(',')
        .map(|column| column.trim().to_owned())
        .filter(|column| !column.is_empty())
        .collect();
    if columns.is_empty() {
        return Err(ParseError::InvalidOrderBy(text.to_owned()));
    }
    Ok(OrderBy { columns, descending })
}

fn parse_insert(q: &str) -> Result<Query, ParseError> {
    let (into_keyword, rest) = first_word(q);
    if !into_keyword.eq_ignore_ascii_case("INTO") {
        return Err(ParseError::MissingInto(q.to_owned()));
    }
    let (table, list_text) = split_at_list(rest)?;
    let (after_columns, columns) = parse_list(list_text).ok_or_else(|| ParseError::MissingColumns(list_text.to_owned()))?;
    if columns.iter().any(String::is_empty) {
        return Err(ParseError::MissingColumns(list_text.to_owned()));
    }
    let (keyword, after_keyword) = first_word(after_columns);
    match keyword.to_uppercase().as_str() {
        "VALUES" => {
            let (_rest, literals) =
                parse_raw_list(after_keyword).ok_or_else(|| ParseError::MissingValues(after_keyword.to_owned()))?;
            let values: Vec<Option<String>> = literals.iter().map(|literal| parse_literal(literal)).collect();
            if columns.len() != values.len() {
                return Err(ParseError::Arity {
                    columns: columns.len(),
                    values: values.len(),
                });
            }
            Ok(Query::InsertValues(InsertValuesQuery {
                table,
                columns,
                values,
            }))
        }
        "SELECT" => {
            let select = parse_select(after_keyword)?;
            Ok(Query::InsertSelect(InsertSelectQuery {
                table,
                columns,
                select: Box::new(select),
            }))
        }
        _ => Err(ParseError::MissingValues(keyword.to_owned())),
    }
}

fn parse_update(q: &str) -> Result<Query, ParseError> {
    let (table, rest) = first_word(q);
    if table.is_empty() {
        return Err(ParseError::MissingTable);
    }
    let (set_keyword, rest) = first_word(rest);
    if !set_keyword.eq_ignore_ascii_case("SET") {
        return Err(ParseError::MissingSet(set_keyword.to_owned()));
    }
    let (assignments_text, filter) = match find_keyword(rest, "WHERE") {
        Some((before, after)) => (before, Some(parse_expression(after)?)),
        None => (rest, None),
    };
    let mut values = Values::new();
    for entry in split_ignore_quoted(assignments_text, ',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let equals = entry.find('=').ok_or_else(|| ParseError::InvalidAssignment(entry.to_owned()))?;
        let column = entry[..equals].trim();
        let literal = entry[equals + 1..].trim();
        if column.is_empty() || literal.is_empty() {
            return Err(ParseError::InvalidAssignment(entry.to_owned()));
        }
        values.insert(column.to_owned(), parse_literal(literal));
    }
    if values.is_empty() {
        return Err(ParseError::MissingSet(assignments_text.to_owned()));
    }
    Ok(Query::Update(UpdateQuery {
        table: table.to_owned(),
        values,
        filter,
    }))
}

fn parse_delete(q: &str) -> Result<Query, ParseError> {
    let (from_keyword, rest) = first_word(q);
    if !from_keyword.eq_ignore_ascii_case("FROM") {
        return Err(ParseError::MissingFrom(q.to_owned()));
    }
    let (table, rest) = first_word(rest);
    if table.is_empty() {
        return Err(ParseError::MissingTable);
    }
    let filter = parse_where(rest)?;
    Ok(Query::Delete(DeleteQuery {
        table: table.to_owned(),
        filter,
    }))
}

fn parse_create(q: &str) -> Result<Definition, ParseError> {
    let (kind, rest) = first_word(q);
    match kind.to_uppercase().as_str() {
        "TABLE" => {
            let (name, columns) = table_and_columns(rest)?;
            Ok(Definition::CreateTable { name, columns })
        }
        "COLUMN" | "COL" => {
            let (table, columns) = table_and_columns(rest)?;
            Ok(Definition::CreateColumns { table, columns })
        }
        _ => Err(ParseError::UnknownCommand(format!("CREATE {}", kind))),
    }
}

fn parse_drop(q: &str) -> Result<Definition, ParseError> {
    let (kind, rest) = first_word(q);
    match kind.to_uppercase().as_str() {
        "TABLE" => {
            let (name, _rest) = first_word(rest);
            if name.is_empty() {
                return Err(ParseError::MissingTable);
            }
            Ok(Definition::DropTable { name: name.to_owned() })
        }
        "COLUMN" | "COL" => {
            let (table, columns) = table_and_columns(rest)?;
            Ok(Definition::DropColumns { table, columns })
        }
        "DATABASE" => {
            let tables: Vec<String> = rest
                .split(',')
                .map(|table| table.trim().to_owned())
                .filter(|table| !table.is_empty())
                .collect();
            Ok(Definition::DropDatabase { tables })
        }
        _ => Err(ParseError::UnknownCommand(format!("DROP {}", kind))),
    }
}

fn parse_where(rest: &str) -> Result<Option<Expression>, ParseError> {
    if rest.trim().is_empty() {
        return Ok(None);
    }
    let (keyword, after) = first_word(rest);
    if !keyword.eq_ignore_ascii_case("WHERE") {
        return Err(ParseError::ExpectedWhere(keyword.to_owned()));
    }
    Ok(Some(parse_expression(after)?))
}

/// The bare word NULL is SQL NULL; anything else loses one quote layer.
fn parse_literal(literal: &str) -> Option<String> {
    if literal.eq_ignore_ascii_case(NULL) {
        None
    } else {
        Some(unquote(literal).to_owned())
    }
}

/// Splits `table (a, b, c) ...` into the table name and the text from the
/// opening bracket on. Tolerates a missing space before the bracket.
fn split_at_list(text: &str) -> Result<(String, &str), ParseError> {
    let text = text.trim();
    let bracket = text.find('(').ok_or_else(|| ParseError::MissingColumns(text.to_owned()))?;
    let table = text[..bracket].trim();
    if table.is_empty() {
        return Err(ParseError::MissingTable);
    }
    Ok((table.to_owned(), &text[bracket..]))
}

fn table_and_columns(text: &str) -> Result<(String, Vec<String>), ParseError> {
    let (table, list_text) = split_at_list(text)?;
    let (_rest, columns) = parse_list(list_text).ok_or_else(|| ParseError::MissingColumns(list_text.to_owned()))?;
    if columns.is_empty() || columns.iter().any(String::is_empty) {
        return Err(ParseError::MissingColumns(list_text.to_owned()));
    }
    Ok((table, columns))
}
