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

use crate::commands;
use lexer::first_word;
use query_ast::{Definition, Statement};
use query_executor::SharedDatabase;
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">";

/// The line loop: print the prompt, read one command, dispatch, repeat.
/// Query and command errors go to the error stream and the loop carries on;
/// only I/O failures on the streams themselves end it.
pub struct Repl {
    database: SharedDatabase,
    prompt: String,
}

impl Repl {
    pub fn new(database: SharedDatabase) -> Repl {
        Repl {
            database,
            prompt: PROMPT.to_owned(),
        }
    }

    pub fn run<R: BufRead, W: Write, E: Write>(&mut self, mut input: R, mut out: W, mut err: E) -> io::Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let command = line.trim().to_owned();
            if command.is_empty() {
                continue;
            }
            let (word, rest) = first_word(&command);
            match word.to_uppercase().as_str() {
                "EXIT" | "X" | "QUIT" => return Ok(()),
                "HELP" => writeln!(out, "{}", commands::HELP)?,
                "DUMP" => match commands::dump(rest, &self.database) {
                    Ok((message, prompt)) => {
                        writeln!(out, "{}", message)?;
                        self.prompt = prompt;
                    }
                    Err(error) => writeln!(err, "{}", error)?,
                },
                "RESTORE" => match commands::restore(rest, &self.database) {
                    Ok((message, prompt)) => {
                        writeln!(out, "{}", message)?;
                        self.prompt = prompt;
                    }
                    Err(error) => writeln!(err, "{}", error)?,
                },
                _ => self.statement(&command, &mut out, &mut err)?,
            }
        }
    }

    fn statement<W: Write, E: Write>(&mut self, command: &str, out: &mut W, err: &mut E) -> io::Result<()> {
        match query_parser::parse(command) {
            Ok(Statement::Query(query)) => {
                if let Err(error) = commands::query(query, &self.database, out) {
                    writeln!(err, "{}", error)?;
                }
            }
            Ok(Statement::Definition(definition)) => {
                let dropping_database = matches!(definition, Definition::DropDatabase { .. });
                match commands::definition(definition, &self.database, out) {
                    Ok(()) => {
                        if dropping_database && self.database.read().unwrap().is_empty() {
                            self.prompt = PROMPT.to_owned();
                        }
                    }
                    Err(error) => writeln!(err, "{}", error)?,
                }
            }
            Err(error) => writeln!(err, "{}", error)?,
        }
        Ok(())
    }
}
