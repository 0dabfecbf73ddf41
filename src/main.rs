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

use clap::Parser;
use query_executor::shared;
use simple_logger::SimpleLogger;
use std::io;
use std::path::PathBuf;
use std::process;
use storage::Database;

mod commands;
mod repl;

use repl::Repl;

/// In-memory string-relational database with streaming queries.
#[derive(Parser)]
#[command(name = "rilldb")]
struct Args {
    /// Schema file to load before the prompt comes up
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Database snapshot to restore before the prompt comes up
    #[arg(long)]
    database: Option<PathBuf>,

    /// Snapshot path, same as --database
    path: Option<PathBuf>,

    /// Chatty logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init().expect("cannot install logger");

    let mut database = Database::default();
    if let Some(path) = &args.schema {
        match storage::load_schema(path) {
            Ok(schema) => database.alter_database(&schema),
            Err(error) => {
                log::error!("failed to open schema {}", error);
                process::exit(1);
            }
        }
    }
    if let Some(path) = args.database.as_ref().or_else(|| args.path.as_ref()) {
        if let Err(error) = storage::restore(path, &mut database) {
            log::error!("failed to restore database {}", error);
            process::exit(1);
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut repl = Repl::new(shared(database));
    if let Err(error) = repl.run(stdin.lock(), stdout.lock(), stderr.lock()) {
        log::error!("{}", error);
        process::exit(1);
    }
}
