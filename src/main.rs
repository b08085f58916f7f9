// bffindent - Indentation inference and completion for FASTBuild BFF files
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! bffindent CLI
//!
//! Re-indents, checks and completes FASTBuild BFF files.

use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bffindent::config::{DEFAULT_INDENT_UNIT, DEFAULT_TAB_WIDTH};
use bffindent::diagnostics::{render_mismatches, summary_line};
use bffindent::error::ErrorCategory;
use bffindent::watcher::SourceWatcher;
use bffindent::{
    check, complete, reindent, IndentConfig, IndentEngine, IndentError, Position, SourceBuffer,
};

/// Exit code when mismatches were found.
const EXIT_MISMATCH: u8 = 1;
/// Exit code for invalid configuration or queries.
const EXIT_USAGE: u8 = 2;
/// Exit code for file system errors.
const EXIT_IO: u8 = 3;

/// bffindent - indentation for FASTBuild BFF files
#[derive(Parser, Debug)]
#[command(name = "bffindent")]
#[command(version)]
#[command(about = "Indentation inference and completion for FASTBuild BFF files")]
#[command(long_about = r#"
bffindent computes the indentation of lines in FASTBuild BFF files
(fbuild.bff and friends) and offers completion candidates for
functions, properties and directives.

Example usage:
  bffindent indent fbuild.bff
  bffindent indent fbuild.bff --write
  bffindent check fbuild.bff common.bff
  bffindent check fbuild.bff --watch
  bffindent line fbuild.bff 12
  bffindent complete fbuild.bff 12 9
"#)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Columns per indentation level
    #[arg(long, global = true, env = "BFFINDENT_INDENT_UNIT", default_value_t = DEFAULT_INDENT_UNIT)]
    indent_unit: usize,

    /// Columns a tab advances to in existing indentation
    #[arg(long, global = true, env = "BFFINDENT_TAB_WIDTH", default_value_t = DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-indent a file and print the result
    Indent {
        file: PathBuf,

        /// Rewrite the file in place instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Report lines whose indentation differs from the computed one
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Re-check whenever a file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the computed indent of one line
    Line {
        file: PathBuf,

        /// 1-based line number
        line: NonZeroUsize,
    },

    /// Print completion candidates at a cursor position
    Complete {
        file: PathBuf,

        /// 1-based line number
        line: NonZeroUsize,

        /// 1-based cursor column, in characters
        column: NonZeroUsize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = match IndentConfig::new(cli.indent_unit)
        .and_then(|config| config.with_tab_width(cli.tab_width))
    {
        Ok(config) => IndentEngine::new(config),
        Err(e) => return report_error(&e),
    };

    match cli.command {
        Command::Indent { file, write } => run_indent(&engine, &file, write),
        Command::Check { files, watch } => {
            let code = run_check(&engine, &files);
            if watch {
                run_watch_loop(&engine, &files)
            } else {
                code
            }
        }
        Command::Line { file, line } => run_line(&engine, &file, line.get() - 1),
        Command::Complete { file, line, column } => {
            run_complete(&file, Position::new(line.get() - 1, column.get() - 1))
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bffindent={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(error: &IndentError) -> ExitCode {
    eprintln!("error[{}]: {}", error.code_str(), error.message);
    if let Some(hint) = &error.hint {
        eprintln!("  = hint: {}", hint);
    }

    match error.category() {
        ErrorCategory::Configuration | ErrorCategory::OutOfRange => ExitCode::from(EXIT_USAGE),
    }
}

fn read_buffer(path: &Path) -> Result<(String, SourceBuffer), ExitCode> {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            debug!(path = %path.display(), "read file");
            let buffer = SourceBuffer::from_text(&source);
            Ok((source, buffer))
        }
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", path.display(), e);
            Err(ExitCode::from(EXIT_IO))
        }
    }
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

fn run_indent(engine: &IndentEngine, path: &Path, write: bool) -> ExitCode {
    let (_, mut buffer) = match read_buffer(path) {
        Ok(read) => read,
        Err(code) => return code,
    };

    let changed = match reindent(engine, &mut buffer) {
        Ok(changed) => changed,
        Err(e) => return report_error(&e),
    };

    if !write {
        print!("{}", buffer.to_text());
        return ExitCode::SUCCESS;
    }

    if changed > 0 {
        if let Err(e) = std::fs::write(path, buffer.to_text()) {
            eprintln!("Error: Cannot write {}: {}", path.display(), e);
            return ExitCode::from(EXIT_IO);
        }
    }

    println!("Re-indented {} line(s) in {}", changed, path.display());
    ExitCode::SUCCESS
}

/// Check every file. I/O failures win over mismatches.
fn run_check(engine: &IndentEngine, paths: &[PathBuf]) -> ExitCode {
    let color = std::io::stderr().is_terminal();
    let mut io_failed = false;
    let mut mismatched = false;

    for path in paths {
        let (source, buffer) = match read_buffer(path) {
            Ok(read) => read,
            Err(_) => {
                io_failed = true;
                continue;
            }
        };

        let mismatches = match check(engine, &buffer) {
            Ok(mismatches) => mismatches,
            Err(e) => return report_error(&e),
        };

        let name = display_name(path);
        if mismatches.is_empty() {
            println!("{}: ok", name);
            continue;
        }

        mismatched = true;
        for mismatch in &mismatches {
            println!("{}", summary_line(&name, mismatch));
        }
        if let Err(e) = render_mismatches(std::io::stderr(), &name, &source, &mismatches, color) {
            eprintln!("Error: Cannot write diagnostics: {}", e);
        }
    }

    if io_failed {
        ExitCode::from(EXIT_IO)
    } else if mismatched {
        ExitCode::from(EXIT_MISMATCH)
    } else {
        ExitCode::SUCCESS
    }
}

/// Re-check changed files until interrupted.
fn run_watch_loop(engine: &IndentEngine, paths: &[PathBuf]) -> ExitCode {
    let watcher = match SourceWatcher::new(paths) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_IO);
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        let changed = match watcher.wait_for_change() {
            Ok(changed) => changed,
            Err(e) if e.is_fatal() => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_IO);
            }
            Err(e) => {
                eprintln!("Watch error: {}", e);
                continue;
            }
        };

        info!(files = changed.len(), "re-checking");
        println!();
        run_check(engine, &changed);
        println!("Watching for changes...");
    }
}

fn run_line(engine: &IndentEngine, path: &Path, index: usize) -> ExitCode {
    let (_, buffer) = match read_buffer(path) {
        Ok(read) => read,
        Err(code) => return code,
    };

    match engine.compute_indent(&buffer, index) {
        Ok(indent) => {
            println!("{}", indent);
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn run_complete(path: &Path, position: Position) -> ExitCode {
    let (_, buffer) = match read_buffer(path) {
        Ok(read) => read,
        Err(code) => return code,
    };

    match complete(&buffer, position) {
        Ok(Some(completion)) => {
            for candidate in completion.candidates {
                println!("{}", candidate);
            }
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}
