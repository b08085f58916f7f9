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

//! bffindent library
//!
//! Computes the indentation of lines in FASTBuild BFF configuration files
//! and offers context-aware completion candidates.
//!
//! # Modules
//!
//! - [`lexer`] - Per-character classification into code, strings and comments
//! - [`buffer`] - Line buffer with cached lexical state
//! - [`indent`] - The indent decision procedure
//! - [`format`] - Whole-buffer re-indentation and checks
//! - [`diagnostics`] - Mismatch reports
//! - [`completion`] - Completion candidates
//! - [`language`] - Functions, directives and properties of the BFF language
//! - [`config`] - Indent unit and tab width
//! - [`error`] - Error types
//! - [`watcher`] - File watching for the CLI
//!
//! # Example
//!
//! ```
//! use bffindent::{IndentConfig, IndentEngine, SourceBuffer};
//!
//! let buffer = SourceBuffer::from_text("Library( 'Core' )\n{\n.CompilerOptions = '-c'\n}");
//! let engine = IndentEngine::new(IndentConfig::new(4)?);
//!
//! assert_eq!(engine.compute_indent(&buffer, 2)?, 4);
//! assert_eq!(engine.compute_indent(&buffer, 3)?, 0);
//! # Ok::<(), bffindent::IndentError>(())
//! ```

pub mod buffer;
pub mod completion;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod indent;
pub mod language;
pub mod lexer;
pub mod watcher;

// Re-export commonly used types
pub use buffer::{Position, SourceBuffer};
pub use completion::{complete, Completion, CompletionContext};
pub use config::IndentConfig;
pub use error::{ErrorCode, IndentError, Result};
pub use format::{check, reindent, reindent_text, Mismatch};
pub use indent::{compute_indent, IndentEngine, LineShape};

/// The version of bffindent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "bffindent";
