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

//! Error types for the indentation engine.
//!
//! Malformed BFF text is never an error: the engine always degrades to a
//! safe indent. Only configuration mistakes and queries outside the buffer
//! are reported to the caller.

use thiserror::Error;

/// Broad class of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The engine was configured with an invalid value.
    Configuration,
    /// A query referenced a position outside the buffer.
    OutOfRange,
}

/// Error codes for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Configuration errors (E001-E009)
    InvalidIndentUnit,
    InvalidTabWidth,

    // Query errors (E010-E019)
    LineOutOfRange,
    ColumnOutOfRange,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidIndentUnit => "E001",
            ErrorCode::InvalidTabWidth => "E002",
            ErrorCode::LineOutOfRange => "E010",
            ErrorCode::ColumnOutOfRange => "E011",
        }
    }

    /// Get the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidIndentUnit | ErrorCode::InvalidTabWidth => {
                ErrorCategory::Configuration
            }
            ErrorCode::LineOutOfRange | ErrorCode::ColumnOutOfRange => ErrorCategory::OutOfRange,
        }
    }
}

/// An engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct IndentError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl IndentError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Error for a line index past the end of the buffer.
    pub fn line_out_of_range(line: usize, line_count: usize) -> Self {
        Self::new(
            ErrorCode::LineOutOfRange,
            format!(
                "Line {} is out of range (buffer has {} lines)",
                line, line_count
            ),
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, IndentError>;
