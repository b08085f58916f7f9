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

//! Continuation lines.
//!
//! BFF extends an assignment over several lines by starting each extra line
//! with `+`:
//!
//! ```text
//! .CompilerOptions = '-c'
//!                  + ' -O2'
//!                  + ' -Wall'
//! ```
//!
//! A run of such lines is a chain. Lines inside the chain line up with each
//! other; the first line after the chain goes back to the statement that
//! started it.

use tracing::debug;

use crate::buffer::{visual_column, SourceBuffer};
use crate::lexer::ClassifiedLine;

use super::scope::scope_delta;

/// The marker that starts a continuation line.
pub const CONTINUATION_MARKER: char = '+';

/// The statement a continuation chain extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStart {
    /// The statement line, or `None` if the chain starts the buffer.
    pub line: Option<usize>,
    /// Indentation of the statement line.
    pub base_indent: usize,
    /// Scope delta of the statement line.
    pub scope_delta: i32,
}

/// Check if a line starts with the continuation marker.
pub fn is_continuation(line: &ClassifiedLine) -> bool {
    matches!(line.leading_code_char(), Some((_, CONTINUATION_MARKER)))
}

/// Resolve the statement behind the chain that ends right before line `index`.
///
/// Walks back over the consecutive continuation lines (blank lines are
/// skipped) and reports the first line that is not one. A chain with nothing
/// before it resolves to indent 0 with no scope change.
pub fn resolve_chain_start(buffer: &SourceBuffer, index: usize, tab_width: usize) -> ChainStart {
    let mut current = buffer.previous_non_blank(index);

    while let Some(i) = current {
        let Some(line) = buffer.classify(i) else {
            break;
        };

        if !is_continuation(&line) {
            return ChainStart {
                line: Some(i),
                base_indent: buffer.indentation(i, tab_width),
                scope_delta: scope_delta(&line),
            };
        }

        current = buffer.previous_non_blank(i);
    }

    debug!(line = index, "continuation chain has no statement before it");
    ChainStart {
        line: None,
        base_indent: 0,
        scope_delta: 0,
    }
}

/// Column a new continuation line should align to, based on line `previous`.
///
/// That is the marker of `previous` if it is itself a continuation line,
/// otherwise the first `=` of its assignment. `None` when it has neither.
pub fn continuation_anchor(buffer: &SourceBuffer, previous: usize, tab_width: usize) -> Option<usize> {
    let text = buffer.line(previous)?;
    let line = buffer.classify(previous)?;

    let column = match line.leading_code_char() {
        Some((column, CONTINUATION_MARKER)) => column,
        _ => line.code_chars().find(|(_, c)| *c == '=')?.0,
    };

    Some(visual_column(text, column, tab_width))
}
