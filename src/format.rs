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

//! Whole-buffer re-indentation and indentation checks.

use tracing::info;

use crate::buffer::SourceBuffer;
use crate::error::Result;
use crate::indent::IndentEngine;
use crate::lexer::ScanState;

/// A line whose indentation differs from the computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// 0-indexed line number.
    pub line: usize,
    /// Computed indent in columns.
    pub expected: usize,
    /// Existing indent in columns.
    pub actual: usize,
}

/// Re-indent every line of `buffer` in place, top to bottom.
///
/// Each line is indented against the lines above it as already re-indented,
/// so the result is a fixed point of [`IndentEngine::compute_indent`].
/// Blank lines are emptied. Lines that start inside a block comment are
/// left alone.
///
/// Returns the number of lines that changed.
pub fn reindent(engine: &IndentEngine, buffer: &mut SourceBuffer) -> Result<usize> {
    let mut changed = 0;

    for index in 0..buffer.line_count() {
        if buffer.start_state(index) == ScanState::BlockComment {
            continue;
        }

        let before = buffer.line(index).map(str::to_owned);
        let width = if buffer.is_blank(index) {
            0
        } else {
            engine.compute_indent(buffer, index)?
        };
        buffer.set_indentation(index, width);

        if buffer.line(index) != before.as_deref() {
            changed += 1;
        }
    }

    info!(changed, lines = buffer.line_count(), "re-indented buffer");
    Ok(changed)
}

/// Re-indent `text` and return the result.
pub fn reindent_text(engine: &IndentEngine, text: &str) -> Result<String> {
    let mut buffer = SourceBuffer::from_text(text);
    reindent(engine, &mut buffer)?;
    Ok(buffer.to_text())
}

/// Report every non-blank line whose indentation differs from what
/// [`reindent`] would produce.
pub fn check(engine: &IndentEngine, buffer: &SourceBuffer) -> Result<Vec<Mismatch>> {
    let tab_width = engine.config().tab_width();
    let mut fixed = buffer.clone();
    reindent(engine, &mut fixed)?;

    let mismatches = (0..buffer.line_count())
        .filter(|&index| !buffer.is_blank(index))
        .filter_map(|index| {
            let actual = buffer.indentation(index, tab_width);
            let expected = fixed.indentation(index, tab_width);
            (actual != expected).then_some(Mismatch {
                line: index,
                expected,
                actual,
            })
        })
        .collect();

    Ok(mismatches)
}
