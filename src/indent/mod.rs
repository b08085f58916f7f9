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

//! Indent inference for BFF source.
//!
//! The engine looks at the line being indented and the nearest non-blank
//! line above it, sorts the line into one [`LineShape`], and derives the
//! indent from that shape. It never parses the file; every structural
//! lookup that fails falls back to a safe default instead of an error.
//!
//! Shapes are tried in this order, the first match wins:
//!
//! 1. nothing but blank lines above: column 0
//! 2. the line starts with `+`: align with the chain or the `=` above
//! 3. the line starts with `}` or `]`: align with the matching opener
//! 4. the line starts with `#else` or `#endif`: one level left of where the
//!    previous line would put it
//! 5. the previous line continues a chain: back to the chain's statement
//! 6. the previous line starts with a closer: the opener's line indent
//! 7. the previous line ends a block opened on an earlier line: the
//!    opener's line indent
//! 8. the previous line leaves a bracket open with content after it:
//!    align with that content
//! 9. otherwise: the previous indent plus its scope delta in levels

pub mod brackets;
pub mod continuation;
pub mod scope;

pub use brackets::{
    find_matching_opener, find_opener, find_opener_column, scan_unmatched_opener, Bracket,
};
pub use continuation::{continuation_anchor, is_continuation, resolve_chain_start, ChainStart};
pub use scope::{leading_directive, scope_delta};

use tracing::{debug, trace};

use crate::buffer::{visual_column, Position, SourceBuffer};
use crate::config::IndentConfig;
use crate::error::{IndentError, Result};
use crate::lexer::ClassifiedLine;

use brackets::content_after;

/// How a line relates to its surroundings, for indent purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// Only blank lines, if anything, come before the line.
    BufferStart,
    /// The line starts with the continuation marker.
    Continuation { previous: usize },
    /// The line starts with `}` or `]`.
    ///
    /// It takes the opener line's indent, or the opener's own column when
    /// content follows the opener on its line.
    Closer { opener: Option<Position> },
    /// The line starts with `#else` or `#endif`.
    BranchEnd { previous: usize },
    /// The previous non-blank line ends a continuation chain.
    AfterChain { chain: ChainStart },
    /// The previous non-blank line starts with `}` or `]`.
    AfterLeadingCloser { opener: Option<Position> },
    /// The previous non-blank line ends with a closer whose opener sits on
    /// an earlier line.
    AfterTrailingCloser { opener: Position },
    /// The previous non-blank line leaves a bracket open with content after it.
    AlignedContent { column: usize },
    /// None of the above.
    Nested { previous: usize },
}

/// Computes indents for lines of a [`SourceBuffer`].
///
/// The engine holds nothing but its configuration, so one instance can
/// answer queries for any number of buffers, from any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentEngine {
    config: IndentConfig,
}

impl IndentEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: IndentConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> IndentConfig {
        self.config
    }

    /// Compute the indent, in columns, for line `index` of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns `E010` if `index` is past the end of the buffer.
    pub fn compute_indent(&self, buffer: &SourceBuffer, index: usize) -> Result<usize> {
        let shape = self.classify(buffer, index)?;
        let indent = self.indent_for(buffer, shape);
        trace!(line = index, ?shape, indent, "computed indent");
        Ok(indent)
    }

    /// Sort line `index` into its [`LineShape`].
    ///
    /// # Errors
    ///
    /// Returns `E010` if `index` is past the end of the buffer.
    pub fn classify(&self, buffer: &SourceBuffer, index: usize) -> Result<LineShape> {
        let line = buffer
            .classify(index)
            .ok_or_else(|| IndentError::line_out_of_range(index, buffer.line_count()))?;

        let Some(previous) = buffer.previous_non_blank(index) else {
            return Ok(LineShape::BufferStart);
        };

        let shape = match line.leading_code_char() {
            Some((_, continuation::CONTINUATION_MARKER)) => LineShape::Continuation { previous },
            Some((column, c)) if Bracket::from_closer(c).is_some_and(Bracket::is_nesting) => {
                let opener = find_matching_opener(buffer, Position::new(index, column));
                if opener.is_none() {
                    debug!(line = index, "unmatched closing bracket");
                }
                LineShape::Closer { opener }
            }
            _ if leading_directive(&line).is_some_and(|d| d.closes_branch()) => {
                LineShape::BranchEnd { previous }
            }
            _ => self.follow_shape(buffer, previous),
        };

        Ok(shape)
    }

    /// Shape of an ordinary line placed right after line `previous`.
    fn follow_shape(&self, buffer: &SourceBuffer, previous: usize) -> LineShape {
        let tab_width = self.config.tab_width();
        let Some(line) = buffer.classify(previous) else {
            return LineShape::Nested { previous };
        };

        if is_continuation(&line) {
            return LineShape::AfterChain {
                chain: resolve_chain_start(buffer, previous + 1, tab_width),
            };
        }

        if leads_with_closer(&line) {
            let opener = find_opener(buffer, previous);
            if opener.is_none() {
                debug!(line = previous, "unmatched closing bracket");
            }
            return LineShape::AfterLeadingCloser { opener };
        }

        if let Some(opener) = trailing_closer_opener(buffer, &line, previous) {
            return LineShape::AfterTrailingCloser { opener };
        }

        if let Some(column) = find_opener_column(buffer, previous, tab_width) {
            return LineShape::AlignedContent { column };
        }

        LineShape::Nested { previous }
    }

    /// Turn a shape into a column.
    fn indent_for(&self, buffer: &SourceBuffer, shape: LineShape) -> usize {
        let tab_width = self.config.tab_width();
        let unit = self.config.indent_unit();

        match shape {
            LineShape::BufferStart => 0,
            LineShape::Continuation { previous } => {
                continuation_anchor(buffer, previous, tab_width)
                    .unwrap_or_else(|| buffer.indentation(previous, tab_width))
            }
            LineShape::Closer { opener } => opener.map_or(0, |p| self.closer_column(buffer, p)),
            LineShape::BranchEnd { previous } => {
                let next = self.indent_for(buffer, self.follow_shape(buffer, previous));
                next.saturating_sub(unit)
            }
            LineShape::AfterChain { chain } => {
                offset(chain.base_indent, chain.scope_delta, unit)
            }
            LineShape::AfterLeadingCloser { opener } => {
                opener.map_or(0, |p| buffer.indentation(p.line, tab_width))
            }
            LineShape::AfterTrailingCloser { opener } => buffer.indentation(opener.line, tab_width),
            LineShape::AlignedContent { column } => column,
            LineShape::Nested { previous } => {
                let delta = buffer.classify(previous).map_or(0, |line| scope_delta(&line));
                offset(buffer.indentation(previous, tab_width), delta, unit)
            }
        }
    }

    /// Column for a closer whose opener is at `opener`.
    ///
    /// An opener followed by content on its own line is an aligned block, so
    /// the closer lines up with the bracket itself. Otherwise the closer
    /// lines up with the opener line's indent.
    fn closer_column(&self, buffer: &SourceBuffer, opener: Position) -> usize {
        let tab_width = self.config.tab_width();
        let aligned = buffer
            .classify(opener.line)
            .and_then(|line| content_after(&line, opener.column))
            .is_some();

        match buffer.line(opener.line) {
            Some(text) if aligned => visual_column(text, opener.column, tab_width),
            _ => buffer.indentation(opener.line, tab_width),
        }
    }
}

fn leads_with_closer(line: &ClassifiedLine) -> bool {
    line.leading_code_char()
        .is_some_and(|(_, c)| Bracket::from_closer(c).is_some_and(Bracket::is_nesting))
}

/// Opener of the closer ending line `index`, if it lies on an earlier line.
fn trailing_closer_opener(
    buffer: &SourceBuffer,
    line: &ClassifiedLine,
    index: usize,
) -> Option<Position> {
    let (column, c) = line.trailing_code_char()?;
    if !Bracket::from_closer(c).is_some_and(Bracket::is_nesting) {
        return None;
    }

    find_matching_opener(buffer, Position::new(index, column)).filter(|p| p.line < index)
}

/// `base` moved by `levels` indent units, clamped at 0.
fn offset(base: usize, levels: i32, unit: usize) -> usize {
    let moved = base as i64 + i64::from(levels) * unit as i64;
    usize::try_from(moved.max(0)).unwrap_or(0)
}

/// Compute the indent for line `index` of `lines` with a given indent unit.
///
/// Convenience entry point building a one-off buffer and engine.
///
/// # Errors
///
/// Returns `E001` for an indent unit of 0 and `E010` for a line past the end.
///
/// # Example
///
/// ```
/// let lines = ["Library('x')", "{", ".Compiler = 'x'", "}"];
/// assert_eq!(bffindent::compute_indent(&lines, 2, 4).unwrap(), 4);
/// assert_eq!(bffindent::compute_indent(&lines, 3, 4).unwrap(), 0);
/// ```
pub fn compute_indent<S: AsRef<str>>(lines: &[S], index: usize, indent_unit: usize) -> Result<usize> {
    let engine = IndentEngine::new(IndentConfig::new(indent_unit)?);
    let buffer = SourceBuffer::new(lines.iter().map(|line| line.as_ref()));
    engine.compute_indent(&buffer, index)
}
