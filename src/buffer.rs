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

//! Line-oriented source buffer.
//!
//! A [`SourceBuffer`] is a snapshot of the text being indented. Alongside the
//! lines it keeps the lexical state each line starts in, so classifying any
//! single line never needs a rescan from the top of the buffer.

use crate::lexer::{classify_line, line_start_states, ClassifiedLine, ScanState};

/// A position in a [`SourceBuffer`].
///
/// Both fields are 0-indexed; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// An immutable-per-query sequence of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    lines: Vec<String>,
    start_states: Vec<ScanState>,
}

impl SourceBuffer {
    /// Create a buffer from individual lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let start_states = line_start_states(lines.iter().map(String::as_str));
        Self {
            lines,
            start_states,
        }
    }

    /// Split text into lines on `\n`, dropping a trailing `\r` from each.
    ///
    /// A trailing newline produces a final empty line, so
    /// [`to_text`](Self::to_text) restores the input exactly for `\n` text.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line)),
        )
    }

    /// Join the lines back together with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the buffer has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line's text.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lexical state at the start of a line.
    pub fn start_state(&self, index: usize) -> ScanState {
        self.start_states.get(index).copied().unwrap_or_default()
    }

    /// Classify a line, or return `None` past the end of the buffer.
    pub fn classify(&self, index: usize) -> Option<ClassifiedLine> {
        let line = self.line(index)?;
        Some(classify_line(line, self.start_state(index)).0)
    }

    /// Check if a line is empty or whitespace only.
    ///
    /// Lines past the end of the buffer count as blank.
    pub fn is_blank(&self, index: usize) -> bool {
        self.line(index).map_or(true, is_blank)
    }

    /// Nearest non-blank line before `index`.
    pub fn previous_non_blank(&self, index: usize) -> Option<usize> {
        (0..index.min(self.lines.len()))
            .rev()
            .find(|&i| !self.is_blank(i))
    }

    /// Visual width of a line's leading whitespace.
    pub fn indentation(&self, index: usize, tab_width: usize) -> usize {
        self.line(index)
            .map_or(0, |line| indentation_width(line, tab_width))
    }

    /// Replace a line's leading whitespace with `width` spaces.
    ///
    /// Blank lines are emptied instead. Leading whitespace never changes the
    /// lexical state a line ends in, so the cached start states stay valid.
    pub fn set_indentation(&mut self, index: usize, width: usize) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        let content = line.trim_start();
        *line = if content.is_empty() {
            String::new()
        } else {
            format!("{}{}", " ".repeat(width), content)
        };
    }
}

/// Check if a line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Visual width of a line's leading whitespace.
///
/// A tab advances to the next multiple of `tab_width`.
pub fn indentation_width(line: &str, tab_width: usize) -> usize {
    let leading = line.chars().take_while(|c| c.is_whitespace()).count();
    visual_column(line, leading, tab_width)
}

/// Visual column of the character at `column`.
pub fn visual_column(line: &str, column: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    line.chars().take(column).fold(0, |width, c| {
        if c == '\t' {
            (width / tab_width + 1) * tab_width
        } else {
            width + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_round_trip() {
        let text = "a\n  b\n\nc\n";
        let buffer = SourceBuffer::from_text(text);
        assert_eq!(buffer.line_count(), 5);
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_from_text_strips_carriage_returns() {
        let buffer = SourceBuffer::from_text("a\r\nb");
        assert_eq!(buffer.line(0), Some("a"));
        assert_eq!(buffer.line(1), Some("b"));
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let buffer = SourceBuffer::from_text("");
        assert_eq!(buffer.line_count(), 1);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_previous_non_blank() {
        let buffer = SourceBuffer::new(["a", "", "   ", "b", "c"]);
        assert_eq!(buffer.previous_non_blank(3), Some(0));
        assert_eq!(buffer.previous_non_blank(4), Some(3));
        assert_eq!(buffer.previous_non_blank(0), None);
        assert_eq!(buffer.previous_non_blank(99), Some(4));
    }

    #[test]
    fn test_indentation_width() {
        assert_eq!(indentation_width("    x", 4), 4);
        assert_eq!(indentation_width("\tx", 4), 4);
        assert_eq!(indentation_width("  \tx", 4), 4);
        assert_eq!(indentation_width("\t  x", 8), 10);
        assert_eq!(indentation_width("x", 4), 0);
        assert_eq!(indentation_width("   ", 4), 3);
    }

    #[test]
    fn test_visual_column() {
        assert_eq!(visual_column(".A = 1", 3, 4), 3);
        assert_eq!(visual_column("\t.A = 1", 4, 4), 7);
    }

    #[test]
    fn test_start_states_are_cached() {
        let buffer = SourceBuffer::new(["/* open", "{", "*/"]);
        assert_eq!(buffer.start_state(1), ScanState::BlockComment);
        let line = buffer.classify(1).unwrap();
        assert_eq!(line.leading_code_char(), None);
    }

    #[test]
    fn test_set_indentation() {
        let mut buffer = SourceBuffer::new(["\t.A = 1", "   "]);
        buffer.set_indentation(0, 2);
        buffer.set_indentation(1, 8);
        buffer.set_indentation(5, 8);
        assert_eq!(buffer.line(0), Some("  .A = 1"));
        assert_eq!(buffer.line(1), Some(""));
    }
}
