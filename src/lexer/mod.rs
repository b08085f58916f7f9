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

//! Lexical classification of BFF source lines.
//!
//! Every character of a line is tagged as code, string literal, line comment
//! or block comment. It handles:
//! - Single- and double-quoted strings with `^` as the escape character
//! - Line comments starting with `//` or `;`
//! - Non-nesting `/* ... */` block comments, which may span lines
//!
//! Strings end at the end of their line, so the only state carried from one
//! line to the next is whether a block comment is still open.

mod cursor;

pub use cursor::CodeCharsRev;

/// Lexical state at a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Plain code.
    #[default]
    Code,
    /// Inside a `/* */` comment opened on an earlier line.
    BlockComment,
}

/// The lexical class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalKind {
    Code,
    StringLiteral,
    LineComment,
    BlockComment,
}

impl LexicalKind {
    /// Whether characters of this kind take part in bracket counting.
    pub fn is_code(self) -> bool {
        self == LexicalKind::Code
    }
}

/// A maximal run of characters sharing one [`LexicalKind`].
///
/// `start` and `end` are character indices into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalSpan {
    pub kind: LexicalKind,
    pub start: usize,
    pub end: usize,
}

/// A line with the lexical kind of each of its characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    chars: Vec<char>,
    kinds: Vec<LexicalKind>,
    open_at_end: LexicalKind,
}

impl ClassifiedLine {
    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters of the line.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Get the character and its kind at a column.
    pub fn get(&self, column: usize) -> Option<(char, LexicalKind)> {
        Some((*self.chars.get(column)?, *self.kinds.get(column)?))
    }

    /// Kind of the construct still open after the last character.
    ///
    /// `StringLiteral` for an unterminated string, `LineComment` when the line
    /// ends inside a comment, `Code` otherwise.
    pub fn open_at_end(&self) -> LexicalKind {
        self.open_at_end
    }

    /// Iterate over `(column, char)` pairs of code characters.
    pub fn code_chars(&self) -> impl DoubleEndedIterator<Item = (usize, char)> + '_ {
        self.chars
            .iter()
            .zip(&self.kinds)
            .enumerate()
            .filter(|(_, (_, kind))| kind.is_code())
            .map(|(column, (c, _))| (column, *c))
    }

    /// Column and kind of the first non-whitespace character.
    pub fn first_non_whitespace(&self) -> Option<(usize, char, LexicalKind)> {
        self.chars
            .iter()
            .zip(&self.kinds)
            .enumerate()
            .find(|(_, (c, _))| !c.is_whitespace())
            .map(|(column, (c, kind))| (column, *c, *kind))
    }

    /// The first non-whitespace character if it is code.
    pub fn leading_code_char(&self) -> Option<(usize, char)> {
        match self.first_non_whitespace() {
            Some((column, c, LexicalKind::Code)) => Some((column, c)),
            _ => None,
        }
    }

    /// The last non-whitespace code character, ignoring trailing comments.
    pub fn trailing_code_char(&self) -> Option<(usize, char)> {
        self.code_chars().rev().find(|(_, c)| !c.is_whitespace())
    }

    /// Coalesce the per-character kinds into spans.
    pub fn spans(&self) -> Vec<LexicalSpan> {
        let mut spans: Vec<LexicalSpan> = Vec::new();
        for (column, kind) in self.kinds.iter().enumerate() {
            match spans.last_mut() {
                Some(span) if span.kind == *kind => span.end = column + 1,
                _ => spans.push(LexicalSpan {
                    kind: *kind,
                    start: column,
                    end: column + 1,
                }),
            }
        }
        spans
    }

    /// Classify only the first `column` characters, keeping the start state.
    ///
    /// Used to ask what is open right before a cursor.
    pub fn prefix(&self, column: usize, start: ScanState) -> ClassifiedLine {
        let text: String = self.chars.iter().take(column).collect();
        classify_line(&text, start).0
    }
}

/// Per-line scanner over a character stream.
struct LineScanner {
    chars: Vec<char>,
    position: usize,
    kinds: Vec<LexicalKind>,
}

impl LineScanner {
    fn new(line: &str) -> Self {
        let chars: Vec<char> = line.chars().collect();
        let kinds = Vec::with_capacity(chars.len());
        Self {
            chars,
            position: 0,
            kinds,
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    /// Consume the current character, tagging it with `kind`.
    fn advance(&mut self, kind: LexicalKind) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        self.kinds.push(kind);
        Some(c)
    }

    /// Consume up to and including the closing `*/`.
    ///
    /// Returns `false` if the line ended first.
    fn scan_block_comment(&mut self) -> bool {
        while let Some(c) = self.advance(LexicalKind::BlockComment) {
            if c == '*' && self.peek() == Some('/') {
                self.advance(LexicalKind::BlockComment);
                return true;
            }
        }
        false
    }

    /// Consume a quoted string starting at the opening quote.
    ///
    /// Returns `false` if the line ended before the closing quote.
    fn scan_string(&mut self) -> bool {
        let Some(quote) = self.advance(LexicalKind::StringLiteral) else {
            return false;
        };

        while let Some(c) = self.advance(LexicalKind::StringLiteral) {
            if c == '^' {
                // The escaped character belongs to the string, whatever it is
                self.advance(LexicalKind::StringLiteral);
            } else if c == quote {
                return true;
            }
        }
        false
    }

    fn scan_line_comment(&mut self) {
        while self.advance(LexicalKind::LineComment).is_some() {}
    }

    fn finish(self, open_at_end: LexicalKind) -> ClassifiedLine {
        ClassifiedLine {
            chars: self.chars,
            kinds: self.kinds,
            open_at_end,
        }
    }
}

/// Classify one line given the state left by the previous line.
///
/// Returns the classified line and the state to pass to the next line.
pub fn classify_line(line: &str, start: ScanState) -> (ClassifiedLine, ScanState) {
    let mut scanner = LineScanner::new(line);

    if start == ScanState::BlockComment && !scanner.scan_block_comment() {
        return (
            scanner.finish(LexicalKind::BlockComment),
            ScanState::BlockComment,
        );
    }

    while let Some(c) = scanner.peek() {
        match c {
            '"' | '\'' => {
                if !scanner.scan_string() {
                    return (scanner.finish(LexicalKind::StringLiteral), ScanState::Code);
                }
            }
            ';' => {
                scanner.scan_line_comment();
                return (scanner.finish(LexicalKind::LineComment), ScanState::Code);
            }
            '/' if scanner.peek_next() == Some('/') => {
                scanner.scan_line_comment();
                return (scanner.finish(LexicalKind::LineComment), ScanState::Code);
            }
            '/' if scanner.peek_next() == Some('*') => {
                scanner.advance(LexicalKind::BlockComment);
                scanner.advance(LexicalKind::BlockComment);
                if !scanner.scan_block_comment() {
                    return (
                        scanner.finish(LexicalKind::BlockComment),
                        ScanState::BlockComment,
                    );
                }
            }
            _ => {
                scanner.advance(LexicalKind::Code);
            }
        }
    }

    debug_assert!(scanner.is_at_end());
    (scanner.finish(LexicalKind::Code), ScanState::Code)
}

/// Compute the start state of every line in one forward pass.
pub fn line_start_states<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<ScanState> {
    let mut state = ScanState::Code;
    lines
        .into_iter()
        .map(|line| {
            let start = state;
            state = classify_line(line, start).1;
            start
        })
        .collect()
}
