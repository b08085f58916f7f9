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

//! Bracket matching.
//!
//! All lookups here are built on one primitive, [`scan_unmatched_opener`]:
//! a balanced backward scan over code characters that counts only one
//! bracket kind. Brackets inside strings and comments never count.

use std::ops::ControlFlow;

use crate::buffer::{visual_column, Position, SourceBuffer};
use crate::lexer::{ClassifiedLine, CodeCharsRev, LexicalKind};

/// A kind of bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `{` `}`
    Brace,
    /// `[` `]`
    Square,
    /// `(` `)`
    Paren,
}

impl Bracket {
    /// The opening character.
    pub fn opener(self) -> char {
        match self {
            Bracket::Brace => '{',
            Bracket::Square => '[',
            Bracket::Paren => '(',
        }
    }

    /// The closing character.
    pub fn closer(self) -> char {
        match self {
            Bracket::Brace => '}',
            Bracket::Square => ']',
            Bracket::Paren => ')',
        }
    }

    pub fn from_opener(c: char) -> Option<Self> {
        match c {
            '{' => Some(Bracket::Brace),
            '[' => Some(Bracket::Square),
            '(' => Some(Bracket::Paren),
            _ => None,
        }
    }

    pub fn from_closer(c: char) -> Option<Self> {
        match c {
            '}' => Some(Bracket::Brace),
            ']' => Some(Bracket::Square),
            ')' => Some(Bracket::Paren),
            _ => None,
        }
    }

    /// Whether this pair affects indentation. Parentheses do not.
    pub fn is_nesting(self) -> bool {
        !matches!(self, Bracket::Paren)
    }
}

/// Scan backward from `before` for an unmatched `bracket` opener.
///
/// Starts at depth 1 as if a closer sat at `before`. A closer of the same
/// kind deepens the search, an opener of the same kind makes it shallower.
/// When the depth reaches 0, `on_opener` decides: `Break` ends the scan with
/// its value, `Continue` keeps searching for the next enclosing opener.
///
/// Returns `None` once the start of the buffer is reached.
pub fn scan_unmatched_opener<T, F>(
    buffer: &SourceBuffer,
    before: Position,
    bracket: Bracket,
    mut on_opener: F,
) -> Option<T>
where
    F: FnMut(Position) -> ControlFlow<T>,
{
    let mut depth = 1usize;

    for (position, c) in CodeCharsRev::before(buffer, before) {
        if c == bracket.closer() {
            depth += 1;
        } else if c == bracket.opener() {
            depth -= 1;
            if depth == 0 {
                match on_opener(position) {
                    ControlFlow::Break(found) => return Some(found),
                    ControlFlow::Continue(()) => depth = 1,
                }
            }
        }
    }

    None
}

/// Find the opener matching the closing bracket at `closer`.
///
/// Returns `None` if `closer` is not a closing bracket or is unmatched.
pub fn find_matching_opener(buffer: &SourceBuffer, closer: Position) -> Option<Position> {
    let line = buffer.classify(closer.line)?;
    let (c, kind) = line.get(closer.column)?;
    if !kind.is_code() {
        return None;
    }

    let bracket = Bracket::from_closer(c)?;
    scan_unmatched_opener(buffer, closer, bracket, ControlFlow::Break)
}

/// Find the opener matching the `}` or `]` that line `index` starts with.
///
/// Returns `None` if the line does not start with such a closer or the
/// closer is unmatched.
pub fn find_opener(buffer: &SourceBuffer, index: usize) -> Option<Position> {
    let line = buffer.classify(index)?;
    let (column, c) = line.leading_code_char()?;
    if !Bracket::from_closer(c).is_some_and(Bracket::is_nesting) {
        return None;
    }

    find_matching_opener(buffer, Position::new(index, column))
}

/// Visual column of the content following the innermost bracket line `index`
/// leaves open.
///
/// For `.S = [ .A = 1` this is the column of `.A`. Returns `None` when every
/// bracket on the line is closed on the same line, or when nothing but
/// whitespace or a comment follows the open bracket.
pub fn find_opener_column(buffer: &SourceBuffer, index: usize, tab_width: usize) -> Option<usize> {
    let text = buffer.line(index)?;
    let line = buffer.classify(index)?;

    let mut open: Vec<(Bracket, usize)> = Vec::new();
    for (column, c) in line.code_chars() {
        if let Some(bracket) = Bracket::from_opener(c).filter(|b| b.is_nesting()) {
            open.push((bracket, column));
        } else if let Some(bracket) = Bracket::from_closer(c).filter(|b| b.is_nesting()) {
            if open.last().is_some_and(|(top, _)| *top == bracket) {
                open.pop();
            }
        }
    }

    let (_, column) = open.last()?;
    content_after(&line, *column).map(|content| visual_column(text, content, tab_width))
}

/// Column of the first non-whitespace character after `column` on the same
/// line, unless that character starts a comment.
pub fn content_after(line: &ClassifiedLine, column: usize) -> Option<usize> {
    (column + 1..line.len())
        .filter_map(|i| line.get(i).map(|(c, kind)| (i, c, kind)))
        .find(|(_, c, _)| !c.is_whitespace())
        .filter(|(_, _, kind)| {
            !matches!(kind, LexicalKind::LineComment | LexicalKind::BlockComment)
        })
        .map(|(i, _, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> SourceBuffer {
        SourceBuffer::from_text(text)
    }

    #[test]
    fn test_bracket_pairs() {
        for bracket in [Bracket::Brace, Bracket::Square, Bracket::Paren] {
            assert_eq!(Bracket::from_opener(bracket.opener()), Some(bracket));
            assert_eq!(Bracket::from_closer(bracket.closer()), Some(bracket));
        }
        assert_eq!(Bracket::from_opener('}'), None);
        assert!(!Bracket::Paren.is_nesting());
    }

    #[test]
    fn test_find_opener_simple() {
        let buf = buffer("Library('x')\n{\n    .A = 1\n}");
        assert_eq!(find_opener(&buf, 3), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_find_opener_nested() {
        let buf = buffer("{\n    [\n        {\n        }\n    ]\n}");
        assert_eq!(find_opener(&buf, 3), Some(Position::new(2, 8)));
        assert_eq!(find_opener(&buf, 4), Some(Position::new(1, 4)));
        assert_eq!(find_opener(&buf, 5), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_find_opener_counts_only_same_kind() {
        // The stray ] does not disturb matching braces
        let buf = buffer("{\n    ]\n}");
        assert_eq!(find_opener(&buf, 2), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_find_opener_skips_strings_and_comments() {
        let buf = buffer("{\n    .A = '}'\n    // }\n    ; {\n}");
        assert_eq!(find_opener(&buf, 4), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_find_opener_same_line_opener() {
        let buf = buffer("Foo() { .A = 1\n}");
        assert_eq!(find_opener(&buf, 1), Some(Position::new(0, 6)));
    }

    #[test]
    fn test_find_opener_unmatched() {
        assert_eq!(find_opener(&buffer("}"), 0), None);
        assert_eq!(find_opener(&buffer("{\n}\n}"), 2), None);
    }

    #[test]
    fn test_find_opener_requires_leading_closer() {
        let buf = buffer("{\n.A = 1 }");
        assert_eq!(find_opener(&buf, 1), None);
        assert_eq!(find_opener(&buf, 7), None);
    }

    #[test]
    fn test_find_matching_opener_mid_line() {
        let buf = buffer("{\n.A = 1 }");
        assert_eq!(
            find_matching_opener(&buf, Position::new(1, 7)),
            Some(Position::new(0, 0))
        );
        assert_eq!(find_matching_opener(&buf, Position::new(1, 0)), None);
    }

    #[test]
    fn test_scan_continue_reaches_outer_opener() {
        let buf = buffer("{\n    [\n        x");
        let mut seen = Vec::new();
        let found: Option<Position> =
            scan_unmatched_opener(&buf, Position::new(2, 9), Bracket::Brace, |p| {
                seen.push(p);
                ControlFlow::Break(p)
            });
        assert_eq!(found, Some(Position::new(0, 0)));

        let none: Option<()> =
            scan_unmatched_opener(&buf, Position::new(2, 9), Bracket::Square, |p| {
                seen.push(p);
                ControlFlow::Continue(())
            });
        assert_eq!(none, None);
        assert_eq!(seen, vec![Position::new(0, 0), Position::new(1, 4)]);
    }

    #[test]
    fn test_opener_column_with_content() {
        let buf = buffer(".S = [ .A = 1");
        assert_eq!(find_opener_column(&buf, 0, 4), Some(7));
    }

    #[test]
    fn test_opener_column_closed_on_same_line() {
        let buf = buffer(".S = [ .A = 1 ]");
        assert_eq!(find_opener_column(&buf, 0, 4), None);
    }

    #[test]
    fn test_opener_column_no_content() {
        assert_eq!(find_opener_column(&buffer("Library('x') {"), 0, 4), None);
        assert_eq!(find_opener_column(&buffer("{   // note"), 0, 4), None);
    }

    #[test]
    fn test_opener_column_innermost() {
        let buf = buffer(".A = { 'a', [ 'b'");
        assert_eq!(find_opener_column(&buf, 0, 4), Some(14));
    }

    #[test]
    fn test_opener_column_string_content() {
        let buf = buffer("\t.L = { 'a',");
        assert_eq!(find_opener_column(&buf, 0, 4), Some(11));
    }
}
