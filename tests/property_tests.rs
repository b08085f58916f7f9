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

//! Property-based tests for the indent engine.
//!
//! These tests verify invariants that should hold for all inputs, using
//! proptest for random input generation.

use bffindent::lexer::ScanState;
use bffindent::{complete, reindent, IndentConfig, IndentEngine, Position, SourceBuffer};
use proptest::prelude::*;

/// Line fragments resembling real BFF. `@` marks a spot inside a string or
/// comment.
const FRAGMENTS: &[&str] = &[
    ".A = '@'",
    ".B = \"@\"",
    "+ '@'",
    "{",
    "}",
    "[",
    "]",
    "Library( '@' )",
    "Settings",
    ".S = [ .X = '@'",
    ".T = { '@',",
    "'@' }",
    "// @",
    "; @",
    ".C = 1 // @",
    "#if A",
    "#else",
    "#endif",
    "{ // @",
    "Alias( 'x@' ) { .Targets = '@' }",
    "",
];

/// Random BFF-like lines with random leading whitespace.
fn bff_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(("[ \t]{0,6}", prop::sample::select(FRAGMENTS)), 0..40).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(indent, fragment)| format!("{}{}", indent, fragment))
            .collect()
    })
}

fn engine(unit: usize) -> IndentEngine {
    IndentEngine::new(IndentConfig::new(unit).unwrap())
}

fn fill(lines: &[String], marker: &str) -> SourceBuffer {
    SourceBuffer::new(lines.iter().map(|line| line.replace('@', marker)))
}

// ============================================================================
// Idempotence
// ============================================================================

proptest! {
    /// Property: a re-indented buffer is a fixed point of compute_indent.
    #[test]
    fn prop_reindented_buffer_is_fixed_point(lines in bff_lines(), unit in 1usize..9) {
        let engine = engine(unit);
        let mut buffer = fill(&lines, "");
        reindent(&engine, &mut buffer).unwrap();

        for index in 0..buffer.line_count() {
            if buffer.is_blank(index) || buffer.start_state(index) == ScanState::BlockComment {
                continue;
            }
            prop_assert_eq!(
                engine.compute_indent(&buffer, index).unwrap(),
                buffer.indentation(index, 4),
                "line {}", index
            );
        }
    }

    /// Property: re-indenting twice changes nothing the second time.
    #[test]
    fn prop_reindent_twice_changes_nothing(lines in bff_lines()) {
        let engine = IndentEngine::default();
        let mut buffer = fill(&lines, "x");
        reindent(&engine, &mut buffer).unwrap();
        prop_assert_eq!(reindent(&engine, &mut buffer).unwrap(), 0);
    }
}

// ============================================================================
// Nesting
// ============================================================================

proptest! {
    /// Property: after a line opening d scopes, indent grows by d units.
    #[test]
    fn prop_monotonic_under_nesting(
        indent in 0usize..16,
        openers in "[{\\[]{1,5}",
        unit in 1usize..9,
    ) {
        let lines = [format!("{}{}", " ".repeat(indent), openers), "x".to_string()];
        let buffer = SourceBuffer::new(lines);
        let expected = indent + openers.chars().count() * unit;
        prop_assert_eq!(engine(unit).compute_indent(&buffer, 1).unwrap(), expected);
    }

    /// Property: every closer lines up with the line of its opener.
    #[test]
    fn prop_closer_aligns_with_opener_line(
        brackets in prop::collection::vec(prop::bool::ANY, 1..10),
        headed in prop::collection::vec(prop::bool::ANY, 10),
        unit in 1usize..9,
    ) {
        let depth = brackets.len();
        let mut lines = Vec::new();
        for (level, &square) in brackets.iter().enumerate() {
            let opener = if square { "[" } else { "{" };
            if headed[level] {
                lines.push(format!("Settings {}", opener));
            } else {
                lines.push(opener.to_string());
            }
        }
        lines.push(".X = 1".to_string());
        for &square in brackets.iter().rev() {
            lines.push(if square { "]" } else { "}" }.to_string());
        }

        let engine = engine(unit);
        let mut buffer = SourceBuffer::new(lines);
        reindent(&engine, &mut buffer).unwrap();

        for level in 0..depth {
            let closer = 2 * depth - level;
            prop_assert_eq!(buffer.indentation(level, 4), level * unit);
            prop_assert_eq!(buffer.indentation(closer, 4), level * unit);
        }
    }
}

// ============================================================================
// Strings and comments
// ============================================================================

proptest! {
    /// Property: brackets inside strings and comments never change an indent.
    #[test]
    fn prop_strings_and_comments_are_inert(
        lines in bff_lines(),
        brackets in "[{}\\[\\]]{1,4}",
    ) {
        let engine = IndentEngine::default();
        // Same length on both sides so only the bracket characters differ
        let plain = fill(&lines, &"x".repeat(brackets.chars().count()));
        let noisy = fill(&lines, &brackets);

        for index in 0..plain.line_count() {
            prop_assert_eq!(
                engine.compute_indent(&plain, index).unwrap(),
                engine.compute_indent(&noisy, index).unwrap(),
                "line {}", index
            );
        }
    }
}

// ============================================================================
// Continuation chains
// ============================================================================

proptest! {
    /// Property: chain lines share one column and the line after the chain
    /// depends only on the statement that started it.
    #[test]
    fn prop_continuation_chain_is_stable(
        levels in 0usize..4,
        statement in prop::sample::select(vec![
            (".A = 'a'", 0i32, 3usize),
            ("Foo() { .A = 'a'", 1, 11),
            (".B = [ 'a'", 1, 3),
        ]),
        chain_length in 1usize..8,
        unit in 1usize..9,
    ) {
        let (text, delta, equals) = statement;
        let mut lines: Vec<String> = vec!["{".to_string(); levels];
        lines.push(text.to_string());
        lines.extend(std::iter::repeat("+ 'b'".to_string()).take(chain_length));
        lines.push(".Next = 1".to_string());

        let engine = engine(unit);
        let mut buffer = SourceBuffer::new(lines);
        reindent(&engine, &mut buffer).unwrap();

        let base = levels * unit;
        for index in levels + 1..=levels + chain_length {
            prop_assert_eq!(buffer.indentation(index, 4), base + equals);
        }
        let after = levels + chain_length + 1;
        let expected = (base as i64 + i64::from(delta) * unit as i64) as usize;
        prop_assert_eq!(buffer.indentation(after, 4), expected);
    }
}

// ============================================================================
// Robustness
// ============================================================================

proptest! {
    /// Property: no input makes an in-range query fail or panic.
    #[test]
    fn prop_compute_indent_never_fails(source in "(?s).{0,300}", unit in 1usize..9) {
        let engine = engine(unit);
        let buffer = SourceBuffer::from_text(&source);
        for index in 0..buffer.line_count() {
            prop_assert!(engine.compute_indent(&buffer, index).is_ok());
        }
    }

    /// Property: completion works at every cursor position.
    #[test]
    fn prop_complete_never_fails(source in "[a-zA-Z.#$'\"/;*{}()\\[\\] \n]{0,120}") {
        let buffer = SourceBuffer::from_text(&source);
        for (index, line) in buffer.lines().enumerate() {
            for column in 0..=line.chars().count() {
                prop_assert!(complete(&buffer, Position::new(index, column)).is_ok());
            }
        }
    }
}
