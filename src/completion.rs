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

//! Context-aware completion candidates.
//!
//! The word being typed decides what is offered:
//! - after `.`: properties of the enclosing function
//! - after `#`: directives
//! - after an opening `$`: built-in variables, also inside strings
//! - otherwise: functions and keywords
//!
//! The enclosing function is the name in front of the nearest unmatched `{`
//! (`Library( 'x' ) {` or `Settings {`). Braces that open array literals are
//! skipped over on the way out.

use std::ops::ControlFlow;

use tracing::debug;

use crate::buffer::{Position, SourceBuffer};
use crate::error::{ErrorCode, IndentError, Result};
use crate::indent::{scan_unmatched_opener, Bracket};
use crate::language::{
    all_properties, is_identifier_char, properties_for, BUILTIN_VARIABLES, DIRECTIVES, FUNCTIONS,
    KEYWORDS,
};
use crate::lexer::{ClassifiedLine, CodeCharsRev, LexicalKind};

/// What kind of word is being completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// A property name after `.`.
    Property,
    /// A directive name after `#`.
    Directive,
    /// A variable name after the opening `$` of `$Name$`.
    Variable,
    /// A function name or keyword.
    Word,
}

/// Completion candidates for a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: CompletionContext,
    /// The partial word already typed in front of the cursor.
    pub prefix: String,
    /// The enclosing function, for property completion.
    pub function: Option<String>,
    /// Matching candidates in sorted order.
    pub candidates: Vec<&'static str>,
}

/// Completion candidates at `position`.
///
/// Returns `Ok(None)` when the cursor is inside a comment, or inside a
/// string anywhere but a `$Name$` reference.
///
/// # Errors
///
/// Returns `E010` for a line past the end of the buffer and `E011` for a
/// column past the end of the line.
pub fn complete(buffer: &SourceBuffer, position: Position) -> Result<Option<Completion>> {
    let line = buffer
        .classify(position.line)
        .ok_or_else(|| IndentError::line_out_of_range(position.line, buffer.line_count()))?;

    if position.column > line.len() {
        return Err(IndentError::new(
            ErrorCode::ColumnOutOfRange,
            format!(
                "Column {} is out of range (line {} has {} characters)",
                position.column,
                position.line,
                line.len()
            ),
        ));
    }

    let before = line.prefix(position.column, buffer.start_state(position.line));
    let open = before.open_at_end();

    let chars = line.chars();
    let mut start = position.column;
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }
    let prefix: String = chars[start..position.column].iter().collect();

    let context = match start.checked_sub(1).map(|i| (i, chars[i])) {
        Some((dollar, '$'))
            if matches!(open, LexicalKind::Code | LexicalKind::StringLiteral)
                && opens_variable(&before, dollar) =>
        {
            CompletionContext::Variable
        }
        _ if open != LexicalKind::Code => return Ok(None),
        Some((_, '.')) => CompletionContext::Property,
        Some((_, '#')) => CompletionContext::Directive,
        _ => CompletionContext::Word,
    };

    let function = match context {
        CompletionContext::Property => {
            enclosing_function(buffer, Position::new(position.line, start))
        }
        _ => None,
    };

    let pool = match context {
        CompletionContext::Property => function
            .as_deref()
            .and_then(properties_for)
            .unwrap_or_else(all_properties),
        CompletionContext::Directive => DIRECTIVES.to_vec(),
        CompletionContext::Variable => BUILTIN_VARIABLES.to_vec(),
        CompletionContext::Word => {
            let mut words: Vec<_> = FUNCTIONS.iter().chain(KEYWORDS).copied().collect();
            words.sort_unstable();
            words
        }
    };

    let needle = prefix.to_ascii_lowercase();
    let candidates = pool
        .into_iter()
        .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
        .collect();

    Ok(Some(Completion {
        context,
        prefix,
        function,
        candidates,
    }))
}

/// Whether the `$` at `dollar` opens a `$Name$` reference rather than
/// closing one.
///
/// Counts the unescaped `$` before it within the same string or code run.
fn opens_variable(line: &ClassifiedLine, dollar: usize) -> bool {
    let Some((_, kind)) = line.get(dollar) else {
        return false;
    };
    let escaped = |i: usize| i > 0 && line.get(i - 1).is_some_and(|(c, _)| c == '^');
    if escaped(dollar) {
        return false;
    }

    let mut count = 0;
    let mut i = dollar;
    while i > 0 {
        i -= 1;
        match line.get(i) {
            Some((c, k)) if k == kind => {
                if c == '$' && !escaped(i) {
                    count += 1;
                }
            }
            _ => break,
        }
    }
    count % 2 == 0
}

/// Name of the function whose body encloses `position`.
///
/// Returns `None` at top level.
pub fn enclosing_function(buffer: &SourceBuffer, position: Position) -> Option<String> {
    let function = scan_unmatched_opener(buffer, position, Bracket::Brace, |opener| {
        match function_before(buffer, opener) {
            Some(name) => ControlFlow::Break(name),
            None => ControlFlow::Continue(()),
        }
    });

    if function.is_none() {
        debug!(line = position.line, "no enclosing function");
    }
    function
}

/// The function name heading a body that opens at `brace`.
///
/// Accepts `Name( ... ) {` and `Name {`.
fn function_before(buffer: &SourceBuffer, brace: Position) -> Option<String> {
    let (position, c) = CodeCharsRev::before(buffer, brace).find(|(_, c)| !c.is_whitespace())?;

    let name_end = if c == ')' {
        scan_unmatched_opener(buffer, position, Bracket::Paren, ControlFlow::Break)?
    } else {
        Position::new(position.line, position.column + 1)
    };

    identifier_before(buffer, name_end)
}

/// The identifier ending right before `end`, skipping whitespace first.
///
/// Variable references (`.Name`, `$Name`) are not function names.
fn identifier_before(buffer: &SourceBuffer, end: Position) -> Option<String> {
    let mut chars = CodeCharsRev::before(buffer, end)
        .skip_while(|(_, c)| c.is_whitespace())
        .peekable();

    let (last, _) = *chars.peek()?;
    let mut name = Vec::new();
    let mut expected_column = last.column + 1;

    while let Some(&(position, c)) = chars.peek() {
        let adjacent = position.line == last.line && position.column + 1 == expected_column;
        if !adjacent || !is_identifier_char(c) {
            break;
        }
        name.push(c);
        expected_column = position.column;
        chars.next();
    }

    if let Some((_, '.' | '$')) = chars.peek() {
        return None;
    }

    name.reverse();
    match name.first() {
        Some(c) if c.is_ascii_alphabetic() || *c == '_' => Some(name.into_iter().collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_at(text: &str, line: usize, column: usize) -> Option<Completion> {
        complete(&SourceBuffer::from_text(text), Position::new(line, column)).unwrap()
    }

    #[test]
    fn test_enclosing_function_with_args() {
        let buffer = SourceBuffer::from_text("Library( 'Lib' )\n{\n    .\n}");
        assert_eq!(
            enclosing_function(&buffer, Position::new(2, 4)).as_deref(),
            Some("Library")
        );
    }

    #[test]
    fn test_enclosing_function_without_args() {
        let buffer = SourceBuffer::from_text("Settings {\n    .\n}");
        assert_eq!(
            enclosing_function(&buffer, Position::new(1, 4)).as_deref(),
            Some("Settings")
        );
    }

    #[test]
    fn test_enclosing_function_skips_array_literal() {
        let buffer =
            SourceBuffer::from_text("Exec( 'Gen' )\n{\n    .ExecInput = {\n        .\n    }\n}");
        assert_eq!(
            enclosing_function(&buffer, Position::new(3, 8)).as_deref(),
            Some("Exec")
        );
    }

    #[test]
    fn test_enclosing_function_skips_closed_blocks() {
        let buffer = SourceBuffer::from_text("Alias( 'a' ) { }\nUnity( 'u' )\n{\n    .\n}");
        assert_eq!(
            enclosing_function(&buffer, Position::new(3, 4)).as_deref(),
            Some("Unity")
        );
    }

    #[test]
    fn test_enclosing_function_ignores_braces_in_comments() {
        let buffer = SourceBuffer::from_text("Copy( 'c' ) // }\n{\n    ; {\n    .\n}");
        assert_eq!(
            enclosing_function(&buffer, Position::new(3, 4)).as_deref(),
            Some("Copy")
        );
    }

    #[test]
    fn test_top_level_has_no_function() {
        let buffer = SourceBuffer::from_text(".A = 1\n.");
        assert_eq!(enclosing_function(&buffer, Position::new(1, 0)), None);
    }

    #[test]
    fn test_variable_before_brace_is_not_function() {
        let buffer = SourceBuffer::from_text(".Arr = .Base {\n    .");
        assert_eq!(enclosing_function(&buffer, Position::new(1, 4)), None);
    }

    #[test]
    fn test_property_completion() {
        let completion = complete_at("Copy( 'c' )\n{\n    .De\n}", 2, 7).unwrap();
        assert_eq!(completion.context, CompletionContext::Property);
        assert_eq!(completion.prefix, "De");
        assert_eq!(completion.function.as_deref(), Some("Copy"));
        assert_eq!(completion.candidates, vec!["Dest"]);
    }

    #[test]
    fn test_property_completion_unknown_function_uses_all() {
        let completion = complete_at("Print( 'x' )\n{\n    .\n}", 2, 5).unwrap();
        assert_eq!(completion.function.as_deref(), Some("Print"));
        assert_eq!(completion.candidates, all_properties());
    }

    #[test]
    fn test_directive_completion() {
        let completion = complete_at("#i", 0, 2).unwrap();
        assert_eq!(completion.context, CompletionContext::Directive);
        assert_eq!(completion.candidates, vec!["if", "import", "include"]);
    }

    #[test]
    fn test_variable_completion_in_string() {
        let completion = complete_at(".Out = '$_FAST", 0, 14).unwrap();
        assert_eq!(completion.context, CompletionContext::Variable);
        assert_eq!(completion.prefix, "_FAST");
        assert_eq!(
            completion.candidates,
            vec![
                "_FASTBUILD_EXE_PATH_",
                "_FASTBUILD_VERSION_",
                "_FASTBUILD_VERSION_STRING_",
            ]
        );
    }

    #[test]
    fn test_closing_dollar_is_not_a_variable() {
        assert_eq!(complete_at(".Out = '$Root$bin", 0, 17), None);
        assert_eq!(complete_at(".Out = '^$bin", 0, 13), None);
    }

    #[test]
    fn test_second_variable_in_string() {
        let completion = complete_at(".Out = '$Root$/$_W", 0, 18).unwrap();
        assert_eq!(completion.context, CompletionContext::Variable);
        assert_eq!(completion.candidates, vec!["_WORKING_DIR_"]);
    }

    #[test]
    fn test_word_completion_is_case_insensitive() {
        let completion = complete_at("lib", 0, 3).unwrap();
        assert_eq!(completion.context, CompletionContext::Word);
        assert_eq!(completion.candidates, vec!["Library"]);
    }

    #[test]
    fn test_no_completion_in_string_or_comment() {
        assert_eq!(complete_at(".A = '.Co", 0, 9), None);
        assert_eq!(complete_at("// .Co", 0, 6), None);
        assert_eq!(complete_at("/*\n.Co", 1, 3), None);
    }

    #[test]
    fn test_column_out_of_range() {
        let err = complete(&SourceBuffer::from_text("ab"), Position::new(0, 3)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ColumnOutOfRange);
    }

    #[test]
    fn test_line_out_of_range() {
        let err = complete(&SourceBuffer::from_text("ab"), Position::new(1, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::LineOutOfRange);
    }
}
