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

//! Net nesting change contributed by a single line.

use crate::language::{is_identifier_char, Directive};
use crate::lexer::ClassifiedLine;

use super::brackets::Bracket;

/// Net change in nesting depth contributed by `line`.
///
/// Every code `{` or `[` counts +1 and every code `}` or `]` counts -1.
/// A line opening a conditional branch (`#if`, `#else`) adds one more level;
/// the matching dedent of `#else` and `#endif` is applied to their own line
/// by the decision procedure, not here.
pub fn scope_delta(line: &ClassifiedLine) -> i32 {
    let brackets: i32 = line
        .code_chars()
        .filter_map(|(_, c)| {
            if Bracket::from_opener(c).is_some_and(Bracket::is_nesting) {
                Some(1)
            } else if Bracket::from_closer(c).is_some_and(Bracket::is_nesting) {
                Some(-1)
            } else {
                None
            }
        })
        .sum();

    let branch = match leading_directive(line) {
        Some(directive) if directive.opens_branch() => 1,
        _ => 0,
    };

    brackets + branch
}

/// The directive a line starts with, if any.
///
/// Whitespace is allowed between `#` and the directive name.
pub fn leading_directive(line: &ClassifiedLine) -> Option<Directive> {
    let (hash, c) = line.leading_code_char()?;
    if c != '#' {
        return None;
    }

    let name: String = line
        .chars()
        .iter()
        .skip(hash + 1)
        .skip_while(|c| **c == ' ' || **c == '\t')
        .take_while(|c| is_identifier_char(**c))
        .collect();

    Directive::from_name(&name)
}
