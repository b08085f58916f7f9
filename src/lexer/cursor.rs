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

//! Backward iteration over code characters.

use super::ClassifiedLine;
use crate::buffer::{Position, SourceBuffer};

/// Iterator walking backward through a buffer, yielding only code characters.
///
/// Characters inside strings and comments are skipped. Line boundaries are
/// not yielded; callers compare [`Position::line`] to notice them.
pub struct CodeCharsRev<'a> {
    buffer: &'a SourceBuffer,
    line: usize,
    current: Option<ClassifiedLine>,
    /// Number of not yet visited characters on `current`.
    remaining: usize,
}

impl<'a> CodeCharsRev<'a> {
    /// Start right before `position`. The character at `position` is not yielded.
    pub fn before(buffer: &'a SourceBuffer, position: Position) -> Self {
        let current = buffer.classify(position.line);
        let remaining = current
            .as_ref()
            .map_or(0, |line| position.column.min(line.len()));
        Self {
            buffer,
            line: position.line,
            current,
            remaining,
        }
    }
}

impl Iterator for CodeCharsRev<'_> {
    type Item = (Position, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.current.as_ref()?;

            while self.remaining > 0 {
                self.remaining -= 1;
                if let Some((c, kind)) = line.get(self.remaining) {
                    if kind.is_code() {
                        return Some((Position::new(self.line, self.remaining), c));
                    }
                }
            }

            if self.line == 0 {
                self.current = None;
                return None;
            }

            self.line -= 1;
            self.current = self.buffer.classify(self.line);
            self.remaining = self.current.as_ref().map_or(0, ClassifiedLine::len);
        }
    }
}
