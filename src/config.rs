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

//! Engine configuration.

use crate::error::{ErrorCode, IndentError, Result};

/// Default number of columns per nesting level.
pub const DEFAULT_INDENT_UNIT: usize = 4;

/// Default width of a tab stop in leading whitespace.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Settings for an [`IndentEngine`](crate::indent::IndentEngine).
///
/// Both values are guaranteed positive once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    indent_unit: usize,
    tab_width: usize,
}

impl IndentConfig {
    /// Create a configuration with the given indent unit and the default tab width.
    ///
    /// # Errors
    ///
    /// Returns `E001` if `indent_unit` is zero.
    pub fn new(indent_unit: usize) -> Result<Self> {
        if indent_unit == 0 {
            return Err(IndentError::new(
                ErrorCode::InvalidIndentUnit,
                "Indent unit must be a positive number of columns",
            )
            .with_hint(format!("The default is {}", DEFAULT_INDENT_UNIT)));
        }

        Ok(Self {
            indent_unit,
            tab_width: DEFAULT_TAB_WIDTH,
        })
    }

    /// Replace the tab width.
    ///
    /// # Errors
    ///
    /// Returns `E002` if `tab_width` is zero.
    pub fn with_tab_width(self, tab_width: usize) -> Result<Self> {
        if tab_width == 0 {
            return Err(IndentError::new(
                ErrorCode::InvalidTabWidth,
                "Tab width must be a positive number of columns",
            )
            .with_hint(format!("The default is {}", DEFAULT_TAB_WIDTH)));
        }

        Ok(Self { tab_width, ..self })
    }

    /// Columns per nesting level.
    pub fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    /// Columns a tab advances to in leading whitespace.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}
