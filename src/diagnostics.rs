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

//! Rendering of indentation mismatches.
//!
//! Each [`Mismatch`] becomes one `ariadne` warning whose label covers the
//! leading whitespace of the offending line (or its first character when
//! the line has none).

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::format::Mismatch;

/// Write one report per mismatch to `w`.
///
/// `source` is the text the mismatches were computed from. Offsets are
/// taken from it directly, so `\r\n` line endings are accounted for.
pub fn render_mismatches<W: Write>(
    mut w: W,
    filename: &str,
    source: &str,
    mismatches: &[Mismatch],
    color: bool,
) -> io::Result<()> {
    let lines: Vec<&str> = source.split('\n').collect();
    let starts = line_starts(&lines);

    for mismatch in mismatches {
        let Some(text) = lines.get(mismatch.line) else {
            continue;
        };
        let span = whitespace_span(starts[mismatch.line], text);

        Report::build(ReportKind::Warning, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(format!("wrong indentation on line {}", mismatch.line + 1))
            .with_label(
                Label::new((filename, span))
                    .with_message(format!(
                        "expected {} columns, found {}",
                        mismatch.expected, mismatch.actual
                    ))
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut w)?;
    }

    Ok(())
}

/// Render mismatches into a string without colors.
pub fn mismatches_to_string(filename: &str, source: &str, mismatches: &[Mismatch]) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = render_mismatches(&mut out, filename, source, mismatches, false);
    String::from_utf8_lossy(&out).into_owned()
}

/// One-line summary of a mismatch, `file:line: expected N, found M`.
pub fn summary_line(filename: &str, mismatch: &Mismatch) -> String {
    format!(
        "{}:{}: expected indent {}, found {}",
        filename,
        mismatch.line + 1,
        mismatch.expected,
        mismatch.actual
    )
}

/// Char offset of each line start.
fn line_starts(lines: &[&str]) -> Vec<usize> {
    let mut offset = 0;
    lines
        .iter()
        .map(|line| {
            let start = offset;
            offset += line.chars().count() + 1;
            start
        })
        .collect()
}

fn whitespace_span(line_start: usize, text: &str) -> Range<usize> {
    let width = text
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
        .max(1);
    line_start..line_start + width
}
