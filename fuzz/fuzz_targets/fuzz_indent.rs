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

//! Fuzz target for the indent engine.
//!
//! Every in-range query must return `Ok`, and a re-indented buffer must be
//! a fixed point of a second pass.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_indent
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_indent -- -max_total_time=60

#![no_main]

use bffindent::{reindent_text, IndentEngine, SourceBuffer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let engine = IndentEngine::default();
        let buffer = SourceBuffer::from_text(source);
        for index in 0..buffer.line_count() {
            assert!(engine.compute_indent(&buffer, index).is_ok());
        }

        if let Ok(once) = reindent_text(&engine, source) {
            assert_eq!(reindent_text(&engine, &once).ok().as_deref(), Some(once.as_str()));
        }
    }
});
