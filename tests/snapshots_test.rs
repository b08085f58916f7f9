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

//! Snapshot tests for whole-file re-indentation.
//!
//! These tests use the `insta` crate to capture the re-indented output of
//! typical BFF files. Each line is prefixed with `|` so leading whitespace
//! survives in the inline snapshots.

use bffindent::diagnostics::summary_line;
use bffindent::{check, complete, reindent_text, IndentEngine, Position, SourceBuffer};

fn render(source: &str) -> String {
    reindent_text(&IndentEngine::default(), source)
        .unwrap()
        .split('\n')
        .map(|line| format!("|{}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_snapshot_library_with_conditionals() {
    let source = r#".CompilerRoot = 'C:\Compiler'
  .Compiler = '$CompilerRoot$\cl.exe'
Settings
{
.Environment = { 'PATH=C:\Windows',
'TMP=C:\Temp' }
}
Library( 'Core' )
{
.CompilerOptions = '%1 /Fo"%2" /c'
+ ' /O2'
+ ' /W4'
.CompilerOutputPath = 'out/'
#if __WINDOWS__
.LibrarianOptions = '/OUT:"%2" "%1"'
#else
.LibrarianOptions = 'rcs %2 %1'
#endif
}"#;

    insta::assert_snapshot!(render(source), @r#"
    |.CompilerRoot = 'C:\Compiler'
    |.Compiler = '$CompilerRoot$\cl.exe'
    |Settings
    |{
    |    .Environment = { 'PATH=C:\Windows',
    |                     'TMP=C:\Temp' }
    |}
    |Library( 'Core' )
    |{
    |    .CompilerOptions = '%1 /Fo"%2" /c'
    |                     + ' /O2'
    |                     + ' /W4'
    |    .CompilerOutputPath = 'out/'
    |    #if __WINDOWS__
    |        .LibrarianOptions = '/OUT:"%2" "%1"'
    |    #else
    |        .LibrarianOptions = 'rcs %2 %1'
    |    #endif
    |}
    "#);
}

#[test]
fn test_snapshot_struct_array() {
    let source = "// Build configs {\n.Configs =\n{\n[\n.Name = 'Debug'\n]\n\n[\n.Name = 'Release'\n]\n}";

    insta::assert_snapshot!(render(source), @r"
    |// Build configs {
    |.Configs =
    |{
    |    [
    |        .Name = 'Debug'
    |    ]
    |
    |    [
    |        .Name = 'Release'
    |    ]
    |}
    ");
}

#[test]
fn test_snapshot_block_comment_kept() {
    let source = "/*\n   Usage:\n     fbuild all\n*/\nAlias( 'all' )\n{\n.Targets = { 'Core' }\n}";

    insta::assert_snapshot!(render(source), @r"
    |/*
    |   Usage:
    |     fbuild all
    |*/
    |Alias( 'all' )
    |{
    |    .Targets = { 'Core' }
    |}
    ");
}

#[test]
fn test_snapshot_check_summary() {
    let buffer = SourceBuffer::from_text("{\n  .A = 1\n        .B = 2\n}");
    let mismatches = check(&IndentEngine::default(), &buffer).unwrap();
    let summary = mismatches
        .iter()
        .map(|m| summary_line("fbuild.bff", m))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(summary, @r"
    fbuild.bff:2: expected indent 4, found 2
    fbuild.bff:3: expected indent 4, found 8
    ");
}

#[test]
fn test_snapshot_property_candidates() {
    let buffer = SourceBuffer::from_text("Copy( 'Docs' )\n{\n    .\n}");
    let completion = complete(&buffer, Position::new(2, 5)).unwrap().unwrap();

    insta::assert_snapshot!(completion.candidates.join("\n"), @r"
    Dest
    Hidden
    PreBuildDependencies
    Source
    SourceBasePath
    ");
}
