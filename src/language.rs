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

//! Static BFF vocabulary.
//!
//! Function names, directives, keywords, built-in variables and the
//! properties each function accepts. This is plain data for completion.

/// Built-in functions, in alphabetical order.
pub const FUNCTIONS: &[&str] = &[
    "Alias",
    "Compiler",
    "Copy",
    "CopyDir",
    "CSAssembly",
    "DLL",
    "Error",
    "Exec",
    "Executable",
    "ForEach",
    "If",
    "Library",
    "ListDependencies",
    "ObjectList",
    "Print",
    "RemoveDir",
    "Settings",
    "Test",
    "TextFile",
    "Unity",
    "Using",
    "VCXProject",
    "VSProjectExternal",
    "VSSolution",
    "XCodeProject",
];

/// Preprocessor directive names, without the leading `#`.
pub const DIRECTIVES: &[&str] = &[
    "define", "else", "endif", "if", "import", "include", "once", "undef",
];

/// Keywords and operators spelled as words.
pub const KEYWORDS: &[&str] = &["true", "false", "in", "not", "exists", "file_exists"];

/// Variables FASTBuild defines before parsing.
pub const BUILTIN_VARIABLES: &[&str] = &[
    "_CURRENT_BFF_DIR_",
    "_FASTBUILD_EXE_PATH_",
    "_FASTBUILD_VERSION_",
    "_FASTBUILD_VERSION_STRING_",
    "_WORKING_DIR_",
];

const BUILD_COMMON: &[&str] = &["Hidden", "PreBuildDependencies"];

const COMPILE_INPUTS: &[&str] = &[
    "AllowCaching",
    "AllowDistribution",
    "Compiler",
    "CompilerForceUsing",
    "CompilerInputAllowNoFiles",
    "CompilerInputExcludedFiles",
    "CompilerInputExcludePath",
    "CompilerInputExcludePattern",
    "CompilerInputFiles",
    "CompilerInputFilesRoot",
    "CompilerInputObjectLists",
    "CompilerInputPath",
    "CompilerInputPathRecurse",
    "CompilerInputPattern",
    "CompilerInputUnity",
    "CompilerOptions",
    "CompilerOptionsDeoptimized",
    "CompilerOutputExtension",
    "CompilerOutputKeepBaseExtension",
    "CompilerOutputPath",
    "CompilerOutputPrefix",
    "DeoptimizeWritableFiles",
    "DeoptimizeWritableFilesWithToken",
    "PCHInputFile",
    "PCHOptions",
    "PCHOutputFile",
    "Preprocessor",
    "PreprocessorOptions",
];

const LINKER: &[&str] = &[
    "Environment",
    "Libraries",
    "Libraries2",
    "Linker",
    "LinkerAllowResponseFile",
    "LinkerAssemblyResources",
    "LinkerForceResponseFile",
    "LinkerLinkObjects",
    "LinkerOptions",
    "LinkerOutput",
    "LinkerStampExe",
    "LinkerStampExeArgs",
    "LinkerType",
];

const LIBRARIAN: &[&str] = &[
    "Librarian",
    "LibrarianAdditionalInputs",
    "LibrarianAllowResponseFile",
    "LibrarianForceResponseFile",
    "LibrarianOptions",
    "LibrarianOutput",
    "LibrarianType",
];

const PROJECT: &[&str] = &[
    "ProjectAllowedFileExtensions",
    "ProjectBasePath",
    "ProjectBuildCommand",
    "ProjectCleanCommand",
    "ProjectConfigs",
    "ProjectFiles",
    "ProjectFilesToExclude",
    "ProjectGuid",
    "ProjectInputPaths",
    "ProjectInputPathsExclude",
    "ProjectOutput",
    "ProjectRebuildCommand",
];

/// Properties accepted by each function, one slice group per function.
///
/// Functions that take no properties (`If`, `Print`, ...) are absent.
const FUNCTION_PROPERTIES: &[(&str, &[&[&str]])] = &[
    ("Alias", &[&["Hidden", "Targets"]]),
    (
        "Compiler",
        &[&[
            "AllowDistribution",
            "AllowResponseFile",
            "ClangGCCUpdateXLanguageArg",
            "ClangRewriteIncludes",
            "CompilerFamily",
            "CustomEnvironmentVariables",
            "Environment",
            "Executable",
            "ExecutableRootPath",
            "ExtraFiles",
            "ForceResponseFile",
            "SimpleDistributionMode",
            "SourceMapping_Experimental",
            "UseLightCache_Experimental",
            "UseRelativePaths_Experimental",
            "VS2012EnumBugFix",
        ]],
    ),
    ("Copy", &[BUILD_COMMON, &["Dest", "Source", "SourceBasePath"]]),
    (
        "CopyDir",
        &[
            BUILD_COMMON,
            &[
                "Dest",
                "SourceExcludePaths",
                "SourcePaths",
                "SourcePathsPattern",
                "SourcePathsRecurse",
            ],
        ],
    ),
    (
        "CSAssembly",
        &[
            BUILD_COMMON,
            &[
                "CompilerInputExcludedFiles",
                "CompilerInputExcludePath",
                "CompilerInputFiles",
                "CompilerInputPath",
                "CompilerInputPathRecurse",
                "CompilerInputPattern",
                "CompilerOptions",
                "CompilerOutput",
                "CompilerReferences",
                "Compiler",
            ],
        ],
    ),
    ("DLL", &[BUILD_COMMON, LINKER]),
    (
        "Exec",
        &[
            BUILD_COMMON,
            &[
                "Environment",
                "ExecAlways",
                "ExecArguments",
                "ExecExecutable",
                "ExecInput",
                "ExecInputExcludedFiles",
                "ExecInputExcludePath",
                "ExecInputPath",
                "ExecInputPathRecurse",
                "ExecInputPattern",
                "ExecOutput",
                "ExecReturnCode",
                "ExecUseStdOutAsOutput",
                "ExecWorkingDir",
            ],
        ],
    ),
    ("Executable", &[BUILD_COMMON, LINKER]),
    ("Library", &[BUILD_COMMON, COMPILE_INPUTS, LIBRARIAN]),
    (
        "ListDependencies",
        &[BUILD_COMMON, &["Dest", "Patterns", "Source"]],
    ),
    ("ObjectList", &[BUILD_COMMON, COMPILE_INPUTS]),
    (
        "RemoveDir",
        &[
            BUILD_COMMON,
            &[
                "RemoveExcludeFiles",
                "RemoveExcludePaths",
                "RemovePaths",
                "RemovePathsRecurse",
                "RemovePatterns",
            ],
        ],
    ),
    (
        "Settings",
        &[&[
            "CachePath",
            "CachePathMountPoint",
            "CachePluginDLL",
            "CachePluginDLLConfig",
            "ConcurrencyGroups",
            "DistributableJobMemoryLimitMiB",
            "Environment",
            "WorkerConnectionLimit",
            "Workers",
        ]],
    ),
    (
        "Test",
        &[
            BUILD_COMMON,
            &[
                "Environment",
                "TestAlwaysShowOutput",
                "TestArguments",
                "TestExecutable",
                "TestInput",
                "TestInputExcludedFiles",
                "TestInputExcludePath",
                "TestInputPath",
                "TestInputPathRecurse",
                "TestInputPattern",
                "TestOutput",
                "TestTimeOut",
                "TestWorkingDir",
            ],
        ],
    ),
    (
        "TextFile",
        &[
            BUILD_COMMON,
            &["TextFileAlways", "TextFileInputStrings", "TextFileOutput"],
        ],
    ),
    (
        "Unity",
        &[
            BUILD_COMMON,
            &[
                "UnityInputExcludedFiles",
                "UnityInputExcludePath",
                "UnityInputExcludePattern",
                "UnityInputFiles",
                "UnityInputIsolatedFiles",
                "UnityInputIsolateListFile",
                "UnityInputIsolateWritableFiles",
                "UnityInputIsolateWritableFilesLimit",
                "UnityInputObjectLists",
                "UnityInputPath",
                "UnityInputPathRecurse",
                "UnityInputPattern",
                "UnityNumFiles",
                "UnityOutputPath",
                "UnityOutputPattern",
                "UnityPCH",
                "UseRelativePaths_Experimental",
            ],
        ],
    ),
    (
        "VCXProject",
        &[
            PROJECT,
            &[
                "Config",
                "IntermediateDirectory",
                "Output",
                "Platform",
                "PlatformToolset",
                "ProjectReferences",
                "ProjectSccEntrySAK",
            ],
        ],
    ),
    (
        "VSProjectExternal",
        &[&[
            "ExternalProjectPath",
            "ProjectConfigs",
            "ProjectGuid",
            "ProjectTypeGuid",
        ]],
    ),
    (
        "VSSolution",
        &[&[
            "SolutionBuildProject",
            "SolutionConfigs",
            "SolutionDependencies",
            "SolutionDeployProjects",
            "SolutionFolders",
            "SolutionMinimumVisualStudioVersion",
            "SolutionOutput",
            "SolutionProjects",
            "SolutionVisualStudioVersion",
        ]],
    ),
    (
        "XCodeProject",
        &[
            PROJECT,
            &[
                "XCodeBuildToolArgs",
                "XCodeBuildToolPath",
                "XCodeBuildWorkingDir",
                "XCodeDocumentVersioning",
                "XCodeOrganizationName",
            ],
        ],
    ),
];

/// Preprocessor directives the indent engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    If,
    Else,
    Endif,
    Define,
    Undef,
    Include,
    Import,
    Once,
}

impl Directive {
    /// Look up a directive by name (without `#`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Directive::If),
            "else" => Some(Directive::Else),
            "endif" => Some(Directive::Endif),
            "define" => Some(Directive::Define),
            "undef" => Some(Directive::Undef),
            "include" => Some(Directive::Include),
            "import" => Some(Directive::Import),
            "once" => Some(Directive::Once),
            _ => None,
        }
    }

    /// Whether the directive starts a new conditional branch.
    pub fn opens_branch(self) -> bool {
        matches!(self, Directive::If | Directive::Else)
    }

    /// Whether the directive ends the current conditional branch.
    pub fn closes_branch(self) -> bool {
        matches!(self, Directive::Else | Directive::Endif)
    }
}

/// Check if a character can appear in an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Properties accepted by `function`, or `None` if it is unknown or takes none.
pub fn properties_for(function: &str) -> Option<Vec<&'static str>> {
    FUNCTION_PROPERTIES
        .iter()
        .find(|(name, _)| *name == function)
        .map(|(_, groups)| sorted(groups.iter().flat_map(|group| group.iter().copied())))
}

/// Every property accepted by any function.
pub fn all_properties() -> Vec<&'static str> {
    sorted(
        FUNCTION_PROPERTIES
            .iter()
            .flat_map(|(_, groups)| groups.iter())
            .flat_map(|group| group.iter().copied()),
    )
}

fn sorted(names: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut names: Vec<_> = names.collect();
    names.sort_unstable();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_from_name() {
        assert_eq!(Directive::from_name("if"), Some(Directive::If));
        assert_eq!(Directive::from_name("endif"), Some(Directive::Endif));
        assert_eq!(Directive::from_name("ifdef"), None);
    }

    #[test]
    fn test_directive_branches() {
        assert!(Directive::If.opens_branch());
        assert!(Directive::Else.opens_branch());
        assert!(Directive::Else.closes_branch());
        assert!(Directive::Endif.closes_branch());
        assert!(!Directive::Include.opens_branch());
    }

    #[test]
    fn test_every_directive_name_parses() {
        for name in DIRECTIVES {
            assert!(Directive::from_name(name).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_properties_for_library() {
        let props = properties_for("Library").unwrap();
        assert!(props.contains(&"Compiler"));
        assert!(props.contains(&"LibrarianOutput"));
        assert!(props.contains(&"PreBuildDependencies"));
        assert!(!props.contains(&"LinkerOutput"));
    }

    #[test]
    fn test_properties_are_sorted_and_unique() {
        let props = properties_for("CSAssembly").unwrap();
        let mut expected = props.clone();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(props, expected);
    }

    #[test]
    fn test_functions_without_properties() {
        assert_eq!(properties_for("Print"), None);
        assert_eq!(properties_for("NotAFunction"), None);
    }

    #[test]
    fn test_all_properties_is_union() {
        let all = all_properties();
        for (function, _) in FUNCTION_PROPERTIES {
            for prop in properties_for(function).unwrap() {
                assert!(all.contains(&prop));
            }
        }
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_mapped_function_is_known() {
        for (function, _) in FUNCTION_PROPERTIES {
            assert!(FUNCTIONS.contains(function), "{}", function);
        }
    }
}
