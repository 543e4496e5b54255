//! Per-variant project configurations.
//!
//! A configuration is one build variant of a project (e.g. `Debug` on
//! `x64`). It carries its own compile and link inputs, split into a native
//! bag (C/C++) and a managed bag (C#). Each generator reads only the bag of
//! its own family.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Character set declared by a native configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    /// No character set declared
    #[default]
    #[serde(alias = "none")]
    NotSet,
    /// Unicode (`UNICODE` / `_UNICODE` are defined)
    Unicode,
    /// Multi-byte character set
    #[serde(alias = "mbcs")]
    MultiByte,
}

/// Compile and link inputs for the native (C/C++) family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSettings {
    /// Include directories (relative paths are rooted at the project folder)
    pub include_paths: Vec<PathBuf>,

    /// Library search directories
    pub library_paths: Vec<PathBuf>,

    /// Library names without extension
    pub libraries: Vec<String>,

    /// Preprocessor definitions (`NAME` or `NAME=VALUE`)
    pub defines: Vec<String>,

    /// Compiler flags, passed through verbatim
    pub compiler_flags: Vec<String>,

    /// Linker flags, passed through verbatim
    pub linker_flags: Vec<String>,

    /// Declared character set
    pub character_set: CharacterSet,

    /// Import library (DLL) or archive (static library) output path
    pub import_library: Option<PathBuf>,
}

/// An external assembly reference of a managed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Assembly name
    pub name: String,

    /// Path to the assembly
    pub path: PathBuf,
}

/// Compile inputs for the managed (C#) family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagedSettings {
    /// Enable optimizations
    pub optimize: bool,

    /// Treat warnings as errors
    pub warnings_as_errors: bool,

    /// Defined constants
    pub defined_constants: Vec<String>,

    /// Emit debug information
    pub debug: bool,

    /// Kind of debug information (`full`, `pdbonly`, ...)
    pub debug_info: Option<String>,

    /// Warning codes to suppress
    pub warnings_to_ignore: Vec<String>,

    /// PE file alignment
    pub file_alignment: u32,

    /// Compiler warning level
    pub warning_level: u32,

    /// External assembly references
    pub references: Vec<Reference>,
}

impl Default for ManagedSettings {
    fn default() -> Self {
        ManagedSettings {
            optimize: false,
            warnings_as_errors: false,
            defined_constants: Vec::new(),
            debug: false,
            debug_info: None,
            warnings_to_ignore: Vec::new(),
            file_alignment: 512,
            warning_level: 4,
            references: Vec::new(),
        }
    }
}

/// One build variant of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Variant name (e.g. `Debug`)
    pub name: String,

    /// Platform tag (e.g. `x64`)
    pub platform: String,

    /// Absolute output folder
    pub output_folder: PathBuf,

    /// Absolute intermediate folder
    pub intermediate_folder: PathBuf,

    /// Native compile/link inputs
    pub native: NativeSettings,

    /// Managed compile inputs
    pub managed: ManagedSettings,
}

impl Configuration {
    /// Create a configuration with empty settings.
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        output_folder: impl Into<PathBuf>,
        intermediate_folder: impl Into<PathBuf>,
    ) -> Self {
        Configuration {
            name: name.into(),
            platform: platform.into(),
            output_folder: output_folder.into(),
            intermediate_folder: intermediate_folder.into(),
            native: NativeSettings::default(),
            managed: ManagedSettings::default(),
        }
    }

    /// Set the native settings.
    pub fn with_native(mut self, native: NativeSettings) -> Self {
        self.native = native;
        self
    }

    /// Set the managed settings.
    pub fn with_managed(mut self, managed: ManagedSettings) -> Self {
        self.managed = managed;
        self
    }

    /// The target identifier of this configuration within `project`.
    ///
    /// This is the handle every cross-reference uses, so it must be unique
    /// across the whole solution.
    pub fn target_id(&self, project: &str) -> String {
        format!("{}-{}-{}", project, self.platform, self.name)
    }

    /// Prefix for the per-configuration variables of a descriptor.
    ///
    /// Characters that are not valid in a FASTBuild identifier are replaced
    /// with `_`, so `Any CPU` becomes `Any_CPU`.
    pub fn variable_prefix(&self) -> String {
        format!("{}_{}", self.name, self.platform)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect()
    }

    /// Whether this configuration is the same variant and platform as `other`.
    pub fn matches(&self, other: &Configuration) -> bool {
        self.name == other.name && self.platform == other.platform
    }
}
