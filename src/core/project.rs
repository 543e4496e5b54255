//! Projects and project kinds.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::configuration::Configuration;

/// The kind of a project.
///
/// Unknown kind strings deserialize to [`ProjectKind::Invalid`], which
/// excludes the project from generation and from the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectKind {
    #[default]
    Invalid,
    NativeExecutable,
    NativeSharedLibrary,
    NativeStaticLibrary,
    ManagedExecutable,
    ManagedLibrary,
    ManagedGuiExecutable,
}

/// Native target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKind {
    Executable,
    SharedLibrary,
    StaticLibrary,
}

/// Managed target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedKind {
    Executable,
    Library,
    GuiExecutable,
}

/// The generator family a project kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Native(NativeKind),
    Managed(ManagedKind),
}

impl ProjectKind {
    /// Get the canonical string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Invalid => "invalid",
            ProjectKind::NativeExecutable => "native-executable",
            ProjectKind::NativeSharedLibrary => "native-shared-library",
            ProjectKind::NativeStaticLibrary => "native-static-library",
            ProjectKind::ManagedExecutable => "managed-executable",
            ProjectKind::ManagedLibrary => "managed-library",
            ProjectKind::ManagedGuiExecutable => "managed-gui-executable",
        }
    }

    /// Split the kind into its generator family. `None` for invalid projects.
    pub fn family(&self) -> Option<Family> {
        match self {
            ProjectKind::Invalid => None,
            ProjectKind::NativeExecutable => Some(Family::Native(NativeKind::Executable)),
            ProjectKind::NativeSharedLibrary => Some(Family::Native(NativeKind::SharedLibrary)),
            ProjectKind::NativeStaticLibrary => Some(Family::Native(NativeKind::StaticLibrary)),
            ProjectKind::ManagedExecutable => Some(Family::Managed(ManagedKind::Executable)),
            ProjectKind::ManagedLibrary => Some(Family::Managed(ManagedKind::Library)),
            ProjectKind::ManagedGuiExecutable => Some(Family::Managed(ManagedKind::GuiExecutable)),
        }
    }

    /// Check whether this kind takes part in generation.
    pub fn is_valid(&self) -> bool {
        self.family().is_some()
    }
}

impl FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invalid" => Ok(ProjectKind::Invalid),
            "native-executable" | "exe" => Ok(ProjectKind::NativeExecutable),
            "native-shared-library" | "dll" => Ok(ProjectKind::NativeSharedLibrary),
            "native-static-library" | "lib" => Ok(ProjectKind::NativeStaticLibrary),
            "managed-executable" => Ok(ProjectKind::ManagedExecutable),
            "managed-library" => Ok(ProjectKind::ManagedLibrary),
            "managed-gui-executable" | "winexe" => Ok(ProjectKind::ManagedGuiExecutable),
            _ => Err(format!("unknown project kind: {}", s)),
        }
    }
}

impl From<String> for ProjectKind {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|e| {
            tracing::debug!("{}, treating project as invalid", e);
            ProjectKind::Invalid
        })
    }
}

impl From<ProjectKind> for String {
    fn from(kind: ProjectKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project name, unique within the solution
    pub name: String,

    /// Project kind
    pub kind: ProjectKind,

    /// Absolute project folder
    pub root_folder: PathBuf,

    /// Project folder relative to the solution root
    pub relative_folder: PathBuf,

    /// Names of directly required projects
    pub requires: Vec<String>,

    /// Managed input sources, relative to the project folder
    pub files: Vec<String>,

    /// Build variants
    pub configurations: Vec<Configuration>,
}

impl Project {
    /// Create a project with no requirements and no configurations.
    pub fn new(
        name: impl Into<String>,
        kind: ProjectKind,
        root_folder: impl Into<PathBuf>,
        relative_folder: impl Into<PathBuf>,
    ) -> Self {
        Project {
            name: name.into(),
            kind,
            root_folder: root_folder.into(),
            relative_folder: relative_folder.into(),
            requires: Vec::new(),
            files: Vec::new(),
            configurations: Vec::new(),
        }
    }

    /// Add a required project.
    pub fn requires(mut self, name: impl Into<String>) -> Self {
        self.requires.push(name.into());
        self
    }

    /// Add a configuration.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Add a managed input file.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Target identifiers of every configuration, in declaration order.
    pub fn target_ids(&self) -> Vec<String> {
        self.configurations
            .iter()
            .map(|c| c.target_id(&self.name))
            .collect()
    }

    /// Find the configuration with the same variant and platform as `other`.
    pub fn matching_configuration(&self, other: &Configuration) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.matches(other))
    }

    /// File name of this project's descriptor.
    pub fn descriptor_file_name(&self) -> String {
        format!("{}.bff", self.name)
    }

    /// Absolute path of this project's descriptor.
    pub fn descriptor_path(&self) -> PathBuf {
        self.root_folder.join(self.descriptor_file_name())
    }
}
