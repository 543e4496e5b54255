//! Configuration file support for bffgen.
//!
//! bffgen supports two configuration file locations:
//! - Global: `~/.bffgen/config.toml` - User-wide defaults
//! - Project: `<solution root>/.bffgen/config.toml` - Solution-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// bffgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Projects excluded from generation
    pub ignore: Vec<String>,

    /// Toolchain locations
    pub toolchain: ToolchainSettings,

    /// Per-project overrides, keyed by project name
    pub projects: BTreeMap<String, ProjectSettings>,
}

/// Default Visual Studio installation folder.
pub const DEFAULT_VS_BASE_PATH: &str = r"C:\Program Files (x86)\Microsoft Visual Studio 10.0";

/// Default .NET framework folder.
pub const DEFAULT_CS_BASE_PATH: &str = r"C:\Windows\Microsoft.NET";

/// Default Windows SDK folder.
pub const DEFAULT_WINDOWS_SDK_BASE_PATH: &str = r"C:\Program Files (x86)\Microsoft SDKs\Windows\v7.0A";

/// Base paths of the Windows toolchain referenced by the solution descriptor.
///
/// Unset fields fall back to a stock Visual Studio 2010 installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Visual Studio installation folder
    pub vs_base_path: Option<String>,

    /// .NET framework folder containing the C# compilers
    pub cs_base_path: Option<String>,

    /// Windows SDK folder
    pub windows_sdk_base_path: Option<String>,
}

impl ToolchainSettings {
    /// Visual Studio folder, or the default.
    pub fn vs_base_path(&self) -> &str {
        self.vs_base_path.as_deref().unwrap_or(DEFAULT_VS_BASE_PATH)
    }

    /// .NET framework folder, or the default.
    pub fn cs_base_path(&self) -> &str {
        self.cs_base_path.as_deref().unwrap_or(DEFAULT_CS_BASE_PATH)
    }

    /// Windows SDK folder, or the default.
    pub fn windows_sdk_base_path(&self) -> &str {
        self.windows_sdk_base_path
            .as_deref()
            .unwrap_or(DEFAULT_WINDOWS_SDK_BASE_PATH)
    }

    /// Merge another settings block into this one (other's set fields win).
    pub fn merge(&mut self, other: ToolchainSettings) {
        if other.vs_base_path.is_some() {
            self.vs_base_path = other.vs_base_path;
        }
        if other.cs_base_path.is_some() {
            self.cs_base_path = other.cs_base_path;
        }
        if other.windows_sdk_base_path.is_some() {
            self.windows_sdk_base_path = other.windows_sdk_base_path;
        }
    }
}

/// Optional overrides applied to one project's configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Extra preprocessor definitions (native) or constants (managed)
    pub add_defines: Vec<String>,

    /// Extra compiler flags
    pub add_compiler_flags: Vec<String>,

    /// Compiler flags to strip
    pub remove_compiler_flags: Vec<String>,

    /// Extra linker flags
    pub add_linker_flags: Vec<String>,

    /// Extra libraries
    pub add_libraries: Vec<String>,

    /// Libraries to strip
    pub remove_libraries: Vec<String>,
}

impl ProjectSettings {
    /// Merge another settings block into this one (other's lists are appended).
    pub fn merge(&mut self, other: ProjectSettings) {
        self.add_defines.extend(other.add_defines);
        self.add_compiler_flags.extend(other.add_compiler_flags);
        self.remove_compiler_flags.extend(other.remove_compiler_flags);
        self.add_linker_flags.extend(other.add_linker_flags);
        self.add_libraries.extend(other.add_libraries);
        self.remove_libraries.extend(other.remove_libraries);
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration if the file exists, defaults otherwise.
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.is_file() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        for name in other.ignore {
            if !self.ignore.contains(&name) {
                self.ignore.push(name);
            }
        }

        self.toolchain.merge(other.toolchain);

        for (name, settings) in other.projects {
            self.projects.entry(name).or_default().merge(settings);
        }
    }

    /// Check whether a project is on the ignore list.
    pub fn is_ignored(&self, project: &str) -> bool {
        self.ignore.iter().any(|name| name == project)
    }

    /// Overrides for a project, if any.
    pub fn project(&self, name: &str) -> Option<&ProjectSettings> {
        self.projects.get(name)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.bffgen/config.toml)
/// 2. Global config (~/.bffgen/config.toml)
/// 3. Defaults
///
/// Missing files are skipped. A file that fails to parse aborts the load.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();
    config.merge(Config::load_if_exists(global_path)?);
    config.merge(Config::load_if_exists(project_path)?);
    Ok(config)
}

/// Get the global bffgen config directory (~/.bffgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".bffgen"))
}

/// Get the global config path (~/.bffgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the solution config path (.bffgen/config.toml).
pub fn project_config_path(solution_root: &Path) -> PathBuf {
    solution_root.join(".bffgen").join("config.toml")
}
