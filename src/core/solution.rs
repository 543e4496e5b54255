//! Solutions and snapshot loading.
//!
//! A solution snapshot is a TOML file (canonically `Solution.toml`) that
//! describes every project, its kind, its require-edges and its
//! configurations:
//!
//! ```toml
//! name = "Game"
//!
//! [[projects]]
//! name = "engine"
//! kind = "native-static-library"
//! folder = "engine"
//! requires = ["math"]
//!
//! [[projects.configurations]]
//! name = "Debug"
//! platform = "x64"
//!
//! [projects.configurations.native]
//! include_paths = ["./include"]
//! ```
//!
//! Loading is isolated per project: an entry that fails to deserialize or
//! validate is reported as a [`ProjectFailure`] and the rest of the
//! solution still loads.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::configuration::{Configuration, ManagedSettings, NativeSettings, Reference};
use crate::core::project::{Project, ProjectKind};
use crate::util::fs::{absolute_path, read_to_string, resolve_path};

/// Canonical solution snapshot file name.
pub const SOLUTION_FILE_NAME: &str = "Solution.toml";

/// A solution: a named set of projects under one root folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Solution name
    pub name: String,

    /// Absolute solution root folder
    pub root: PathBuf,

    /// Projects in declaration order
    pub projects: Vec<Project>,
}

/// A project entry that could not be modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFailure {
    /// Project name, or a positional placeholder if the name is unreadable
    pub name: String,

    /// Why the project was dropped
    pub reason: String,
}

/// Result of loading a snapshot.
#[derive(Debug, Clone)]
pub struct LoadedSolution {
    /// The successfully modeled solution
    pub solution: Solution,

    /// Projects omitted from the solution
    pub failures: Vec<ProjectFailure>,
}

#[derive(Debug, Deserialize)]
struct SolutionFile {
    name: String,
    root: Option<PathBuf>,
    #[serde(default)]
    projects: Vec<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
    kind: ProjectKind,
    #[serde(default)]
    folder: Option<PathBuf>,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    configurations: Vec<ConfigurationEntry>,
}

#[derive(Debug, Deserialize)]
struct ConfigurationEntry {
    name: String,
    platform: String,
    output_folder: Option<PathBuf>,
    intermediate_folder: Option<PathBuf>,
    #[serde(default)]
    native: NativeSettings,
    #[serde(default)]
    managed: ManagedSettings,
}

impl Solution {
    /// Create an empty solution.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Solution {
            name: name.into(),
            root: root.into(),
            projects: Vec::new(),
        }
    }

    /// Add a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Find a project by name.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Absolute path of the solution-level descriptor.
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(format!("{}.bff", self.name))
    }

    /// Load a solution snapshot from a file.
    ///
    /// The solution root defaults to the directory containing the file.
    pub fn load(path: &Path) -> Result<LoadedSolution> {
        let contents = read_to_string(path)?;
        let path = absolute_path(path)?;
        let dir = path.parent().unwrap_or(Path::new("/"));

        Self::from_toml_str(&contents, dir)
            .with_context(|| format!("failed to parse solution: {}", path.display()))
    }

    /// Parse a solution snapshot. Relative roots are resolved against `base_dir`.
    pub fn from_toml_str(contents: &str, base_dir: &Path) -> Result<LoadedSolution> {
        let file: SolutionFile = toml::from_str(contents)?;

        let root = match file.root {
            Some(root) => resolve_path(base_dir, &root),
            None => resolve_path(base_dir, Path::new(".")),
        };

        let mut solution = Solution::new(file.name, root);
        let mut failures = Vec::new();
        let mut names = HashSet::new();
        let mut target_ids = HashSet::new();

        for (index, value) in file.projects.into_iter().enumerate() {
            let fallback_name = value
                .get("name")
                .and_then(|n| n.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("<project #{}>", index + 1));

            let project = match value.try_into::<ProjectEntry>() {
                Ok(entry) => build_project(entry, &solution.root),
                Err(e) => Err(e.to_string()),
            };

            let project = project.and_then(|project| {
                validate_project(&project, &names, &target_ids)?;
                Ok(project)
            });

            match project {
                Ok(project) => {
                    names.insert(project.name.clone());
                    target_ids.extend(project.target_ids());
                    solution.projects.push(project);
                }
                Err(reason) => {
                    tracing::warn!("skipping project `{}`: {}", fallback_name, reason);
                    failures.push(ProjectFailure {
                        name: fallback_name,
                        reason,
                    });
                }
            }
        }

        prune_requirements(&mut solution.projects);

        tracing::debug!(
            "loaded solution `{}` with {} projects ({} failed)",
            solution.name,
            solution.projects.len(),
            failures.len()
        );

        Ok(LoadedSolution { solution, failures })
    }
}

fn build_project(entry: ProjectEntry, solution_root: &Path) -> std::result::Result<Project, String> {
    if entry.name.trim().is_empty() {
        return Err("project name is empty".to_string());
    }

    let relative_folder = entry.folder.unwrap_or_else(|| PathBuf::from("."));
    let root_folder = resolve_path(solution_root, &relative_folder);

    let configurations = entry
        .configurations
        .into_iter()
        .map(|c| build_configuration(c, &root_folder))
        .collect();

    let mut requires = Vec::new();
    for name in entry.requires {
        if !requires.contains(&name) {
            requires.push(name);
        }
    }

    Ok(Project {
        name: entry.name,
        kind: entry.kind,
        root_folder,
        relative_folder,
        requires,
        files: entry.files,
        configurations,
    })
}

fn build_configuration(entry: ConfigurationEntry, project_root: &Path) -> Configuration {
    let output_folder = entry
        .output_folder
        .unwrap_or_else(|| Path::new("bin").join(&entry.platform).join(&entry.name));
    let intermediate_folder = entry
        .intermediate_folder
        .unwrap_or_else(|| Path::new("obj").join(&entry.platform).join(&entry.name));

    let mut native = entry.native;
    native.import_library = native
        .import_library
        .map(|path| resolve_path(project_root, &path));

    let mut managed = entry.managed;
    managed.references = managed
        .references
        .into_iter()
        .map(|r| Reference {
            path: resolve_path(project_root, &r.path),
            name: r.name,
        })
        .collect();

    Configuration {
        name: entry.name,
        platform: entry.platform,
        output_folder: resolve_path(project_root, &output_folder),
        intermediate_folder: resolve_path(project_root, &intermediate_folder),
        native,
        managed,
    }
}

fn validate_project(
    project: &Project,
    names: &HashSet<String>,
    target_ids: &HashSet<String>,
) -> std::result::Result<(), String> {
    if names.contains(&project.name) {
        return Err(format!("duplicate project name `{}`", project.name));
    }

    let mut seen = BTreeSet::new();
    for id in project.target_ids() {
        if !seen.insert(id.clone()) {
            return Err(format!("configuration `{}` is declared twice", id));
        }
        if target_ids.contains(&id) {
            return Err(format!(
                "target identifier `{}` collides with another project",
                id
            ));
        }
    }

    let mut prefixes = BTreeSet::new();
    for configuration in &project.configurations {
        let prefix = configuration.variable_prefix();
        if !prefixes.insert(prefix.clone()) {
            return Err(format!(
                "configuration `{}|{}` maps to variable prefix `{}` already used by another configuration",
                configuration.name, configuration.platform, prefix
            ));
        }
    }

    Ok(())
}

/// Drop require-edges that name projects absent from the solution.
fn prune_requirements(projects: &mut [Project]) {
    let known: HashSet<String> = projects.iter().map(|p| p.name.clone()).collect();

    for project in projects.iter_mut() {
        let name = project.name.clone();
        project.requires.retain(|dep| {
            let keep = known.contains(dep);
            if !keep {
                tracing::warn!(
                    "project `{}` requires unknown project `{}`, dropping the edge",
                    name,
                    dep
                );
            }
            keep
        });
    }
}
