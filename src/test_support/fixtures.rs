//! Test fixtures for common solution shapes.
//!
//! Fixtures exist in two forms: in-memory [`Solution`] values rooted at a
//! caller-supplied folder, and `Solution.toml` snapshots written to a real
//! directory for loader and end-to-end tests.

use std::path::{Path, PathBuf};

use crate::core::{Configuration, NativeSettings, Project, ProjectKind, Solution, SOLUTION_FILE_NAME};

/// Fixture for one project entry of a snapshot.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Project name.
    pub name: String,
    /// Kind string as written in the snapshot.
    pub kind: String,
    /// Required project names.
    pub requires: Vec<String>,
    /// `(variant, platform)` pairs.
    pub configurations: Vec<(String, String)>,
}

impl ProjectFixture {
    /// Create a project fixture with one `Debug|x64` configuration.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            kind: kind.into(),
            requires: Vec::new(),
            configurations: vec![("Debug".to_string(), "x64".to_string())],
        }
    }

    /// A native executable.
    pub fn executable(name: impl Into<String>) -> Self {
        Self::new(name, "native-executable")
    }

    /// A native static library.
    pub fn static_library(name: impl Into<String>) -> Self {
        Self::new(name, "native-static-library")
    }

    /// Add a required project.
    pub fn requires(mut self, name: impl Into<String>) -> Self {
        self.requires.push(name.into());
        self
    }

    /// Replace the configurations.
    pub fn with_configurations(mut self, configurations: &[(&str, &str)]) -> Self {
        self.configurations = configurations
            .iter()
            .map(|(n, p)| (n.to_string(), p.to_string()))
            .collect();
        self
    }

    fn to_toml(&self) -> String {
        let requires: Vec<String> = self.requires.iter().map(|r| format!("\"{}\"", r)).collect();
        let mut out = format!(
            "[[projects]]\nname = \"{}\"\nkind = \"{}\"\nfolder = \"{}\"\nrequires = [{}]\n",
            self.name,
            self.kind,
            self.name,
            requires.join(", ")
        );
        for (variant, platform) in &self.configurations {
            out.push_str(&format!(
                "\n[[projects.configurations]]\nname = \"{}\"\nplatform = \"{}\"\n",
                variant, platform
            ));
        }
        out.push('\n');
        out
    }
}

/// Fixture for a whole snapshot.
#[derive(Debug, Clone)]
pub struct SolutionFixture {
    /// Solution name.
    pub name: String,
    /// Projects in declaration order.
    pub projects: Vec<ProjectFixture>,
}

impl SolutionFixture {
    /// Create an empty solution fixture.
    pub fn new(name: impl Into<String>) -> Self {
        SolutionFixture {
            name: name.into(),
            projects: Vec::new(),
        }
    }

    /// Add a project.
    pub fn with_project(mut self, project: ProjectFixture) -> Self {
        self.projects.push(project);
        self
    }

    /// Snapshot text.
    pub fn to_toml(&self) -> String {
        let mut out = format!("name = \"{}\"\n\n", self.name);
        for project in &self.projects {
            out.push_str(&project.to_toml());
        }
        out
    }

    /// Write the snapshot and the project folders under `base_path`.
    /// Returns the snapshot path.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(base_path)?;
        for project in &self.projects {
            std::fs::create_dir_all(base_path.join(&project.name))?;
        }

        let path = base_path.join(SOLUTION_FILE_NAME);
        std::fs::write(&path, self.to_toml())?;
        Ok(path)
    }
}

/// A native project rooted at `<root>/<name>` with one `Debug|x64`
/// configuration.
pub fn native_project(root: &Path, name: &str, kind: ProjectKind) -> Project {
    let folder = root.join(name);
    let configuration = Configuration::new(
        "Debug",
        "x64",
        folder.join("bin/x64/Debug"),
        folder.join("obj/x64/Debug"),
    )
    .with_native(NativeSettings {
        include_paths: vec![PathBuf::from("./include")],
        ..Default::default()
    });

    Project::new(name, kind, folder, name).configuration(configuration)
}

/// `app -> engine -> core`, declared in that order.
pub fn chain_solution(root: &Path) -> Solution {
    Solution::new("Game", root)
        .with_project(native_project(root, "app", ProjectKind::NativeExecutable).requires("engine"))
        .with_project(native_project(root, "engine", ProjectKind::NativeSharedLibrary).requires("core"))
        .with_project(native_project(root, "core", ProjectKind::NativeStaticLibrary))
}

/// Two projects requiring each other.
pub fn cyclic_solution(root: &Path) -> Solution {
    Solution::new("Loop", root)
        .with_project(native_project(root, "a", ProjectKind::NativeStaticLibrary).requires("b"))
        .with_project(native_project(root, "b", ProjectKind::NativeStaticLibrary).requires("a"))
}
