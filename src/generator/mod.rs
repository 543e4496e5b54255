//! FASTBuild descriptor generation.
//!
//! This module renders the per-project descriptors (native and managed
//! families) and the solution-level descriptor. Rendering is pure: every
//! function returns text, and writing to disk happens in `ops::generate`.

pub mod managed;
pub mod native;
pub mod solution;
pub mod toolchain;
pub mod writer;

pub use writer::BffWriter;

use std::collections::BTreeMap;

use crate::core::{Configuration, Family, Project};
use crate::util::config::{Config, ProjectSettings};

/// Shared state for rendering the projects of one solution.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// Active projects (valid and not ignored), by name
    active: BTreeMap<&'a str, &'a Project>,

    /// Configuration for the run
    config: &'a Config,
}

impl<'a> GenerationContext<'a> {
    /// Create a context over the given active projects.
    pub fn new<I>(active: I, config: &'a Config) -> Self
    where
        I: IntoIterator<Item = &'a Project>,
    {
        GenerationContext {
            active: active.into_iter().map(|p| (p.name.as_str(), p)).collect(),
            config,
        }
    }

    /// Check whether a project takes part in generation.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    /// Optional per-project overrides.
    pub fn settings(&self, project: &str) -> Option<&'a ProjectSettings> {
        self.config.project(project)
    }

    /// The run configuration.
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Pre-build dependency names for one configuration of `project`.
    ///
    /// Each active required project contributes the target identifier of
    /// its configuration with the same variant and platform. A required
    /// project without such a configuration contributes its alias name,
    /// which builds all of its configurations.
    pub fn prebuild_dependencies(
        &self,
        project: &Project,
        configuration: &Configuration,
    ) -> Vec<String> {
        project
            .requires
            .iter()
            .filter_map(|name| self.active.get(name.as_str()))
            .map(|dep| match dep.matching_configuration(configuration) {
                Some(c) => c.target_id(&dep.name),
                None => dep.name.clone(),
            })
            .collect()
    }
}

/// Render the descriptor of one project. `None` for invalid projects.
pub fn render_project(project: &Project, ctx: &GenerationContext<'_>) -> Option<String> {
    match project.kind.family()? {
        Family::Native(kind) => Some(native::render(project, kind, ctx)),
        Family::Managed(kind) => Some(managed::render(project, kind, ctx)),
    }
}
