//! Build-order resolution.
//!
//! This module orders the projects of a solution so that every project is
//! included after all the projects it requires. The resolver is pure and
//! deterministic: the same solution always yields the same order.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::{BuildOrder, DependencyGraph, OrderEntry};

use crate::core::Project;

/// Resolve the build order of a set of active projects.
///
/// Invalid projects are skipped, and require-edges pointing outside the
/// given set are dropped rather than rewired.
pub fn resolve_build_order<'a, I>(projects: I) -> Result<BuildOrder, ResolveError>
where
    I: IntoIterator<Item = &'a Project>,
{
    let projects: Vec<&Project> = projects
        .into_iter()
        .filter(|p| p.kind.is_valid())
        .collect();

    let mut graph = DependencyGraph::new();
    for project in &projects {
        graph.add_project(project.name.as_str())?;
    }

    for project in &projects {
        for dep in &project.requires {
            graph.add_requirement(&project.name, dep);
        }
    }

    let order = graph.resolve()?;
    tracing::debug!(
        "build order: {}",
        order.names().collect::<Vec<_>>().join(", ")
    );
    Ok(order)
}
