//! Implementation of `bffgen order`.

use crate::core::Solution;
use crate::ops::generate::active_projects;
use crate::resolver::{resolve_build_order, BuildOrder, ResolveError};
use crate::util::config::Config;

/// Resolve the build order of the projects that take part in generation.
pub fn build_order(solution: &Solution, config: &Config) -> Result<BuildOrder, ResolveError> {
    resolve_build_order(active_projects(solution, config))
}
