//! bffgen - FASTBuild descriptor generation for multi-project solutions
//!
//! This crate provides the core library functionality for bffgen,
//! including the solution model, build-order resolution, and descriptor
//! generation for native and managed projects.

pub mod core;
pub mod generator;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for building solution models in unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    configuration::Configuration, project::Project, project::ProjectKind, solution::Solution,
};

pub use crate::resolver::{BuildOrder, ResolveError};
pub use crate::util::config::Config;
pub use crate::util::context::GlobalContext;
