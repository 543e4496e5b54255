//! Core data structures for bffgen.
//!
//! This module contains the read-only solution model consumed by the
//! resolver and the descriptor generators:
//! - Solutions and their loading from a TOML snapshot
//! - Projects and their kinds
//! - Per-variant configurations with native and managed settings

pub mod configuration;
pub mod project;
pub mod solution;

pub use configuration::{CharacterSet, Configuration, ManagedSettings, NativeSettings, Reference};
pub use project::{Family, ManagedKind, NativeKind, Project, ProjectKind};
pub use solution::{LoadedSolution, ProjectFailure, Solution, SOLUTION_FILE_NAME};
