//! High-level operations.
//!
//! This module contains the implementation of bffgen commands.

pub mod generate;
pub mod order;

pub use generate::{
    active_projects, generate, render_all, Descriptor, GenerateOptions, GenerateResult,
    RenderedSolution,
};
pub use order::build_order;
