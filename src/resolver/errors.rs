//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error while ordering the projects of a solution.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("cyclic dependency between projects: {}", .projects.join(" -> "))]
    #[diagnostic(
        code(bffgen::resolve::cycle),
        help("break the cycle by removing or restructuring a project requirement")
    )]
    CycleDetected {
        /// Projects forming the cycle, starting and ending at the same project
        projects: Vec<String>,
    },

    #[error("project `{name}` is declared twice")]
    #[diagnostic(code(bffgen::resolve::duplicate_project))]
    DuplicateProject { name: String },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::CycleDetected { projects } => {
                Diagnostic::error("cyclic dependency between projects")
                    .with_context(format!("cycle: {}", projects.join(" -> ")))
                    .with_suggestion(
                        "break the cycle by removing or restructuring a project requirement",
                    )
                    .with_suggestion(
                        "add one of the projects to the `ignore` list in .bffgen/config.toml",
                    )
            }

            ResolveError::DuplicateProject { name } => {
                Diagnostic::error(format!("project `{}` is declared twice", name))
                    .with_suggestion("give every project in the solution a unique name")
            }
        }
    }
}
