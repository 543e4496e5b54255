//! Test utilities for bffgen unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use bffgen::test_support::{chain_solution, ProjectFixture, SolutionFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let path = SolutionFixture::new("Game")
//!         .with_project(ProjectFixture::executable("app").requires("core"))
//!         .with_project(ProjectFixture::static_library("core"))
//!         .write_to(tmp.path())
//!         .unwrap();
//!     // Load `path` and generate...
//! }
//! ```

pub mod fixtures;

// Re-export fixtures for convenience
pub use fixtures::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Solution;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_round_trips_through_loader() {
        let tmp = TempDir::new().unwrap();
        let path = SolutionFixture::new("Game")
            .with_project(ProjectFixture::executable("app").requires("core"))
            .with_project(
                ProjectFixture::static_library("core")
                    .with_configurations(&[("Debug", "Win32"), ("Release", "Win32")]),
            )
            .write_to(tmp.path())
            .unwrap();

        let loaded = Solution::load(&path).unwrap();
        assert!(loaded.failures.is_empty());
        assert_eq!(loaded.solution.projects.len(), 2);

        let core = loaded.solution.project("core").unwrap();
        assert_eq!(core.target_ids(), vec!["core-Win32-Debug", "core-Win32-Release"]);
        assert_eq!(loaded.solution.project("app").unwrap().requires, vec!["core"]);
    }
}
