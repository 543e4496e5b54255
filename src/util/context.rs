//! Global context for bffgen operations.
//!
//! Provides centralized access to the working directory, the solution
//! snapshot location, and configuration paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::SOLUTION_FILE_NAME;
use crate::util::config::{self, load_config, Config};
use crate::util::fs::{absolute_path, resolve_path};

/// Error locating the solution snapshot.
#[derive(Debug, Error)]
pub enum SolutionLookupError {
    #[error("could not find `{name}` in `{}` or any parent directory", .dir.display())]
    NotFound { name: &'static str, dir: PathBuf },
}

/// Global context containing paths and output settings.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global config file (~/.bffgen/config.toml), if a home directory exists
    global_config: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            global_config: config::global_config_path(),
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = absolute_path(&cwd)?;
        Ok(ctx)
    }

    /// Override the global config location.
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `Solution.toml` starting from cwd and searching upward.
    pub fn find_solution(&self) -> Result<PathBuf, SolutionLookupError> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(SOLUTION_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(SolutionLookupError::NotFound {
                    name: SOLUTION_FILE_NAME,
                    dir: self.cwd.clone(),
                });
            }
        }
    }

    /// Resolve the solution path: an explicit path relative to cwd, or a
    /// search upward from cwd.
    pub fn solution_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(resolve_path(&self.cwd, path)),
            None => Ok(self.find_solution()?),
        }
    }

    /// Load the configuration that applies to a solution.
    ///
    /// An explicit config file replaces the solution-level one; the global
    /// config always applies underneath. A config file that fails to parse
    /// is an error.
    pub fn load_config(&self, solution_root: &Path, explicit: Option<&Path>) -> Result<Config> {
        let project_path = match explicit {
            Some(path) => {
                let path = resolve_path(&self.cwd, path);
                if !path.exists() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                path
            }
            None => config::project_config_path(solution_root),
        };

        let global_path = self
            .global_config
            .clone()
            .unwrap_or_else(|| PathBuf::from(""));

        load_config(&global_path, &project_path)
    }
}
