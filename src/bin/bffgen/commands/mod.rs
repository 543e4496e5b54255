//! Command implementations

pub mod completions;
pub mod generate;
pub mod order;

use anyhow::Result;

use crate::cli::SolutionArgs;
use bffgen::core::{LoadedSolution, Solution};
use bffgen::util::diagnostic::{emit, suggestions, Diagnostic};
use bffgen::util::GlobalContext;
use bffgen::Config;

/// Locate and load the solution snapshot and the configuration that
/// applies to it. Projects that failed to load are reported as warnings.
pub fn load_solution(args: &SolutionArgs, ctx: &GlobalContext) -> Result<(LoadedSolution, Config)> {
    let path = ctx.solution_path(args.solution.as_deref())?;
    let loaded = Solution::load(&path)?;
    let config = ctx.load_config(&loaded.solution.root, args.config.as_deref())?;

    for failure in &loaded.failures {
        let diag = Diagnostic::warning(format!("skipped project `{}`", failure.name))
            .with_context(failure.reason.clone())
            .with_location(path.clone())
            .with_suggestion(suggestions::PROJECT_SKIPPED);
        emit(&diag, ctx.color());
    }

    Ok((loaded, config))
}
