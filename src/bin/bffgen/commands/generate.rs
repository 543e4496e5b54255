//! `bffgen generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::load_solution;
use bffgen::ops::{generate, GenerateOptions};
use bffgen::util::GlobalContext;

pub fn execute(args: GenerateArgs, ctx: &GlobalContext) -> Result<()> {
    let (loaded, config) = load_solution(&args.solution, ctx)?;

    let opts = GenerateOptions {
        dry_run: args.dry_run,
    };
    let result = generate(&loaded, &config, &opts)?;

    let verb = if args.dry_run { "Would write" } else { "Wrote" };
    for path in &result.written {
        eprintln!("    {} {}", verb, path.display());
    }
    if ctx.is_verbose() {
        for path in &result.unchanged {
            eprintln!("    Unchanged {}", path.display());
        }
    }

    eprintln!(
        "    Finished `{}`: {} projects, {} written, {} unchanged, {} skipped",
        loaded.solution.name,
        result.order.len(),
        result.written.len(),
        result.unchanged.len(),
        result.failures.len()
    );

    Ok(())
}
