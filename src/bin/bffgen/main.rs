//! bffgen CLI - FASTBuild descriptors for multi-project solutions

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bffgen::util::context::SolutionLookupError;
use bffgen::util::diagnostic::{emit, suggestions, Diagnostic};
use bffgen::{GlobalContext, ResolveError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        if let Some(err) = e.downcast_ref::<ResolveError>() {
            emit(&err.to_diagnostic(), color);
        } else if let Some(err) = e.downcast_ref::<SolutionLookupError>() {
            let diag = Diagnostic::error(err.to_string()).with_suggestion(suggestions::NO_SOLUTION);
            emit(&diag, color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("bffgen=debug")
    } else {
        EnvFilter::new("bffgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &ctx),
        Commands::Order(args) => commands::order::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
