//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// bffgen - Generate FASTBuild descriptors for a multi-project solution
#[derive(Parser)]
#[command(name = "bffgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the project and solution descriptors
    Generate(GenerateArgs),

    /// Print the order in which projects must be built
    Order(OrderArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct SolutionArgs {
    /// Path to the solution snapshot (defaults to the nearest Solution.toml)
    #[arg(long, env = "BFFGEN_SOLUTION")]
    pub solution: Option<PathBuf>,

    /// Configuration file to use instead of <solution root>/.bffgen/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct OrderArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
