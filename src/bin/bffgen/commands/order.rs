//! `bffgen order` command

use anyhow::Result;

use crate::cli::OrderArgs;
use crate::commands::load_solution;
use bffgen::ops::build_order;
use bffgen::util::GlobalContext;

pub fn execute(args: OrderArgs, ctx: &GlobalContext) -> Result<()> {
    let (loaded, config) = load_solution(&args.solution, ctx)?;
    let order = build_order(&loaded.solution, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    for (index, entry) in order.entries.iter().enumerate() {
        println!("{:>3}. {} (priority {})", index + 1, entry.name, entry.priority);
    }

    Ok(())
}
