//! Entity mapper CLI commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use aero_core::mapping;
use aero_db::queries::mappings;
use aero_db::DbPool;

use crate::output;

#[derive(Subcommand)]
pub enum MapCommands {
    /// Map workflows to the data entities they touch
    Workflows,

    /// Map agents to the data entities they consume
    Agents,

    /// Run both mappers in sequence
    All,
}

pub async fn execute(cmd: MapCommands, db_path: &Path) -> Result<()> {
    let pool = DbPool::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match cmd {
        MapCommands::Workflows => cmd_map_workflows(&pool),
        MapCommands::Agents => cmd_map_agents(&pool),
        MapCommands::All => {
            cmd_map_workflows(&pool)?;
            println!();
            cmd_map_agents(&pool)
        }
    }
}

fn cmd_map_workflows(pool: &DbPool) -> Result<()> {
    println!("{}", "Mapping workflows to data entities...".bold());
    println!();

    let report = mapping::map_workflows(pool).context("Workflow mapping failed")?;
    output::print_outcomes(&report);
    output::print_summary("workflows", &report);

    let counts = mappings::workflow_mapping_counts(pool)?;
    output::print_distribution(&counts, "workflows", true);

    Ok(())
}

fn cmd_map_agents(pool: &DbPool) -> Result<()> {
    println!("{}", "Mapping agents to data entities...".bold());
    println!();

    let report = mapping::map_agents(pool).context("Agent mapping failed")?;
    output::print_outcomes(&report);
    output::print_summary("agents", &report);

    let counts = mappings::agent_mapping_counts(pool)?;
    output::print_distribution(&counts, "agents", false);

    let critical = mappings::critical_agent_mappings(pool)?;
    output::print_critical_agents(&critical);

    Ok(())
}
