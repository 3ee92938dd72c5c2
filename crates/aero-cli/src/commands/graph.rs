//! Knowledge Graph CLI commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use aero_db::queries::{agents, workflows};
use aero_db::DbPool;
use aero_graph::{GraphClient, GraphConfig};

use crate::output;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Check Neo4j connectivity
    Ping,

    /// Mirror workflows, agents, and domains into Neo4j
    Sync,

    /// Show graph status
    Status,
}

pub async fn execute(cmd: GraphCommands, db_path: &Path) -> Result<()> {
    let config = GraphConfig::from_env();

    match cmd {
        GraphCommands::Ping => cmd_ping(&config).await,
        GraphCommands::Sync => cmd_sync(&config, db_path).await,
        GraphCommands::Status => cmd_status(&config).await,
    }
}

/// Connectivity check. Exits non-zero when the graph store is down.
async fn cmd_ping(config: &GraphConfig) -> Result<()> {
    println!("Connecting to {}...", config.uri.cyan());

    match GraphClient::connect(config).await {
        Ok(_) => {
            println!("{}", "✓ Neo4j connection OK".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("✗ Neo4j connection failed: {:#}", e).red());
            std::process::exit(1);
        }
    }
}

/// Run the full mirror from SQLite to Neo4j.
async fn cmd_sync(config: &GraphConfig, db_path: &Path) -> Result<()> {
    println!("{}", "Syncing to the Knowledge Graph...".bold());

    let pool = DbPool::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    let client = GraphClient::connect(config).await?;

    aero_graph::initialize_schema(&client).await?;

    let workflow_count = workflows::count_workflows(&pool)?;
    let version_count = workflows::count_workflow_versions(&pool)?;
    let agent_count = agents::count_agents(&pool)?;
    println!(
        "  Source: {} workflows, {} versions, {} agents",
        workflow_count.to_string().cyan(),
        version_count.to_string().cyan(),
        agent_count.to_string().cyan()
    );

    let report = aero_graph::run_full_sync(&client, &pool).await?;

    println!("\n{}", "Sync complete:".green().bold());
    println!("  Nodes merged:         {}", report.totals.nodes_merged);
    println!(
        "  Relationships merged: {}",
        report.totals.relationships_merged
    );

    println!("\n{}", "Opportunity links:".bold());
    for outcome in &report.opportunities {
        println!("  {} {}: {}", "→".dimmed(), outcome.label, outcome.linked);
    }

    let summary = aero_graph::summary_counts(&client).await?;
    println!("\n{}", "Graph contents:".bold());
    output::print_graph_summary(&summary);

    Ok(())
}

/// Show node/relationship counts and the per-label breakdown.
async fn cmd_status(config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config).await?;

    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = client.get_counts().await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!();
    let summary = aero_graph::summary_counts(&client).await?;
    output::print_graph_summary(&summary);

    println!("{}", "─".repeat(40));

    Ok(())
}
