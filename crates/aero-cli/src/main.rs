//! Aero CLI - Airline Workflow Data Platform
//!
//! Batch tooling for the airline workflow catalog: the workflow/agent
//! entity mapper and the Neo4j knowledge graph mirror.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aero=info,aero_core=info,aero_db=info,aero_graph=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    Cli::parse().execute().await
}
