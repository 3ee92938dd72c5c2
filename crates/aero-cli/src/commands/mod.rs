//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod db;
pub mod graph;
pub mod map;

/// Aero - Airline Workflow Data Platform
#[derive(Parser)]
#[command(name = "aero")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "AERO_DB", default_value = "aero.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Relational store management
    #[command(subcommand)]
    Db(db::DbCommands),

    /// Map workflows and agents to data entities
    #[command(subcommand)]
    Map(map::MapCommands),

    /// Knowledge Graph commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Db(cmd) => db::execute(cmd, &self.db).await,
            Commands::Map(cmd) => map::execute(cmd, &self.db).await,
            Commands::Graph(cmd) => graph::execute(cmd, &self.db).await,
        }
    }
}
