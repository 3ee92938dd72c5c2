//! Relational store CLI commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use aero_db::DbPool;

#[derive(Subcommand)]
pub enum DbCommands {
    /// Create or upgrade the SQLite schema
    Migrate,
}

pub async fn execute(cmd: DbCommands, db_path: &Path) -> Result<()> {
    match cmd {
        DbCommands::Migrate => cmd_migrate(db_path),
    }
}

fn cmd_migrate(db_path: &Path) -> Result<()> {
    let pool = DbPool::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    aero_db::run_migrations(&pool).context("Failed to run migrations")?;

    println!("{} Database ready at {}", "✓".green(), db_path.display());

    Ok(())
}
