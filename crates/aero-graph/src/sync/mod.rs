//! Relational store to Neo4j mirror pipeline.
//!
//! Mirrors workflows, workflow versions, and agents as nodes, builds
//! the domain hierarchy, then links company opportunity edges. Every
//! write is a MERGE on a stable key, so reruns converge instead of
//! duplicating.

pub mod agent_sync;
pub mod domain_sync;
pub mod opportunities;
pub mod workflow_sync;

use anyhow::{Context, Result};
use neo4rs::Query;
use tracing::info;

use aero_db::DbPool;

use crate::GraphClient;
use opportunities::OpportunityOutcome;

/// Result of one mirror phase.
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    pub nodes_merged: usize,
    pub relationships_merged: usize,
}

impl SyncResult {
    fn merge(&mut self, other: &SyncResult) {
        self.nodes_merged += other.nodes_merged;
        self.relationships_merged += other.relationships_merged;
    }
}

/// Totals for a full mirror run.
#[derive(Debug, Clone)]
pub struct FullSyncReport {
    pub totals: SyncResult,
    pub opportunities: Vec<OpportunityOutcome>,
}

/// Run the full mirror from the relational store to Neo4j.
///
/// Phase order matters: edges are MATCH + MERGE, so an edge written
/// before both endpoints exist is silently dropped.
pub async fn run_full_sync(client: &GraphClient, db: &DbPool) -> Result<FullSyncReport> {
    info!("Starting full graph sync");

    let mut totals = SyncResult::default();

    let workflow_result = workflow_sync::sync_workflows(client, db)
        .await
        .context("Failed to sync workflows")?;
    info!(nodes = workflow_result.nodes_merged, "Workflows synced");
    totals.merge(&workflow_result);

    let version_result = workflow_sync::sync_versions(client, db)
        .await
        .context("Failed to sync workflow versions")?;
    info!(
        nodes = version_result.nodes_merged,
        rels = version_result.relationships_merged,
        "Workflow versions synced"
    );
    totals.merge(&version_result);

    let agent_result = agent_sync::sync_agents(client, db)
        .await
        .context("Failed to sync agents")?;
    info!(
        nodes = agent_result.nodes_merged,
        rels = agent_result.relationships_merged,
        "Agents synced"
    );
    totals.merge(&agent_result);

    let collab_result = agent_sync::sync_collaborations(client, db)
        .await
        .context("Failed to sync agent collaborations")?;
    info!(
        rels = collab_result.relationships_merged,
        "Agent collaborations synced"
    );
    totals.merge(&collab_result);

    let domain_result = domain_sync::sync_domains(client, db)
        .await
        .context("Failed to sync domain hierarchy")?;
    info!(
        nodes = domain_result.nodes_merged,
        rels = domain_result.relationships_merged,
        "Domain hierarchy synced"
    );
    totals.merge(&domain_result);

    let opportunities = opportunities::link_opportunities(client)
        .await
        .context("Failed to link company opportunities")?;
    let linked: i64 = opportunities.iter().map(|o| o.linked).sum();
    info!(linked, "Company opportunities linked");
    totals.relationships_merged += linked as usize;

    info!(
        nodes = totals.nodes_merged,
        relationships = totals.relationships_merged,
        "Full sync complete"
    );

    Ok(FullSyncReport {
        totals,
        opportunities,
    })
}

/// Per-label node counts plus the opportunity edge count.
#[derive(Debug, Clone, Default)]
pub struct GraphSummary {
    pub workflows: i64,
    pub versions: i64,
    pub agents: i64,
    pub domains: i64,
    pub subdomains: i64,
    pub opportunities: i64,
}

/// Query the per-label summary shown after a sync and by `graph status`.
pub async fn summary_counts(client: &GraphClient) -> Result<GraphSummary> {
    async fn count(client: &GraphClient, cypher: &str) -> Result<i64> {
        let value = client
            .query_scalar(Query::new(cypher.to_string()), "count")
            .await?;
        Ok(value.unwrap_or(0))
    }

    Ok(GraphSummary {
        workflows: count(client, "MATCH (w:Workflow) RETURN count(w) as count").await?,
        versions: count(client, "MATCH (v:WorkflowVersion) RETURN count(v) as count").await?,
        agents: count(client, "MATCH (a:Agent) RETURN count(a) as count").await?,
        domains: count(client, "MATCH (d:Domain) RETURN count(d) as count").await?,
        subdomains: count(client, "MATCH (s:Subdomain) RETURN count(s) as count").await?,
        opportunities: count(
            client,
            "MATCH ()-[r:OPPORTUNITY_FOR]->() RETURN count(r) as count",
        )
        .await?,
    })
}
