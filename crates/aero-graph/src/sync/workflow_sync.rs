//! Workflow and workflow version synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Workflow) keyed by id
//! - (:Workflow)-[:HAS_VERSION]->(:WorkflowVersion)
//!
//! Node ids are the relational ids rendered as strings.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use aero_db::queries::workflows;
use aero_db::DbPool;

use super::SyncResult;
use crate::GraphClient;

/// Mirror all workflow rows as Workflow nodes.
pub async fn sync_workflows(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let rows = workflows::list_workflows(db)
        .map_err(|e| anyhow::anyhow!("Failed to list workflows: {}", e))?;

    let mut result = SyncResult::default();

    for workflow in &rows {
        let query = Query::new(
            "MERGE (w:Workflow {id: $id})
             SET w.code = $code,
                 w.name = $name,
                 w.domain = $domain,
                 w.subdomain = $subdomain,
                 w.description = $description,
                 w.summary = $summary"
                .to_string(),
        )
        .param("id", workflow.id.to_string())
        .param("code", workflow.code.as_deref().unwrap_or(""))
        .param("name", workflow.name.as_str())
        .param("domain", workflow.domain.as_deref().unwrap_or(""))
        .param("subdomain", workflow.subdomain.as_deref().unwrap_or(""))
        .param("description", workflow.description.as_deref().unwrap_or(""))
        .param("summary", workflow.summary.as_deref().unwrap_or(""));

        client.execute(query).await?;
        result.nodes_merged += 1;

        debug!(workflow_id = workflow.id, name = %workflow.name, "Synced workflow");
    }

    Ok(result)
}

/// Mirror workflow versions and their HAS_VERSION edges.
///
/// The MATCH on the parent workflow comes first, so a version whose
/// workflow is missing from the graph is skipped entirely.
pub async fn sync_versions(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let rows = workflows::list_workflow_versions(db)
        .map_err(|e| anyhow::anyhow!("Failed to list workflow versions: {}", e))?;

    let mut result = SyncResult::default();

    for version in &rows {
        let query = Query::new(
            "MATCH (w:Workflow {id: $workflow_id})
             MERGE (v:WorkflowVersion {id: $id})
             SET v.workflow_name = $workflow_name,
                 v.domain = $domain,
                 v.subdomain = $subdomain,
                 v.agentic_potential = $agentic_potential,
                 v.complexity = $complexity,
                 v.autonomy_level = $autonomy_level,
                 v.transformation_theme = $transformation_theme,
                 v.ai_enabler_type = $ai_enabler_type,
                 v.expected_roi_levers = $expected_roi_levers,
                 v.operational_metrics_targeted = $operational_metrics_targeted,
                 v.technology_stack = $technology_stack,
                 v.agent_collaboration_pattern = $agent_collaboration_pattern,
                 v.implementation_wave = $implementation_wave
             MERGE (w)-[:HAS_VERSION]->(v)"
                .to_string(),
        )
        .param("id", version.id.to_string())
        .param("workflow_id", version.workflow_id.to_string())
        .param(
            "workflow_name",
            version.workflow_name.as_deref().unwrap_or(""),
        )
        .param("domain", version.domain.as_deref().unwrap_or(""))
        .param("subdomain", version.subdomain.as_deref().unwrap_or(""))
        .param("agentic_potential", version.agentic_potential.unwrap_or(0))
        .param("complexity", version.complexity.as_deref().unwrap_or(""))
        .param(
            "autonomy_level",
            version.autonomy_level.as_deref().unwrap_or(""),
        )
        .param(
            "transformation_theme",
            version.transformation_theme.as_deref().unwrap_or(""),
        )
        .param(
            "ai_enabler_type",
            version.ai_enabler_type.as_deref().unwrap_or(""),
        )
        .param(
            "expected_roi_levers",
            version.expected_roi_levers.as_deref().unwrap_or(""),
        )
        .param(
            "operational_metrics_targeted",
            version.operational_metrics_targeted.as_deref().unwrap_or(""),
        )
        .param(
            "technology_stack",
            version.technology_stack.as_deref().unwrap_or(""),
        )
        .param(
            "agent_collaboration_pattern",
            version.agent_collaboration_pattern.as_deref().unwrap_or(""),
        )
        .param(
            "implementation_wave",
            version.implementation_wave.as_deref().unwrap_or(""),
        );

        client.execute(query).await?;
        result.nodes_merged += 1;
        result.relationships_merged += 1;

        debug!(
            version_id = version.id,
            workflow_id = version.workflow_id,
            "Synced workflow version"
        );
    }

    Ok(result)
}
