//! Agent synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Agent) keyed by id, code kept unique
//! - (:Agent)-[:IMPLEMENTS]->(:Workflow)
//! - (:Agent)-[:COLLABORATES_WITH]->(:Agent) by agent code

use anyhow::Result;
use neo4rs::Query;
use tracing::{debug, warn};

use aero_db::queries::agents;
use aero_db::DbPool;

use super::SyncResult;
use crate::GraphClient;

/// Mirror all agent rows as Agent nodes with IMPLEMENTS edges.
pub async fn sync_agents(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let rows =
        agents::list_agents(db).map_err(|e| anyhow::anyhow!("Failed to list agents: {}", e))?;

    let mut result = SyncResult::default();

    for agent in &rows {
        let query = Query::new(
            "MERGE (a:Agent {id: $id})
             SET a.code = $code,
                 a.name = $name,
                 a.agent_type = $agent_type,
                 a.description = $description,
                 a.capabilities = $capabilities,
                 a.autonomy_level = $autonomy_level,
                 a.decision_complexity = $decision_complexity,
                 a.input_systems = $input_systems,
                 a.output_systems = $output_systems,
                 a.technology_stack = $technology_stack,
                 a.model_type = $model_type,
                 a.collaboration_pattern = $collaboration_pattern"
                .to_string(),
        )
        .param("id", agent.id.to_string())
        .param("code", agent.code.as_str())
        .param("name", agent.name.as_str())
        .param("agent_type", agent.agent_type.as_deref().unwrap_or(""))
        .param("description", agent.description.as_deref().unwrap_or(""))
        .param("capabilities", agent.capabilities.as_deref().unwrap_or(""))
        .param(
            "autonomy_level",
            agent.autonomy_level.as_deref().unwrap_or(""),
        )
        .param(
            "decision_complexity",
            agent.decision_complexity.as_deref().unwrap_or(""),
        )
        .param(
            "input_systems",
            agent.input_systems.as_deref().unwrap_or(""),
        )
        .param(
            "output_systems",
            agent.output_systems.as_deref().unwrap_or(""),
        )
        .param(
            "technology_stack",
            agent.technology_stack.as_deref().unwrap_or(""),
        )
        .param("model_type", agent.model_type.as_deref().unwrap_or(""))
        .param(
            "collaboration_pattern",
            agent.collaboration_pattern.as_deref().unwrap_or(""),
        );

        client.execute(query).await?;
        result.nodes_merged += 1;

        // IMPLEMENTS Workflow (if workflow_id is set)
        if let Some(workflow_id) = agent.workflow_id {
            let rel_query = Query::new(
                "MATCH (a:Agent {id: $agent_id}), (w:Workflow {id: $workflow_id})
                 MERGE (a)-[:IMPLEMENTS]->(w)"
                    .to_string(),
            )
            .param("agent_id", agent.id.to_string())
            .param("workflow_id", workflow_id.to_string());

            client.execute(rel_query).await?;
            result.relationships_merged += 1;
        }

        debug!(agent_id = agent.id, code = %agent.code, "Synced agent");
    }

    Ok(result)
}

/// Mirror COLLABORATES_WITH edges between agents, matched by code.
pub async fn sync_collaborations(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let rows =
        agents::list_agents(db).map_err(|e| anyhow::anyhow!("Failed to list agents: {}", e))?;

    let mut result = SyncResult::default();

    for agent in &rows {
        for collab_code in collaborator_codes(agent.id, agent.collaborates_with.as_deref()) {
            let query = Query::new(
                "MATCH (a1:Agent {code: $agent_code})
                 MATCH (a2:Agent {code: $collab_code})
                 MERGE (a1)-[:COLLABORATES_WITH]->(a2)"
                    .to_string(),
            )
            .param("agent_code", agent.code.as_str())
            .param("collab_code", collab_code.as_str());

            client.execute(query).await?;
            result.relationships_merged += 1;
        }
    }

    Ok(result)
}

/// Decode the collaborates_with JSON array of agent codes.
///
/// Malformed JSON is logged and treated as no collaborators.
fn collaborator_codes(agent_id: i64, raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(json) => match serde_json::from_str::<Vec<String>>(json) {
            Ok(codes) => codes,
            Err(e) => {
                warn!(agent_id, error = %e, "Malformed collaborates_with list, skipping");
                Vec::new()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_codes_decodes_list() {
        let codes = collaborator_codes(1, Some(r#"["AGT-002", "AGT-003"]"#));
        assert_eq!(codes, vec!["AGT-002", "AGT-003"]);
    }

    #[test]
    fn test_collaborator_codes_empty_cases() {
        assert!(collaborator_codes(1, None).is_empty());
        assert!(collaborator_codes(1, Some("[]")).is_empty());
    }

    #[test]
    fn test_collaborator_codes_malformed_json() {
        assert!(collaborator_codes(1, Some("not json")).is_empty());
        assert!(collaborator_codes(1, Some(r#"{"a": 1}"#)).is_empty());
    }
}
