//! Domain hierarchy synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Domain) keyed by name
//! - (:Subdomain {name, domain})-[:BELONGS_TO]->(:Domain)
//! - (:Workflow)-[:IN_DOMAIN]->(:Domain)
//! - (:Workflow)-[:IN_SUBDOMAIN]->(:Subdomain)

use std::collections::BTreeSet;

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use aero_db::queries::workflows::{self, WorkflowRow};
use aero_db::DbPool;

use super::SyncResult;
use crate::GraphClient;

/// Unique domains and (domain, subdomain) pairs from workflow rows,
/// sorted, empty values excluded.
fn collect_hierarchy(rows: &[WorkflowRow]) -> (BTreeSet<String>, BTreeSet<(String, String)>) {
    let mut domains = BTreeSet::new();
    let mut subdomains = BTreeSet::new();

    for row in rows {
        let domain = match row.domain.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => continue,
        };
        domains.insert(domain.to_string());

        if let Some(subdomain) = row.subdomain.as_deref() {
            if !subdomain.is_empty() {
                subdomains.insert((domain.to_string(), subdomain.to_string()));
            }
        }
    }

    (domains, subdomains)
}

/// Mirror the domain hierarchy and link workflows into it.
pub async fn sync_domains(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let rows = workflows::list_workflows(db)
        .map_err(|e| anyhow::anyhow!("Failed to list workflows: {}", e))?;

    let (domains, subdomains) = collect_hierarchy(&rows);
    let mut result = SyncResult::default();

    for domain in &domains {
        let query = Query::new("MERGE (d:Domain {name: $name})".to_string())
            .param("name", domain.as_str());
        client.execute(query).await?;
        result.nodes_merged += 1;
    }
    debug!(count = domains.len(), "Synced domains");

    for (domain, subdomain) in &subdomains {
        let query = Query::new(
            "MERGE (sd:Subdomain {name: $subdomain, domain: $domain})
             WITH sd
             MATCH (d:Domain {name: $domain})
             MERGE (sd)-[:BELONGS_TO]->(d)"
                .to_string(),
        )
        .param("subdomain", subdomain.as_str())
        .param("domain", domain.as_str());

        client.execute(query).await?;
        result.nodes_merged += 1;
        result.relationships_merged += 1;
    }
    debug!(count = subdomains.len(), "Synced subdomains");

    // Link each workflow by id rather than by matching domain
    // attributes, so rows with a domain but no subdomain still get
    // their IN_DOMAIN edge.
    for row in &rows {
        let domain = match row.domain.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => continue,
        };

        let query = Query::new(
            "MATCH (w:Workflow {id: $id})
             MATCH (d:Domain {name: $domain})
             MERGE (w)-[:IN_DOMAIN]->(d)"
                .to_string(),
        )
        .param("id", row.id.to_string())
        .param("domain", domain);

        client.execute(query).await?;
        result.relationships_merged += 1;

        if let Some(subdomain) = row.subdomain.as_deref() {
            if !subdomain.is_empty() {
                let query = Query::new(
                    "MATCH (w:Workflow {id: $id})
                     MATCH (sd:Subdomain {name: $subdomain, domain: $domain})
                     MERGE (w)-[:IN_SUBDOMAIN]->(sd)"
                        .to_string(),
                )
                .param("id", row.id.to_string())
                .param("subdomain", subdomain)
                .param("domain", domain);

                client.execute(query).await?;
                result.relationships_merged += 1;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, domain: Option<&str>, subdomain: Option<&str>) -> WorkflowRow {
        WorkflowRow {
            id,
            code: None,
            name: format!("wf-{}", id),
            domain: domain.map(String::from),
            subdomain: subdomain.map(String::from),
            description: None,
            summary: None,
        }
    }

    #[test]
    fn test_collect_hierarchy_dedupes_and_sorts() {
        let rows = vec![
            row(1, Some("Flight Operations"), Some("Disruption Management")),
            row(2, Some("Flight Operations"), Some("Dispatch")),
            row(3, Some("Flight Operations"), Some("Disruption Management")),
            row(4, Some("Baggage"), None),
        ];

        let (domains, subdomains) = collect_hierarchy(&rows);
        assert_eq!(
            domains.into_iter().collect::<Vec<_>>(),
            vec!["Baggage", "Flight Operations"]
        );
        assert_eq!(
            subdomains.into_iter().collect::<Vec<_>>(),
            vec![
                ("Flight Operations".into(), "Dispatch".into()),
                ("Flight Operations".into(), "Disruption Management".into()),
            ]
        );
    }

    #[test]
    fn test_collect_hierarchy_skips_empty_values() {
        let rows = vec![
            row(1, None, Some("Orphan Subdomain")),
            row(2, Some(""), Some("Also Orphan")),
            row(3, Some("Loyalty"), Some("")),
        ];

        let (domains, subdomains) = collect_hierarchy(&rows);
        assert_eq!(domains.into_iter().collect::<Vec<_>>(), vec!["Loyalty"]);
        assert!(subdomains.is_empty());
    }
}
