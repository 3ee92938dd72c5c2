//! Entity mapping pipelines.
//!
//! Fetch source records, run the keyword matcher, resolve entity codes
//! against the catalog, and upsert association rows. Unresolved codes
//! and per-row write failures are logged and counted; the batch keeps
//! going.

pub mod matcher;
pub mod rules;

use aero_db::queries::{agents, data_entities, mappings, workflows};
use aero_db::DbPool;
use tracing::warn;

use crate::error::CoreResult;
use matcher::{match_agent, match_workflow};

/// One association written for a source record.
#[derive(Debug, Clone)]
pub struct CreatedMapping {
    pub entity: String,
    pub detail: String,
    pub critical: bool,
}

/// Per-record outcome, in batch order. `unresolved` and `failed` hold
/// the entity codes that hit each condition.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub source_id: i64,
    pub name: String,
    pub created: Vec<CreatedMapping>,
    pub unresolved: Vec<String>,
    pub failed: Vec<String>,
}

/// Batch report for one mapper run.
#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    pub total_records: usize,
    pub records_mapped: usize,
    pub mappings_created: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl MappingReport {
    /// Records the matcher produced no tuples for.
    pub fn records_not_mapped(&self) -> usize {
        self.total_records - self.records_mapped
    }
}

/// Map active workflows to data entities.
pub fn map_workflows(pool: &DbPool) -> CoreResult<MappingReport> {
    let records = workflows::list_active_workflows(pool)?;
    let entity_index = data_entities::entity_code_index(pool)?;

    let mut report = MappingReport {
        total_records: records.len(),
        ..Default::default()
    };

    for record in &records {
        let matches = match_workflow(&record.name, record.description.as_deref());
        if matches.is_empty() {
            continue;
        }

        report.records_mapped += 1;
        let mut outcome = RecordOutcome {
            source_id: record.id,
            name: record.name.clone(),
            created: Vec::new(),
            unresolved: Vec::new(),
            failed: Vec::new(),
        };

        for m in matches {
            let entity_id = match entity_index.get(m.entity) {
                Some(id) => *id,
                None => {
                    warn!(
                        workflow_id = record.id,
                        entity = m.entity,
                        "unknown data entity code, skipping"
                    );
                    outcome.unresolved.push(m.entity.to_string());
                    report.unresolved += 1;
                    continue;
                }
            };

            match mappings::upsert_workflow_mapping(
                pool,
                record.id,
                entity_id,
                m.access_type.as_str(),
                m.is_primary,
                m.volume.as_str(),
                m.latency.as_str(),
            ) {
                Ok(()) => {
                    outcome.created.push(CreatedMapping {
                        entity: m.entity.to_string(),
                        detail: format!("{}, {}", m.access_type.as_str(), m.latency.as_str()),
                        critical: false,
                    });
                    report.mappings_created += 1;
                }
                Err(e) => {
                    warn!(
                        workflow_id = record.id,
                        entity = m.entity,
                        error = %e,
                        "failed to create workflow mapping"
                    );
                    outcome.failed.push(m.entity.to_string());
                    report.failed += 1;
                }
            }
        }

        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Map active agents to data entities.
pub fn map_agents(pool: &DbPool) -> CoreResult<MappingReport> {
    let records = agents::list_active_agents(pool)?;
    let entity_index = data_entities::entity_code_index(pool)?;

    let mut report = MappingReport {
        total_records: records.len(),
        ..Default::default()
    };

    for record in &records {
        let matches = match_agent(
            &record.name,
            record.kind.as_deref(),
            record.description.as_deref(),
        );
        if matches.is_empty() {
            continue;
        }

        report.records_mapped += 1;
        let mut outcome = RecordOutcome {
            source_id: record.id,
            name: record.name.clone(),
            created: Vec::new(),
            unresolved: Vec::new(),
            failed: Vec::new(),
        };

        for m in matches {
            let entity_id = match entity_index.get(m.entity) {
                Some(id) => *id,
                None => {
                    warn!(
                        agent_id = record.id,
                        entity = m.entity,
                        "unknown data entity code, skipping"
                    );
                    outcome.unresolved.push(m.entity.to_string());
                    report.unresolved += 1;
                    continue;
                }
            };

            match mappings::upsert_agent_mapping(
                pool,
                record.id,
                entity_id,
                m.access_pattern.as_str(),
                m.latency.as_str(),
                m.frequency.as_str(),
                m.critical,
            ) {
                Ok(()) => {
                    outcome.created.push(CreatedMapping {
                        entity: m.entity.to_string(),
                        detail: format!(
                            "{}, {}, {}",
                            m.access_pattern.as_str(),
                            m.latency.as_str(),
                            m.frequency.as_str()
                        ),
                        critical: m.critical,
                    });
                    report.mappings_created += 1;
                }
                Err(e) => {
                    warn!(
                        agent_id = record.id,
                        entity = m.entity,
                        error = %e,
                        "failed to create agent mapping"
                    );
                    outcome.failed.push(m.entity.to_string());
                    report.failed += 1;
                }
            }
        }

        report.outcomes.push(outcome);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_db::run_migrations;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn seed_entities(pool: &DbPool, codes: &[(i64, &str)]) {
        pool.with_conn(|conn| {
            for (id, code) in codes {
                conn.execute(
                    "INSERT INTO data_entities (id, code, name) VALUES (?1, ?2, ?2)",
                    rusqlite::params![id, code],
                )?;
            }
            Ok(())
        })
        .unwrap();
    }

    fn seed_workflow(pool: &DbPool, id: i64, name: &str, description: Option<&str>) {
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO workflows (id, name, description) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, name, description],
            )?;
            Ok(())
        })
        .unwrap();
    }

    fn seed_agent(pool: &DbPool, id: i64, name: &str, active: bool) {
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO agents (id, code, name, active) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, format!("AGT-{:03}", id), name, active],
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_map_workflows_end_to_end() {
        let pool = test_pool();
        seed_entities(&pool, &[(1, "FLIFO"), (2, "PNR")]);
        seed_workflow(&pool, 1, "Flight Delay Rebooking for Disruption Management", None);
        seed_workflow(&pool, 2, "Loyalty Tier Review", None);
        seed_workflow(&pool, 3, "Quarterly Catering Review", None);

        let report = map_workflows(&pool).unwrap();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.records_mapped, 2);
        assert_eq!(report.records_not_mapped(), 1);
        assert_eq!(report.mappings_created, 2);
        // LOYALTY is not in the catalog here
        assert_eq!(report.unresolved, 1);
        assert_eq!(report.failed, 0);

        let flifo = mappings::get_workflow_mapping(&pool, 1, 1).unwrap().unwrap();
        assert_eq!(flifo.access_type, "read_write");
        assert_eq!(flifo.latency_requirement.as_deref(), Some("real-time"));
        assert!(flifo.is_primary_data);

        let pnr = mappings::get_workflow_mapping(&pool, 1, 2).unwrap().unwrap();
        assert_eq!(pnr.latency_requirement.as_deref(), Some("near-real-time"));

        assert_eq!(report.outcomes[0].created.len(), 2);
        assert_eq!(report.outcomes[0].created[0].entity, "FLIFO");
        assert_eq!(report.outcomes[0].created[0].detail, "read_write, real-time");
        assert_eq!(report.outcomes[1].unresolved, vec!["LOYALTY".to_string()]);
    }

    #[test]
    fn test_map_workflows_is_rerunnable() {
        let pool = test_pool();
        seed_entities(&pool, &[(1, "FLIFO")]);
        seed_workflow(&pool, 1, "Flight Dispatch Console", None);

        map_workflows(&pool).unwrap();
        let report = map_workflows(&pool).unwrap();
        assert_eq!(report.mappings_created, 1);
        assert_eq!(mappings::count_workflow_mappings(&pool).unwrap(), 1);
    }

    #[test]
    fn test_map_workflows_write_failure_does_not_abort() {
        let pool = test_pool();
        seed_entities(&pool, &[(1, "FLIFO"), (2, "PNR")]);
        seed_workflow(&pool, 1, "Flight Delay Rebooking for Disruption Management", None);

        pool.with_conn(|conn| {
            conn.execute_batch("DROP TABLE workflow_data_mappings")?;
            Ok(())
        })
        .unwrap();

        let report = map_workflows(&pool).unwrap();
        assert_eq!(report.records_mapped, 1);
        assert_eq!(report.mappings_created, 0);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn test_map_agents_end_to_end() {
        let pool = test_pool();
        seed_entities(
            &pool,
            &[(1, "FLIFO"), (2, "PNR"), (3, "INVENTORY"), (4, "BAGGAGE")],
        );
        seed_agent(&pool, 1, "Bag Tracking Agent", true);
        seed_agent(&pool, 2, "Rebooking Agent", true);
        seed_agent(&pool, 3, "Disruption Watcher", false);

        let report = map_agents(&pool).unwrap();
        // inactive agents are not fetched
        assert_eq!(report.total_records, 2);
        assert_eq!(report.records_mapped, 2);
        assert_eq!(report.mappings_created, 4);
        assert_eq!(report.unresolved, 0);

        let bag = mappings::get_agent_mapping(&pool, 1, 4).unwrap().unwrap();
        assert_eq!(bag.access_pattern, "stream");
        assert!(bag.is_critical);

        let critical = mappings::critical_agent_mappings(&pool).unwrap();
        assert_eq!(critical.len(), 4);

        let rebooking = &report.outcomes[1];
        assert_eq!(rebooking.created.len(), 3);
        assert_eq!(rebooking.created[0].entity, "PNR");
        assert_eq!(rebooking.created[0].detail, "stream, real-time, per_minute");
        assert!(rebooking.created[0].critical);
    }
}
