//! Workflow and agent data-mapping queries.
//!
//! Mapping rows are keyed UNIQUE(source_id, data_entity_id); upserts
//! refresh the access metadata and leave created_at alone.

use rusqlite::{params, OptionalExtension};

use crate::pool::{DbError, DbPool, DbResult};

/// Workflow mapping row from database.
#[derive(Debug, Clone)]
pub struct WorkflowMappingRow {
    pub workflow_id: i64,
    pub data_entity_id: i64,
    pub access_type: String,
    pub is_primary_data: bool,
    pub volume_estimate: Option<String>,
    pub latency_requirement: Option<String>,
    pub created_at: String,
}

/// Agent mapping row from database.
#[derive(Debug, Clone)]
pub struct AgentMappingRow {
    pub agent_id: i64,
    pub data_entity_id: i64,
    pub access_pattern: String,
    pub latency_requirement: Option<String>,
    pub query_frequency: Option<String>,
    pub is_critical: bool,
    pub created_at: String,
}

/// Insert or refresh a workflow -> data entity mapping.
pub fn upsert_workflow_mapping(
    pool: &DbPool,
    workflow_id: i64,
    data_entity_id: i64,
    access_type: &str,
    is_primary_data: bool,
    volume_estimate: &str,
    latency_requirement: &str,
) -> DbResult<()> {
    let created_at = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO workflow_data_mappings
                 (workflow_id, data_entity_id, access_type, is_primary_data,
                  volume_estimate, latency_requirement, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(workflow_id, data_entity_id) DO UPDATE SET
                 access_type = excluded.access_type,
                 is_primary_data = excluded.is_primary_data,
                 volume_estimate = excluded.volume_estimate,
                 latency_requirement = excluded.latency_requirement",
            params![
                workflow_id,
                data_entity_id,
                access_type,
                is_primary_data,
                volume_estimate,
                latency_requirement,
                created_at
            ],
        )?;
        Ok(())
    })
}

/// Insert or refresh an agent -> data entity mapping.
pub fn upsert_agent_mapping(
    pool: &DbPool,
    agent_id: i64,
    data_entity_id: i64,
    access_pattern: &str,
    latency_requirement: &str,
    query_frequency: &str,
    is_critical: bool,
) -> DbResult<()> {
    let created_at = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO agent_data_mappings
                 (agent_id, data_entity_id, access_pattern, latency_requirement,
                  query_frequency, is_critical, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(agent_id, data_entity_id) DO UPDATE SET
                 access_pattern = excluded.access_pattern,
                 latency_requirement = excluded.latency_requirement,
                 query_frequency = excluded.query_frequency,
                 is_critical = excluded.is_critical",
            params![
                agent_id,
                data_entity_id,
                access_pattern,
                latency_requirement,
                query_frequency,
                is_critical,
                created_at
            ],
        )?;
        Ok(())
    })
}

/// Get a workflow mapping by its unique key, if present.
pub fn get_workflow_mapping(
    pool: &DbPool,
    workflow_id: i64,
    data_entity_id: i64,
) -> DbResult<Option<WorkflowMappingRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT workflow_id, data_entity_id, access_type, is_primary_data,
                    volume_estimate, latency_requirement, created_at
             FROM workflow_data_mappings
             WHERE workflow_id = ?1 AND data_entity_id = ?2",
            params![workflow_id, data_entity_id],
            |row| {
                Ok(WorkflowMappingRow {
                    workflow_id: row.get(0)?,
                    data_entity_id: row.get(1)?,
                    access_type: row.get(2)?,
                    is_primary_data: row.get(3)?,
                    volume_estimate: row.get(4)?,
                    latency_requirement: row.get(5)?,
                    created_at: row.get(6)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// Get an agent mapping by its unique key, if present.
pub fn get_agent_mapping(
    pool: &DbPool,
    agent_id: i64,
    data_entity_id: i64,
) -> DbResult<Option<AgentMappingRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT agent_id, data_entity_id, access_pattern, latency_requirement,
                    query_frequency, is_critical, created_at
             FROM agent_data_mappings
             WHERE agent_id = ?1 AND data_entity_id = ?2",
            params![agent_id, data_entity_id],
            |row| {
                Ok(AgentMappingRow {
                    agent_id: row.get(0)?,
                    data_entity_id: row.get(1)?,
                    access_pattern: row.get(2)?,
                    latency_requirement: row.get(3)?,
                    query_frequency: row.get(4)?,
                    is_critical: row.get(5)?,
                    created_at: row.get(6)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// Per-entity workflow mapping counts, zeros included.
pub fn workflow_mapping_counts(pool: &DbPool) -> DbResult<Vec<(String, i64)>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT e.code, COUNT(m.id)
             FROM data_entities e
             LEFT JOIN workflow_data_mappings m ON m.data_entity_id = e.id
             GROUP BY e.code ORDER BY e.code",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Per-entity agent mapping counts, zeros included.
pub fn agent_mapping_counts(pool: &DbPool) -> DbResult<Vec<(String, i64)>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT e.code, COUNT(m.id)
             FROM data_entities e
             LEFT JOIN agent_data_mappings m ON m.data_entity_id = e.id
             GROUP BY e.code ORDER BY e.code",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Agent name plus entity code for a critical mapping.
#[derive(Debug, Clone)]
pub struct CriticalMappingRow {
    pub agent_name: String,
    pub entity_code: String,
}

/// List critical agent mappings, agent order then entity code.
pub fn critical_agent_mappings(pool: &DbPool) -> DbResult<Vec<CriticalMappingRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT a.name, e.code
             FROM agent_data_mappings m
             JOIN agents a ON a.id = m.agent_id
             JOIN data_entities e ON e.id = m.data_entity_id
             WHERE m.is_critical = 1
             ORDER BY a.id, e.code",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CriticalMappingRow {
                agent_name: row.get(0)?,
                entity_code: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count workflow mapping rows.
pub fn count_workflow_mappings(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM workflow_data_mappings", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
}

/// Count agent mapping rows.
pub fn count_agent_mappings(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM agent_data_mappings", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn seed(pool: &DbPool) {
        pool.with_conn(|conn| {
            conn.execute_batch(
                "INSERT INTO workflows (id, code, name) VALUES (1, 'WF-001', 'Delay Recovery');
                 INSERT INTO agents (id, code, name, active) VALUES (1, 'AGT-001', 'Rebooking Agent', 1);
                 INSERT INTO data_entities (id, code, name) VALUES (1, 'FLIFO', 'Flight Information');
                 INSERT INTO data_entities (id, code, name) VALUES (2, 'PNR', 'Passenger Name Record');",
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_upsert_workflow_mapping_refreshes_metadata() {
        let pool = test_pool();
        seed(&pool);

        upsert_workflow_mapping(&pool, 1, 1, "read", false, "low", "batch").unwrap();
        let first = get_workflow_mapping(&pool, 1, 1).unwrap().unwrap();
        assert_eq!(first.access_type, "read");
        assert!(!first.is_primary_data);

        upsert_workflow_mapping(&pool, 1, 1, "read_write", true, "high", "real-time").unwrap();
        let second = get_workflow_mapping(&pool, 1, 1).unwrap().unwrap();
        assert_eq!(second.access_type, "read_write");
        assert!(second.is_primary_data);
        assert_eq!(second.volume_estimate.as_deref(), Some("high"));
        assert_eq!(second.created_at, first.created_at);

        assert_eq!(count_workflow_mappings(&pool).unwrap(), 1);
    }

    #[test]
    fn test_upsert_agent_mapping_refreshes_metadata() {
        let pool = test_pool();
        seed(&pool);

        upsert_agent_mapping(&pool, 1, 2, "on_demand", "near-real-time", "per_minute", false)
            .unwrap();
        upsert_agent_mapping(&pool, 1, 2, "stream", "real-time", "continuous", true).unwrap();

        let row = get_agent_mapping(&pool, 1, 2).unwrap().unwrap();
        assert_eq!(row.access_pattern, "stream");
        assert!(row.is_critical);
        assert_eq!(count_agent_mappings(&pool).unwrap(), 1);
    }

    #[test]
    fn test_mapping_counts_include_zero_entities() {
        let pool = test_pool();
        seed(&pool);

        upsert_workflow_mapping(&pool, 1, 1, "read_write", true, "high", "real-time").unwrap();

        let counts = workflow_mapping_counts(&pool).unwrap();
        assert_eq!(counts, vec![("FLIFO".into(), 1), ("PNR".into(), 0)]);

        let agent_counts = agent_mapping_counts(&pool).unwrap();
        assert_eq!(agent_counts, vec![("FLIFO".into(), 0), ("PNR".into(), 0)]);
    }

    #[test]
    fn test_critical_agent_mappings() {
        let pool = test_pool();
        seed(&pool);

        upsert_agent_mapping(&pool, 1, 1, "stream", "real-time", "continuous", true).unwrap();
        upsert_agent_mapping(&pool, 1, 2, "batch", "batch", "per_day", false).unwrap();

        let critical = critical_agent_mappings(&pool).unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].agent_name, "Rebooking Agent");
        assert_eq!(critical[0].entity_code, "FLIFO");
    }

    #[test]
    fn test_missing_mapping_returns_none() {
        let pool = test_pool();
        seed(&pool);
        assert!(get_workflow_mapping(&pool, 1, 2).unwrap().is_none());
        assert!(get_agent_mapping(&pool, 1, 1).unwrap().is_none());
    }
}
