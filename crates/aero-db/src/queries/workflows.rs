//! Workflow-related database queries.

use crate::pool::{DbError, DbPool, DbResult};

/// Workflow row from database.
#[derive(Debug, Clone)]
pub struct WorkflowRow {
    pub id: i64,
    pub code: Option<String>,
    pub name: String,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
}

/// Workflow version row from database.
#[derive(Debug, Clone)]
pub struct WorkflowVersionRow {
    pub id: i64,
    pub workflow_id: i64,
    pub workflow_name: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub agentic_potential: Option<i64>,
    pub complexity: Option<String>,
    pub autonomy_level: Option<String>,
    pub transformation_theme: Option<String>,
    pub ai_enabler_type: Option<String>,
    pub expected_roi_levers: Option<String>,
    pub operational_metrics_targeted: Option<String>,
    pub technology_stack: Option<String>,
    pub agent_collaboration_pattern: Option<String>,
    pub implementation_wave: Option<String>,
}

fn workflow_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkflowRow> {
    Ok(WorkflowRow {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        domain: row.get(3)?,
        subdomain: row.get(4)?,
        description: row.get(5)?,
        summary: row.get(6)?,
    })
}

/// List all workflows.
pub fn list_workflows(pool: &DbPool) -> DbResult<Vec<WorkflowRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, code, name, domain, subdomain, description, summary
             FROM workflows ORDER BY id",
        )?;
        let rows = stmt.query_map([], workflow_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List workflows that have not been archived.
pub fn list_active_workflows(pool: &DbPool) -> DbResult<Vec<WorkflowRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, code, name, domain, subdomain, description, summary
             FROM workflows WHERE archived_at IS NULL ORDER BY id",
        )?;
        let rows = stmt.query_map([], workflow_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List all workflow versions.
pub fn list_workflow_versions(pool: &DbPool) -> DbResult<Vec<WorkflowVersionRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, workflow_id, workflow_name, domain, subdomain, agentic_potential,
                    complexity, autonomy_level, transformation_theme, ai_enabler_type,
                    expected_roi_levers, operational_metrics_targeted, technology_stack,
                    agent_collaboration_pattern, implementation_wave
             FROM workflow_versions ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(WorkflowVersionRow {
                id: row.get(0)?,
                workflow_id: row.get(1)?,
                workflow_name: row.get(2)?,
                domain: row.get(3)?,
                subdomain: row.get(4)?,
                agentic_potential: row.get(5)?,
                complexity: row.get(6)?,
                autonomy_level: row.get(7)?,
                transformation_theme: row.get(8)?,
                ai_enabler_type: row.get(9)?,
                expected_roi_levers: row.get(10)?,
                operational_metrics_targeted: row.get(11)?,
                technology_stack: row.get(12)?,
                agent_collaboration_pattern: row.get(13)?,
                implementation_wave: row.get(14)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count workflow rows.
pub fn count_workflows(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM workflows", [], |row| row.get(0))?;
        Ok(count)
    })
}

/// Count workflow version rows.
pub fn count_workflow_versions(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM workflow_versions", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use rusqlite::params;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn insert_workflow(pool: &DbPool, id: i64, name: &str, archived_at: Option<&str>) {
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO workflows (id, code, name, domain, archived_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, format!("WF-{:03}", id), name, "Flight Operations", archived_at],
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_list_active_workflows_skips_archived() {
        let pool = test_pool();
        insert_workflow(&pool, 1, "Delay Recovery", None);
        insert_workflow(&pool, 2, "Retired Flow", Some("2026-01-01T00:00:00Z"));
        insert_workflow(&pool, 3, "Crew Scheduling", None);

        let active = list_active_workflows(&pool).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "Delay Recovery");
        assert_eq!(active[1].name, "Crew Scheduling");

        assert_eq!(list_workflows(&pool).unwrap().len(), 3);
        assert_eq!(count_workflows(&pool).unwrap(), 3);
    }

    #[test]
    fn test_list_workflow_versions() {
        let pool = test_pool();
        insert_workflow(&pool, 1, "Delay Recovery", None);
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO workflow_versions (id, workflow_id, workflow_name, agentic_potential, complexity)
                 VALUES (10, 1, 'Delay Recovery', 9, 'high')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let versions = list_workflow_versions(&pool).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].workflow_id, 1);
        assert_eq!(versions[0].agentic_potential, Some(9));
        assert_eq!(versions[0].implementation_wave, None);
        assert_eq!(count_workflow_versions(&pool).unwrap(), 1);
    }
}
