//! Agent-related database queries.

use crate::pool::{DbError, DbPool, DbResult};

/// Agent row from database.
///
/// `kind` maps the `type` column; `collaborates_with` holds a JSON
/// array of agent codes.
#[derive(Debug, Clone)]
pub struct AgentRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub agent_type: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub capabilities: Option<String>,
    pub autonomy_level: Option<String>,
    pub decision_complexity: Option<String>,
    pub input_systems: Option<String>,
    pub output_systems: Option<String>,
    pub technology_stack: Option<String>,
    pub model_type: Option<String>,
    pub collaboration_pattern: Option<String>,
    pub workflow_id: Option<i64>,
    pub collaborates_with: Option<String>,
    pub active: bool,
}

fn agent_from_row(row: &rusqlite::Row) -> rusqlite::Result<AgentRow> {
    Ok(AgentRow {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        agent_type: row.get(3)?,
        kind: row.get(4)?,
        description: row.get(5)?,
        capabilities: row.get(6)?,
        autonomy_level: row.get(7)?,
        decision_complexity: row.get(8)?,
        input_systems: row.get(9)?,
        output_systems: row.get(10)?,
        technology_stack: row.get(11)?,
        model_type: row.get(12)?,
        collaboration_pattern: row.get(13)?,
        workflow_id: row.get(14)?,
        collaborates_with: row.get(15)?,
        active: row.get(16)?,
    })
}

/// List all agents.
pub fn list_agents(pool: &DbPool) -> DbResult<Vec<AgentRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, code, name, agent_type, type, description, capabilities,
                    autonomy_level, decision_complexity, input_systems, output_systems,
                    technology_stack, model_type, collaboration_pattern, workflow_id,
                    collaborates_with, active
             FROM agents ORDER BY id",
        )?;
        let rows = stmt.query_map([], agent_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List agents still marked active.
pub fn list_active_agents(pool: &DbPool) -> DbResult<Vec<AgentRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, code, name, agent_type, type, description, capabilities,
                    autonomy_level, decision_complexity, input_systems, output_systems,
                    technology_stack, model_type, collaboration_pattern, workflow_id,
                    collaborates_with, active
             FROM agents WHERE active = 1 ORDER BY id",
        )?;
        let rows = stmt.query_map([], agent_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count agent rows.
pub fn count_agents(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM agents", [], |row| row.get(0))?;
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

    fn insert_agent(pool: &DbPool, id: i64, code: &str, name: &str, active: bool) {
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO agents (id, code, name, type, active) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, code, name, "autonomous", active],
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_list_active_agents_skips_inactive() {
        let pool = test_pool();
        insert_agent(&pool, 1, "AGT-001", "Delay Detection Agent", true);
        insert_agent(&pool, 2, "AGT-002", "Retired Agent", false);
        insert_agent(&pool, 3, "AGT-003", "Rebooking Agent", true);

        let active = list_active_agents(&pool).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].code, "AGT-001");
        assert_eq!(active[1].code, "AGT-003");
        assert_eq!(active[0].kind.as_deref(), Some("autonomous"));

        assert_eq!(list_agents(&pool).unwrap().len(), 3);
        assert_eq!(count_agents(&pool).unwrap(), 3);
    }
}
