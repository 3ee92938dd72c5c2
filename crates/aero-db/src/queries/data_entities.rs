//! Data entity catalog queries.

use std::collections::HashMap;

use crate::pool::{DbError, DbPool, DbResult};

/// Data entity row from database.
#[derive(Debug, Clone)]
pub struct DataEntityRow {
    pub id: i64,
    pub code: String,
    pub name: Option<String>,
}

/// List all data entities.
pub fn list_data_entities(pool: &DbPool) -> DbResult<Vec<DataEntityRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, code, name FROM data_entities ORDER BY code")?;
        let rows = stmt.query_map([], |row| {
            Ok(DataEntityRow {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Build a code -> id lookup for the entity catalog.
pub fn entity_code_index(pool: &DbPool) -> DbResult<HashMap<String, i64>> {
    let entities = list_data_entities(pool)?;
    Ok(entities.into_iter().map(|e| (e.code, e.id)).collect())
}
