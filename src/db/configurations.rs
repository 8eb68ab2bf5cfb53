use chrono::Utc;
use rusqlite::Connection;
use crate::errors::FixstatsError;
use crate::models::{ConfigResult, Configuration};
use super::Database;

pub fn insert_configuration(
    conn: &Connection,
    project_id: i64,
    system_prompt: &str,
    model: &str,
) -> Result<i64, FixstatsError> {
    conn.execute(
        "INSERT INTO configuration (project_id, system_prompt, model, created_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![project_id, system_prompt, model, Utc::now().to_rfc3339()],
    ).map_err(|e| FixstatsError::Database(format!("Failed to insert configuration: {}", e)))?;
    Ok(conn.last_insert_rowid())
}

/// Return the configuration of `project_id` already registered for this
/// prompt/model pair, inserting one if there is none. Repeated runs of the
/// same pairing share one id.
pub fn find_or_insert_configuration(
    conn: &Connection,
    project_id: i64,
    system_prompt: &str,
    model: &str,
) -> Result<i64, FixstatsError> {
    let existing = conn.query_row(
        "SELECT configuration_id FROM configuration WHERE project_id = ?1 AND system_prompt = ?2 AND model = ?3 ORDER BY configuration_id LIMIT 1",
        rusqlite::params![project_id, system_prompt, model],
        |row: &rusqlite::Row| row.get::<_, i64>(0),
    );

    match existing {
        Ok(id) => Ok(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => insert_configuration(conn, project_id, system_prompt, model),
        Err(e) => Err(FixstatsError::Database(format!("Query error: {}", e))),
    }
}

impl Database {
    pub fn insert_configuration(&self, project_id: i64, system_prompt: &str, model: &str) -> Result<i64, FixstatsError> {
        let conn = self.lock()?;
        insert_configuration(&conn, project_id, system_prompt, model)
    }

    /// Configurations of a project, newest first.
    pub fn list_configurations(&self, project_id: i64) -> Result<Vec<Configuration>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT configuration_id, system_prompt, model FROM configuration WHERE project_id = ?1 ORDER BY configuration_id DESC"
        ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id], |row: &rusqlite::Row| {
            Ok(Configuration {
                configuration_id: row.get(0)?,
                prompt: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                model: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        }).map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut configurations = Vec::new();
        for row in rows {
            configurations.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(configurations)
    }

    /// Every result of a project joined with its configuration, in insertion
    /// order. Each row also carries its configuration's average high-quality
    /// and detected error counts.
    pub fn config_results(&self, project_id: i64) -> Result<Vec<ConfigResult>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT
                c.configuration_id,
                c.system_prompt,
                c.model,
                r.number_of_fixes,
                r.duration,
                r.high_quality_errors,
                r.detected_errors,
                r.results_id,
                AVG(r.high_quality_errors) OVER (PARTITION BY c.configuration_id),
                AVG(r.detected_errors) OVER (PARTITION BY c.configuration_id)
            FROM configuration c
            INNER JOIN results r ON c.configuration_id = r.configuration_id
            WHERE c.project_id = ?1
            ORDER BY r.results_id"
        ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id], |row: &rusqlite::Row| {
            Ok(ConfigResult {
                configuration_id: row.get(0)?,
                prompt: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                model: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                fixes: row.get(3)?,
                duration: row.get(4)?,
                high_quality_errors: row.get(5)?,
                detected_errors: row.get(6)?,
                results_id: row.get(7)?,
                avg_hq_errors: row.get(8)?,
                avg_detected_errors: row.get(9)?,
            })
        }).map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }
}
