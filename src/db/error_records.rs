use rusqlite::Connection;
use crate::errors::FixstatsError;
use crate::models::{ErrorRecord, FixedErrorSummary, StoredError};
use super::Database;

/// Store the errors of one run. Error ids already present are left alone;
/// returns how many rows were actually inserted.
pub fn insert_error_records(
    conn: &Connection,
    errors: &[ErrorRecord],
    project_id: i64,
    configuration_id: Option<i64>,
    run_time: f64,
) -> Result<usize, FixstatsError> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO error_records (error_id, error_type, was_fixed, project_id, configuration_id, run_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
    ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

    let mut inserted = 0;
    for error in errors {
        inserted += stmt.execute(rusqlite::params![
            error.error_id,
            error.error_type,
            error.was_fixed,
            project_id,
            configuration_id,
            run_time,
        ]).map_err(|e| FixstatsError::Database(format!("Failed to insert error record: {}", e)))?;
    }
    Ok(inserted)
}

impl Database {
    pub fn insert_error_records(
        &self,
        errors: &[ErrorRecord],
        project_id: i64,
        configuration_id: Option<i64>,
        run_time: f64,
    ) -> Result<usize, FixstatsError> {
        let conn = self.lock()?;
        insert_error_records(&conn, errors, project_id, configuration_id, run_time)
    }

    /// Error records of a project in the order they were stored, optionally
    /// limited to one configuration.
    pub fn list_error_records(
        &self,
        project_id: i64,
        configuration_id: Option<i64>,
    ) -> Result<Vec<StoredError>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT error_id, error_type, was_fixed, project_id, configuration_id
            FROM error_records
            WHERE project_id = ?1 AND (?2 IS NULL OR configuration_id = ?2)
            ORDER BY rowid"
        ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id, configuration_id], |row: &rusqlite::Row| {
            Ok(StoredError {
                error_id: row.get(0)?,
                error_type: row.get(1)?,
                was_fixed: row.get(2)?,
                project_id: row.get(3)?,
                configuration_id: row.get(4)?,
            })
        }).map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut errors = Vec::new();
        for row in rows {
            errors.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(errors)
    }

    /// Number of fixed errors per model/system-prompt pair of a project,
    /// highest first. Pairs with no fixed errors report zero.
    pub fn fixed_errors_summary(&self, project_id: i64) -> Result<Vec<FixedErrorSummary>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT c.model, c.system_prompt, COUNT(e.error_id) AS total_fixed_errors
            FROM configuration c
            LEFT JOIN error_records e
                ON c.configuration_id = e.configuration_id
                AND e.was_fixed = 1
            WHERE c.project_id = ?1
            GROUP BY c.model, c.system_prompt
            ORDER BY total_fixed_errors DESC, c.model, c.system_prompt"
        ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id], |row: &rusqlite::Row| {
            Ok(FixedErrorSummary {
                model: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                system_prompt: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                total_fixed_errors: row.get(2)?,
            })
        }).map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut summary = Vec::new();
        for row in rows {
            summary.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(summary)
    }
}
