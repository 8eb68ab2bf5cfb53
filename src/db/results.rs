use chrono::Utc;
use rusqlite::Connection;
use crate::errors::FixstatsError;
use crate::models::ResultRecord;
use super::Database;

/// A result row about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub project_id: i64,
    pub configuration_id: Option<i64>,
    pub number_of_fixes: i64,
    pub duration: f64,
    pub tokens: i64,
    pub detected_errors: Option<i64>,
    pub high_quality_errors: Option<i64>,
    pub false_positives: Option<i64>,
    /// Zero marks a run that never executed.
    pub run_time: f64,
}

impl NewResult {
    pub fn new(project_id: i64, configuration_id: Option<i64>, number_of_fixes: i64, duration: f64) -> Self {
        Self {
            project_id,
            configuration_id,
            number_of_fixes,
            duration,
            tokens: 0,
            detected_errors: None,
            high_quality_errors: None,
            false_positives: None,
            run_time: 0.0,
        }
    }
}

pub fn insert_result(conn: &Connection, result: &NewResult) -> Result<i64, FixstatsError> {
    conn.execute(
        "INSERT INTO results (project_id, configuration_id, number_of_fixes, duration, tokens, detected_errors, high_quality_errors, false_positives, run_time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            result.project_id,
            result.configuration_id,
            result.number_of_fixes,
            result.duration,
            result.tokens,
            result.detected_errors,
            result.high_quality_errors,
            result.false_positives,
            result.run_time,
            Utc::now().to_rfc3339(),
        ],
    ).map_err(|e| FixstatsError::Database(format!("Failed to insert result: {}", e)))?;
    Ok(conn.last_insert_rowid())
}

const RECORD_COLUMNS: &str =
    "configuration_id, number_of_fixes, detected_errors, high_quality_errors, duration, false_positives";

impl Database {
    pub fn insert_result(&self, result: &NewResult) -> Result<i64, FixstatsError> {
        let conn = self.lock()?;
        insert_result(&conn, result)
    }

    /// All result records of a project, grouped by configuration.
    pub fn average_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError> {
        self.query_records(
            &format!(
                "SELECT {} FROM results WHERE project_id = ?1 ORDER BY configuration_id ASC, results_id ASC",
                RECORD_COLUMNS
            ),
            project_id,
        )
    }

    /// Result records of a project whose run actually executed
    /// (`run_time != 0`), grouped by configuration.
    pub fn stability_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError> {
        self.query_records(
            &format!(
                "SELECT {} FROM results WHERE project_id = ?1 AND run_time != 0 ORDER BY configuration_id ASC, results_id ASC",
                RECORD_COLUMNS
            ),
            project_id,
        )
    }

    fn query_records(&self, sql: &str, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)
            .map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id], |row: &rusqlite::Row| {
            Ok(ResultRecord {
                configuration_id: row.get(0)?,
                fixes: row.get(1)?,
                detected_errors: row.get(2)?,
                high_quality_errors: row.get(3)?,
                duration: row.get(4)?,
                false_positives: row.get(5)?,
            })
        }).map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(records)
    }
}
