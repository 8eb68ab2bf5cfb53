use chrono::Utc;
use rusqlite::Connection;
use tracing::debug;
use crate::errors::FixstatsError;
use crate::models::Project;
use super::Database;

/// Return the id of the project registered under `github_url`, inserting it
/// first if the URL is new. The same repository always maps to one project.
pub fn insert_project(
    conn: &Connection,
    project_name: &str,
    github_url: &str,
    number_of_errors: i64,
) -> Result<i64, FixstatsError> {
    let existing = conn.query_row(
        "SELECT project_id FROM projects WHERE github_url = ?1 ORDER BY project_id LIMIT 1",
        rusqlite::params![github_url],
        |row: &rusqlite::Row| row.get::<_, i64>(0),
    );

    match existing {
        Ok(id) => {
            debug!(project_id = id, github_url, "Reusing existing project");
            return Ok(id);
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => {}
        Err(e) => return Err(FixstatsError::Database(format!("Query error: {}", e))),
    }

    conn.execute(
        "INSERT INTO projects (project_name, github_url, number_of_errors, created_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![project_name, github_url, number_of_errors, Utc::now().to_rfc3339()],
    ).map_err(|e| FixstatsError::Database(format!("Failed to insert project: {}", e)))?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    pub fn insert_project(&self, project_name: &str, github_url: &str, number_of_errors: i64) -> Result<i64, FixstatsError> {
        let conn = self.lock()?;
        insert_project(&conn, project_name, github_url, number_of_errors)
    }

    pub fn get_project(&self, project_id: i64) -> Result<Option<Project>, FixstatsError> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT project_id, project_name, github_url, number_of_errors FROM projects WHERE project_id = ?1",
            rusqlite::params![project_id],
            project_from_row,
        );

        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(FixstatsError::Database(format!("Query error: {}", e))),
        }
    }

    /// All projects, most recently created first.
    pub fn list_projects(&self) -> Result<Vec<Project>, FixstatsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT project_id, project_name, github_url, number_of_errors FROM projects ORDER BY project_id DESC"
        ).map_err(|e| FixstatsError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], project_from_row)
            .map_err(|e| FixstatsError::Database(format!("Query error: {}", e)))?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row.map_err(|e| FixstatsError::Database(format!("Row error: {}", e)))?);
        }
        Ok(projects)
    }

    /// Fail with [`FixstatsError::NotFound`] unless the project exists.
    pub fn require_project(&self, project_id: i64) -> Result<Project, FixstatsError> {
        self.get_project(project_id)?
            .ok_or_else(|| FixstatsError::NotFound(format!("Project {} not found", project_id)))
    }
}

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        project_id: row.get(0)?,
        project_name: row.get(1)?,
        github_url: row.get(2)?,
        number_of_errors: row.get(3)?,
    })
}
