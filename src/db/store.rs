use crate::errors::FixstatsError;
use crate::models::ResultRecord;
use super::Database;

/// Read access to per-run result records, as needed by the aggregation
/// layer. Each call returns one consistent snapshot.
pub trait ResultStore: Send + Sync {
    /// Every result record of the project.
    fn average_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError>;

    /// Result records of the project restricted to runs that executed
    /// (nonzero `run_time`). Stability is computed over exactly this set.
    fn stability_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError>;
}

impl ResultStore for Database {
    fn average_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError> {
        Database::average_records(self, project_id)
    }

    fn stability_records(&self, project_id: i64) -> Result<Vec<ResultRecord>, FixstatsError> {
        Database::stability_records(self, project_id)
    }
}
