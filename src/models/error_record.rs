use serde::{Deserialize, Serialize};

/// One error the debugging run looked at, as listed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error_id: String,
    pub error_type: String,
    pub was_fixed: bool,
}

/// An error record as stored, with the project and configuration it was
/// reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredError {
    pub error_id: String,
    pub error_type: String,
    pub was_fixed: bool,
    pub project_id: i64,
    pub configuration_id: Option<i64>,
}
