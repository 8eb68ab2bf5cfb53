use serde::{Deserialize, Serialize};
use crate::models::ErrorRecord;

/// A debug report as uploaded after an AI-assisted bug-fixing run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DebugReport {
    pub project_name: String,
    pub project_github_url: String,
    #[serde(default)]
    pub task_prompt_timestamp: Option<String>,
    pub number_of_fixes: i64,
    pub total_time_spent_minutes: f64,
    #[serde(default)]
    pub number_of_errors_from_raygun: Option<i64>,
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
    /// Zero (or absent) when the run never executed.
    #[serde(default)]
    pub run_time: Option<f64>,
    /// Defaults to the number of listed errors.
    #[serde(default)]
    pub detected_errors: Option<i64>,
    #[serde(default)]
    pub high_quality_errors: Option<i64>,
    #[serde(default)]
    pub false_positives: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub summary: Option<ReportSummary>,
}

impl DebugReport {
    pub fn detected_errors(&self) -> i64 {
        self.detected_errors.unwrap_or(self.errors.len() as i64)
    }

    pub fn run_time(&self) -> f64 {
        self.run_time.unwrap_or(0.0)
    }
}

/// Free-form wrap-up written by the agent. Accepted but not persisted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_errors_identified: Option<i64>,
    #[serde(default)]
    pub errors_fixed: Option<i64>,
    #[serde(default)]
    pub errors_not_fixed: Option<i64>,
    #[serde(default)]
    pub deployment_correlation: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// What a successful ingest wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutcome {
    pub project_id: i64,
    pub config_id: i64,
    pub results_id: i64,
    pub total_errors_in_report: usize,
    pub total_errors_inserted: usize,
    pub number_of_fixes: i64,
}

/// A configuration registered ahead of any real run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemPromptOutcome {
    #[serde(rename = "configid")]
    pub configuration_id: i64,
    #[serde(rename = "resultid")]
    pub results_id: i64,
}
