use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    pub github_url: String,
    pub number_of_errors: i64,
}

/// A system-prompt/model pairing under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "id")]
    pub configuration_id: i64,
    pub prompt: String,
    pub model: String,
}

/// A configuration joined with one of its results, plus the
/// per-configuration error averages computed by the storage query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigResult {
    #[serde(rename = "configid")]
    pub configuration_id: i64,
    pub prompt: String,
    pub model: String,
    pub fixes: Option<i64>,
    pub duration: Option<f64>,
    pub high_quality_errors: Option<i64>,
    pub detected_errors: Option<i64>,
    pub results_id: i64,
    pub avg_hq_errors: Option<f64>,
    pub avg_detected_errors: Option<f64>,
}

/// Count of fixed errors for one model/prompt pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedErrorSummary {
    pub model: String,
    pub system_prompt: String,
    pub total_fixed_errors: i64,
}
