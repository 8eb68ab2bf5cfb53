use serde::{Deserialize, Serialize};

/// Per-configuration means across all of its runs.
///
/// Serialized with the field names the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageSummary {
    #[serde(rename = "configid")]
    pub configuration_id: i64,
    #[serde(rename = "fixes")]
    pub mean_fixes: f64,
    #[serde(rename = "errors")]
    pub mean_errors: f64,
    #[serde(rename = "high-quality")]
    pub mean_high_quality_errors: f64,
    #[serde(rename = "time")]
    pub mean_duration: f64,
}

/// Run-to-run spread of an error signal for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilitySummary {
    #[serde(rename = "configid")]
    pub configuration_id: i64,
    pub std_dev: f64,
}
