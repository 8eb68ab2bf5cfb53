use serde::Deserialize;
use serde_json::Value;

/// A report submitted as a JSON body rather than a file upload.
#[derive(Deserialize)]
pub struct SaveReportRequest {
    pub json_data: Value,
    pub prompt: Option<String>,
}

#[derive(Deserialize)]
pub struct AddSystemPromptRequest {
    pub prompt: Option<String>,
}

#[derive(Deserialize)]
pub struct AggregateQuery {
    pub project_id: i64,
    /// Overrides the configured stability signal.
    pub signal: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub github_url: String,
    #[serde(default)]
    pub number_of_errors: i64,
}

#[derive(Deserialize)]
pub struct ErrorsQuery {
    pub configuration_id: Option<i64>,
}
