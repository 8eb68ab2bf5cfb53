use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use crate::api::extract::ApiJson;
use serde_json::{json, Value};
use tracing::info;
use crate::api::models::SaveReportRequest;
use crate::api::AppState;
use crate::errors::FixstatsError;
use crate::ingest::{self, IngestOutcome};

fn outcome_body(message: &str, outcome: &IngestOutcome) -> Value {
    json!({
        "success": true,
        "message": message,
        "project_id": outcome.project_id,
        "config_id": outcome.config_id,
        "results_id": outcome.results_id,
        "number_of_fixes": outcome.number_of_fixes,
        "total_errors_in_report": outcome.total_errors_in_report,
        "total_errors_inserted": outcome.total_errors_inserted,
    })
}

pub async fn save_report(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveReportRequest>,
) -> Result<(StatusCode, Json<Value>), FixstatsError> {
    let report = ingest::parse_report_value(req.json_data)?;
    info!(project = %report.project_name, "Received JSON report");

    let outcome = ingest::store_report(&state.db, &report, req.prompt.as_deref())?;
    Ok((StatusCode::CREATED, Json(outcome_body("JSON report saved successfully", &outcome))))
}

/// Multipart upload: a `file` part holding the report and an optional
/// `prompt` text part.
pub async fn upload_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), FixstatsError> {
    let mut multipart = multipart?;
    let mut file: Option<(String, String)> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                ingest::ensure_json_filename(&file_name)?;
                let content = field.text().await.map_err(malformed)?;
                file = Some((file_name, content));
            }
            Some("prompt") => {
                prompt = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    let (file_name, content) = file
        .ok_or_else(|| FixstatsError::InvalidReport("Missing 'file' part".into()))?;
    let report = ingest::parse_report(&content)?;
    info!(file = %file_name, project = %report.project_name, "Received report upload");

    let outcome = ingest::store_report(&state.db, &report, prompt.as_deref())?;
    Ok((StatusCode::CREATED, Json(outcome_body("file received", &outcome))))
}

fn malformed(e: axum::extract::multipart::MultipartError) -> FixstatsError {
    FixstatsError::InvalidReport(format!("Malformed multipart body: {}", e))
}
