pub mod report;
pub mod schema;

pub use report::{DebugReport, IngestOutcome, ReportSummary, SystemPromptOutcome};

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::db::configurations::{find_or_insert_configuration, insert_configuration};
use crate::db::error_records::insert_error_records;
use crate::db::projects::insert_project;
use crate::db::results::{insert_result, NewResult};
use crate::db::Database;
use crate::errors::FixstatsError;
use schema::REPORT_SCHEMA;

const MAX_REPORT_BYTES: u64 = 10 * 1_048_576;

/// Parse a report from raw JSON text.
pub fn parse_report(content: &str) -> Result<DebugReport, FixstatsError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| FixstatsError::InvalidReport(format!("Report is not valid JSON: {}", e)))?;
    parse_report_value(value)
}

/// Validate an already-decoded report against the report schema and convert
/// it into its typed form.
pub fn parse_report_value(value: Value) -> Result<DebugReport, FixstatsError> {
    validate_report(&value)?;
    serde_json::from_value(value)
        .map_err(|e| FixstatsError::InvalidReport(format!("Report has an unexpected shape: {}", e)))
}

fn validate_report(value: &Value) -> Result<(), FixstatsError> {
    let compiled = jsonschema::JSONSchema::compile(&REPORT_SCHEMA)
        .map_err(|e| FixstatsError::Internal(format!("Report schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            return Err(FixstatsError::InvalidReport(messages.join("; ")));
        }
    }
    Ok(())
}

/// Only `.json` uploads are accepted.
pub fn ensure_json_filename(name: &str) -> Result<(), FixstatsError> {
    if name.to_ascii_lowercase().ends_with(".json") {
        Ok(())
    } else {
        Err(FixstatsError::InvalidReport("Only .json files are allowed".into()))
    }
}

/// Read and parse a report file from disk.
pub async fn load_report_file(path: &Path) -> Result<DebugReport, FixstatsError> {
    ensure_json_filename(&path.to_string_lossy())?;
    if !path.exists() {
        return Err(FixstatsError::NotFound(format!("Report file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_REPORT_BYTES {
        return Err(FixstatsError::InvalidReport("Report file exceeds 10MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_report(&content)
}

/// Persist one report: the project (reused when its GitHub URL is known), the
/// configuration for `prompt` and the report's model (reused when already
/// registered), the run's result row and its error records.
/// Everything is written in one transaction.
pub fn store_report(db: &Database, report: &DebugReport, prompt: Option<&str>) -> Result<IngestOutcome, FixstatsError> {
    let outcome = db.with_transaction(|tx| {
        let project_id = insert_project(
            tx,
            &report.project_name,
            &report.project_github_url,
            report.number_of_errors_from_raygun.unwrap_or(0),
        )?;

        let config_id = find_or_insert_configuration(
            tx,
            project_id,
            prompt.unwrap_or(""),
            report.model.as_deref().unwrap_or(""),
        )?;

        let run_time = report.run_time();
        let results_id = insert_result(tx, &NewResult {
            detected_errors: Some(report.detected_errors()),
            high_quality_errors: report.high_quality_errors,
            false_positives: report.false_positives,
            run_time,
            ..NewResult::new(project_id, Some(config_id), report.number_of_fixes, report.total_time_spent_minutes)
        })?;

        let inserted = insert_error_records(tx, &report.errors, project_id, Some(config_id), run_time)?;

        Ok(IngestOutcome {
            project_id,
            config_id,
            results_id,
            total_errors_in_report: report.errors.len(),
            total_errors_inserted: inserted,
            number_of_fixes: report.number_of_fixes,
        })
    })?;

    info!(
        project = %report.project_name,
        project_id = outcome.project_id,
        config_id = outcome.config_id,
        fixes = outcome.number_of_fixes,
        errors_inserted = outcome.total_errors_inserted,
        "Stored debug report"
    );
    Ok(outcome)
}

/// Register a new system prompt for an existing project. A zeroed placeholder
/// result is written alongside it; its zero run time keeps it out of
/// stability figures.
pub fn add_system_prompt(db: &Database, project_id: i64, prompt: &str) -> Result<SystemPromptOutcome, FixstatsError> {
    db.require_project(project_id)?;

    let outcome = db.with_transaction(|tx| {
        let configuration_id = insert_configuration(tx, project_id, prompt, "")?;
        let results_id = insert_result(tx, &NewResult {
            detected_errors: Some(0),
            high_quality_errors: Some(0),
            false_positives: Some(0),
            ..NewResult::new(project_id, Some(configuration_id), 0, 0.0)
        })?;
        Ok(SystemPromptOutcome { configuration_id, results_id })
    })?;

    debug!(project_id, configuration_id = outcome.configuration_id, "Added system prompt");
    Ok(outcome)
}
