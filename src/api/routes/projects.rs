use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::models::{AddSystemPromptRequest, CreateProjectRequest, ErrorsQuery};
use crate::api::AppState;
use crate::errors::FixstatsError;
use crate::ingest::{self, SystemPromptOutcome};
use crate::models::{ConfigResult, Configuration, FixedErrorSummary, Project, StoredError};

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, FixstatsError> {
    state.db.list_projects().map(Json)
}

/// Register a project. A known GitHub URL returns the existing id.
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Value>), FixstatsError> {
    if req.project_name.trim().is_empty() {
        return Err(FixstatsError::BadRequest("project_name must not be empty".into()));
    }
    if req.github_url.trim().is_empty() {
        return Err(FixstatsError::BadRequest("github_url must not be empty".into()));
    }
    if req.number_of_errors < 0 {
        return Err(FixstatsError::BadRequest("number_of_errors must not be negative".into()));
    }

    let project_id = state.db.insert_project(&req.project_name, &req.github_url, req.number_of_errors)?;
    info!(project_id, github_url = %req.github_url, "Project registered");
    Ok((StatusCode::CREATED, Json(json!({ "project_id": project_id }))))
}

pub async fn list_configurations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Configuration>>, FixstatsError> {
    state.db.require_project(id)?;
    state.db.list_configurations(id).map(Json)
}

pub async fn config_results(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<ConfigResult>>, FixstatsError> {
    state.db.require_project(id)?;
    state.db.config_results(id).map(Json)
}

pub async fn fixed_errors(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<FixedErrorSummary>>, FixstatsError> {
    state.db.require_project(id)?;
    state.db.fixed_errors_summary(id).map(Json)
}

pub async fn list_errors(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<ErrorsQuery>,
) -> Result<Json<Vec<StoredError>>, FixstatsError> {
    state.db.require_project(id)?;
    state.db.list_error_records(id, query.configuration_id).map(Json)
}

pub async fn add_system_prompt(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<AddSystemPromptRequest>,
) -> Result<(StatusCode, Json<SystemPromptOutcome>), FixstatsError> {
    let outcome = ingest::add_system_prompt(&state.db, id, req.prompt.as_deref().unwrap_or(""))?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
