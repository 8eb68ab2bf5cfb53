pub mod routes;
pub mod models;
pub mod errors;
pub mod extract;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use crate::config::FixstatsConfig;
use crate::db::Database;
use crate::errors::FixstatsError;
use crate::stats::StabilityOptions;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Default signal and single-run policy for stability requests.
    pub stability: StabilityOptions,
    pub cors_origins: Vec<String>,
}

pub async fn create_app_state(config: &FixstatsConfig) -> Result<AppState, FixstatsError> {
    let db = Database::new(&config.db_path())?;
    Ok(AppState {
        db,
        stability: config.stability_options(),
        cors_origins: config.cors_origins(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/projects", get(routes::projects::list_projects).post(routes::projects::create_project))
        .route("/api/projects/:id/configurations", get(routes::projects::list_configurations))
        .route("/api/projects/:id/config_results", get(routes::projects::config_results))
        .route("/api/projects/:id/fixed_errors", get(routes::projects::fixed_errors))
        .route("/api/projects/:id/errors", get(routes::projects::list_errors))
        .route("/api/projects/:id/system_prompts", post(routes::projects::add_system_prompt))
        .route("/api/reports", post(routes::reports::save_report))
        .route("/api/reports/upload", post(routes::reports::upload_report))
        .route("/aggregate/averages", get(routes::aggregate::averages))
        .route("/aggregate/stability", get(routes::aggregate::stability))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
