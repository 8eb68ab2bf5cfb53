use axum::{extract::State, Json};
use crate::api::extract::ApiQuery;
use crate::api::models::AggregateQuery;
use crate::api::AppState;
use crate::errors::FixstatsError;
use crate::models::{AverageSummary, StabilitySummary};
use crate::stats::{self, StabilityOptions, StabilitySignal};

pub async fn averages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AggregateQuery>,
) -> Result<Json<Vec<AverageSummary>>, FixstatsError> {
    stats::project_averages(&state.db, query.project_id).map(Json)
}

pub async fn stability(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AggregateQuery>,
) -> Result<Json<Vec<StabilitySummary>>, FixstatsError> {
    let signal = match query.signal.as_deref() {
        Some(s) => s.parse::<StabilitySignal>()?,
        None => state.stability.signal,
    };
    let options = StabilityOptions { signal, ..state.stability };
    stats::project_stability(&state.db, query.project_id, options).map(Json)
}
