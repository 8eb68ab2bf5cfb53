use tracing::debug;

use crate::db::ResultStore;
use crate::errors::FixstatsError;
use crate::models::{AverageSummary, StabilitySummary};
use super::averages::compute_averages;
use super::stability::{compute_stability, StabilityOptions};

/// Fetch a project's results from `store` and average them per configuration.
pub fn project_averages<S: ResultStore + ?Sized>(
    store: &S,
    project_id: i64,
) -> Result<Vec<AverageSummary>, FixstatsError> {
    let records = store.average_records(project_id)?;
    debug!(project_id, records = records.len(), "Computing averages");
    compute_averages(&records)
}

/// Fetch a project's executed runs from `store` and compute per-configuration
/// stability.
pub fn project_stability<S: ResultStore + ?Sized>(
    store: &S,
    project_id: i64,
    options: StabilityOptions,
) -> Result<Vec<StabilitySummary>, FixstatsError> {
    let records = store.stability_records(project_id)?;
    debug!(project_id, records = records.len(), signal = %options.signal, "Computing stability");
    compute_stability(&records, options)
}
