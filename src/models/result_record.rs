use serde::{Deserialize, Serialize};

/// One measured outcome of running a configuration once, as fetched from
/// storage. Nullable columns stay `Option` so the aggregation layer can tell
/// a missing value apart from a legitimate zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Grouping key. Nullable in storage for results ingested before a
    /// configuration was attached.
    pub configuration_id: Option<i64>,
    pub fixes: Option<i64>,
    pub detected_errors: Option<i64>,
    pub high_quality_errors: Option<i64>,
    /// Elapsed time of the run. The unit is whatever the report used.
    pub duration: Option<f64>,
    pub false_positives: Option<i64>,
}

impl ResultRecord {
    /// Convenience constructor for a fully populated record.
    pub fn new(configuration_id: i64, fixes: i64, detected_errors: i64, high_quality_errors: i64, duration: f64) -> Self {
        Self {
            configuration_id: Some(configuration_id),
            fixes: Some(fixes),
            detected_errors: Some(detected_errors),
            high_quality_errors: Some(high_quality_errors),
            duration: Some(duration),
            false_positives: None,
        }
    }

    pub fn with_false_positives(mut self, false_positives: i64) -> Self {
        self.false_positives = Some(false_positives);
        self
    }
}
