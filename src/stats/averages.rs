use crate::errors::FixstatsError;
use crate::models::{AverageSummary, ResultRecord};
use super::group::group_fold;

#[derive(Debug, Default)]
struct AverageAccumulator {
    runs: usize,
    fixes: f64,
    errors: f64,
    high_quality_errors: f64,
    duration: f64,
}

impl AverageAccumulator {
    fn push(&mut self, index: usize, record: &ResultRecord) -> Result<(), FixstatsError> {
        let fixes = record.fixes.ok_or_else(|| missing(index, "fixes"))?;
        let duration = record.duration.ok_or_else(|| missing(index, "duration"))?;

        self.runs += 1;
        self.fixes += fixes as f64;
        // Error counts are optional per report; an absent count is zero.
        self.errors += record.detected_errors.unwrap_or(0) as f64;
        self.high_quality_errors += record.high_quality_errors.unwrap_or(0) as f64;
        self.duration += duration;
        Ok(())
    }

    fn finish(self, configuration_id: i64) -> AverageSummary {
        let n = self.runs as f64;
        AverageSummary {
            configuration_id,
            mean_fixes: self.fixes / n,
            mean_errors: self.errors / n,
            mean_high_quality_errors: self.high_quality_errors / n,
            mean_duration: self.duration / n,
        }
    }
}

fn missing(index: usize, field: &str) -> FixstatsError {
    FixstatsError::Data(format!("result record {} has no {}", index, field))
}

pub(crate) fn configuration_key(index: usize, record: &ResultRecord) -> Result<i64, FixstatsError> {
    record.configuration_id.ok_or_else(|| missing(index, "configuration_id"))
}

/// Mean fixes, detected errors, high-quality errors and duration per
/// configuration, one summary per distinct `configuration_id` in first-seen
/// order.
///
/// `fixes`, `duration` and the configuration id are required; a record
/// missing any of them fails the computation with [`FixstatsError::Data`].
pub fn compute_averages(records: &[ResultRecord]) -> Result<Vec<AverageSummary>, FixstatsError> {
    let groups = group_fold(
        records.iter().enumerate(),
        |(index, record)| configuration_key(*index, record),
        |acc: &mut AverageAccumulator, (index, record)| acc.push(index, record),
    )?;

    Ok(groups
        .into_iter()
        .map(|(configuration_id, acc)| acc.finish(configuration_id))
        .collect())
}
