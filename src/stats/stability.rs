use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FixstatsError;
use crate::models::{ResultRecord, StabilitySummary};
use super::averages::configuration_key;
use super::descriptive::sample_std_dev;
use super::group::group_fold;

/// The per-run error count whose spread measures stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilitySignal {
    #[default]
    DetectedErrors,
    FalsePositives,
}

impl StabilitySignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilitySignal::FalsePositives => "false_positives",
            StabilitySignal::DetectedErrors => "detected_errors",
        }
    }

    fn read(&self, record: &ResultRecord) -> Option<i64> {
        match self {
            StabilitySignal::FalsePositives => record.false_positives,
            StabilitySignal::DetectedErrors => record.detected_errors,
        }
    }
}

impl fmt::Display for StabilitySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StabilitySignal {
    type Err = FixstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "false_positives" => Ok(StabilitySignal::FalsePositives),
            "detected_errors" => Ok(StabilitySignal::DetectedErrors),
            other => Err(FixstatsError::Config(format!(
                "Unknown stability signal '{}' (expected false_positives or detected_errors)",
                other
            ))),
        }
    }
}

/// What to report for a configuration observed in exactly one run, where the
/// sample standard deviation is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleRunPolicy {
    /// Report `std_dev = 0`.
    #[default]
    Zero,
    /// Leave the configuration out of the result.
    Omit,
}

impl FromStr for SingleRunPolicy {
    type Err = FixstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(SingleRunPolicy::Zero),
            "omit" => Ok(SingleRunPolicy::Omit),
            other => Err(FixstatsError::Config(format!(
                "Unknown single-run policy '{}' (expected zero or omit)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StabilityOptions {
    #[serde(default)]
    pub signal: StabilitySignal,
    #[serde(default)]
    pub single_run_policy: SingleRunPolicy,
}

/// Sample standard deviation of the configured signal per configuration.
///
/// Input must already be scoped to the runs that executed; no filtering
/// happens here. Fails with [`FixstatsError::Data`] when a record lacks its
/// configuration id or the signal column is NULL.
pub fn compute_stability(
    records: &[ResultRecord],
    options: StabilityOptions,
) -> Result<Vec<StabilitySummary>, FixstatsError> {
    let signal = options.signal;
    let groups = group_fold(
        records.iter().enumerate(),
        |(index, record)| configuration_key(*index, record),
        |values: &mut Vec<f64>, (index, record)| {
            let value = signal.read(record).ok_or_else(|| {
                FixstatsError::Data(format!("result record {} has no {}", index, signal))
            })?;
            values.push(value as f64);
            Ok(())
        },
    )?;

    let mut summaries = Vec::with_capacity(groups.len());
    for (configuration_id, values) in groups {
        let std_dev = match (sample_std_dev(&values), options.single_run_policy) {
            (Some(sd), _) => sd,
            (None, SingleRunPolicy::Zero) => 0.0,
            (None, SingleRunPolicy::Omit) => continue,
        };
        summaries.push(StabilitySummary { configuration_id, std_dev });
    }
    Ok(summaries)
}
