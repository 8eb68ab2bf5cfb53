//! Aggregation over per-run result records: per-configuration averages and
//! run-to-run stability. Everything here is pure and synchronous; storage
//! access goes through [`crate::db::ResultStore`].

pub mod averages;
pub mod descriptive;
pub mod group;
pub mod service;
pub mod stability;

pub use averages::compute_averages;
pub use group::group_fold;
pub use service::{project_averages, project_stability};
pub use stability::{compute_stability, SingleRunPolicy, StabilityOptions, StabilitySignal};
