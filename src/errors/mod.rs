pub mod types;
pub mod classification;

pub use types::FixstatsError;
pub use classification::ErrorClassification;
