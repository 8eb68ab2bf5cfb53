use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixstatsError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A result record is missing its grouping key or a required numeric field.
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// A request whose body, query string or path could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
