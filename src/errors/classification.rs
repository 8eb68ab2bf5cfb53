use super::types::FixstatsError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl FixstatsError {
    /// Classify this error to determine its type and whether it can be retried.
    ///
    /// Only storage-level failures are worth retrying; a computation over bad
    /// data fails the same way every time.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            FixstatsError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                retryable: true,
            },
            FixstatsError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },

            FixstatsError::Data(_) => ErrorClassification {
                error_type: "DataError",
                retryable: false,
            },
            FixstatsError::InvalidReport(_) => ErrorClassification {
                error_type: "InvalidReportError",
                retryable: false,
            },
            FixstatsError::BadRequest(_) => ErrorClassification {
                error_type: "BadRequestError",
                retryable: false,
            },
            FixstatsError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            FixstatsError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            FixstatsError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            FixstatsError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            FixstatsError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }

    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FixstatsError::Config(_) => 2,
            FixstatsError::Data(_) => 3,
            FixstatsError::InvalidReport(_) => 4,
            FixstatsError::NotFound(_) => 5,
            _ => 1,
        }
    }
}
