use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};
use crate::errors::FixstatsError;

impl IntoResponse for FixstatsError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            FixstatsError::Data(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FixstatsError::InvalidReport(_) => StatusCode::BAD_REQUEST,
            FixstatsError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FixstatsError::Config(_) => StatusCode::BAD_REQUEST,
            FixstatsError::Json(_) => StatusCode::BAD_REQUEST,
            FixstatsError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let classification = self.classify();
        if status.is_server_error() {
            error!(
                error = %self,
                error_type = classification.error_type,
                retryable = classification.retryable,
                "Request failed"
            );
        } else {
            warn!(error = %self, error_type = classification.error_type, "Request rejected");
        }

        (status, Json(json!({
            "error": self.to_string(),
            "type": classification.error_type,
        }))).into_response()
    }
}

impl From<JsonRejection> for FixstatsError {
    fn from(rejection: JsonRejection) -> Self {
        FixstatsError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for FixstatsError {
    fn from(rejection: QueryRejection) -> Self {
        FixstatsError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for FixstatsError {
    fn from(rejection: PathRejection) -> Self {
        FixstatsError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for FixstatsError {
    fn from(rejection: MultipartRejection) -> Self {
        FixstatsError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (FixstatsError::Data("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (FixstatsError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (FixstatsError::InvalidReport("x".into()), StatusCode::BAD_REQUEST),
            (FixstatsError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (FixstatsError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
