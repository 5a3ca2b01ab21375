use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

/// Failures surfaced by the API. Missing data is never one of them.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display(fmt = "{} not found", resource)]
    NotFound { resource: String },

    #[display(fmt = "Admin only")]
    Forbidden,

    /// Details are in the log under `correlation_id`, never in the response.
    #[display(fmt = "Internal server error ({})", correlation_id)]
    Internal { correlation_id: String },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        error!(error = %e, correlation_id = %correlation_id, "Database error");
        ApiError::Internal { correlation_id }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Internal { correlation_id } => json!({
                "message": "Internal server error",
                "correlation_id": correlation_id,
            }),
            other => json!({ "message": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
