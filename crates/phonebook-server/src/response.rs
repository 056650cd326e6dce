use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phonebook_core::SystemResponse;
use phonebook_store::error::{StoreError, StoreErrorKind};
use thiserror::Error;

pub const PHONE_NOT_FOUND: &str = "Phone number not found.";
pub const STORE_UNAVAILABLE: &str = "address store unavailable";
pub const INTERNAL_ERROR: &str = "internal server error";

/// Request failures that end without a normal response body.
///
/// Conflicts and failed updates are not errors here: their handlers answer
/// with a `SystemResponse` echoing the payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("phone number not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(err) => match err.kind() {
                StoreErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                StoreErrorKind::CorruptValue | StoreErrorKind::InvalidSettings => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(detail) => {
                tracing::debug!(%detail, "rejected request");
                SystemResponse::detail(detail)
            }
            ApiError::NotFound => SystemResponse::detail(PHONE_NOT_FOUND),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "address store request failed");
                if status == StatusCode::SERVICE_UNAVAILABLE {
                    SystemResponse::detail(STORE_UNAVAILABLE)
                } else {
                    SystemResponse::detail(INTERNAL_ERROR)
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
