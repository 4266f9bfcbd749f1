use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gusen_core::AdminError;
use serde_json::json;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::NotFound(_) => Self::not_found(err.to_string()),
            AdminError::AuthenticationFailed(_) => {
                Self::unauthorized(err.to_string())
            }
            AdminError::AuthorizationFailed(_) => Self::forbidden(err.to_string()),
            AdminError::Unauthenticated(_) => Self::unauthorized(err.to_string()),
            AdminError::ValidationFailed(_) => Self::bad_request(err.to_string()),
            AdminError::Conflict(_) => Self::conflict(err.to_string()),
            AdminError::StoreUnavailable(ref detail) => {
                error!(detail = %detail, "store call failed");
                Self::service_unavailable("service temporarily unavailable")
            }
            AdminError::Internal(ref detail) => {
                error!(detail = %detail, "internal failure");
                Self::internal("internal server error")
            }
        }
    }
}
