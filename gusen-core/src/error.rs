use gusen_model::ModelError;
use thiserror::Error;

use crate::auth::{crypto::CredentialError, guard::GuardRejection};

/// Failure taxonomy shared by every use case.
///
/// Use cases map component failures into one of these variants and hand them
/// to the boundary unchanged; the HTTP layer owns the mapping to status codes.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] GuardRejection),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn store(err: impl std::fmt::Display) -> Self {
        AdminError::StoreUnavailable(err.to_string())
    }
}

impl From<ModelError> for AdminError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::EmptyLoginId => {
                AdminError::ValidationFailed(err.to_string())
            }
            // Only reachable when decoding a stored row.
            ModelError::UnknownStatusCode(_) => {
                AdminError::StoreUnavailable(err.to_string())
            }
        }
    }
}

impl From<CredentialError> for AdminError {
    fn from(err: CredentialError) -> Self {
        AdminError::Internal(err.to_string())
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for AdminError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return AdminError::Conflict(db_err.message().to_string());
        }
        tracing::error!(error = %err, "store query failed");
        AdminError::StoreUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
