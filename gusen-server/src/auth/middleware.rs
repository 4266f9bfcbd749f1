use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use gusen_core::AdminError;
use tracing::debug;

use crate::infra::{app_state::AppState, errors::AppError};

/// Rejects the request with 401 unless it carries a valid administrator
/// bearer token. On success the [`gusen_core::auth::AdminSession`] is stored
/// in the request extensions for handlers to pick up.
pub async fn require_admin_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let session = state.guard.authorize(header_value).map_err(|rejection| {
        debug!(
            path = %request.uri().path(),
            reason = %rejection,
            "rejected admin request"
        );
        AppError::from(AdminError::from(rejection))
    })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
