pub mod v1;

use axum::Router;
use gusen_model::routes::v1::ROOT;

use crate::infra::app_state::AppState;

/// Create the main API router with all versions
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new().nest(ROOT, v1::create_v1_router(state))
}
