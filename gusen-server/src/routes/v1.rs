use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use gusen_model::routes::{utils::relative, v1};

use crate::{
    auth::require_admin_session,
    handlers::{auth, clients, logs, users},
    infra::app_state::AppState,
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoint
        .route(relative(v1::auth::LOGIN), post(auth::login))
        .merge(create_admin_routes(state))
}

/// Routes that require an administrator session.
fn create_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            relative(v1::users::COLLECTION),
            get(users::list_users).post(users::create_user),
        )
        .route(
            relative(v1::users::ITEM),
            get(users::get_user).put(users::update_user),
        )
        .route(
            relative(v1::users::DEACTIVATE),
            put(users::deactivate_user),
        )
        .route(relative(v1::users::PASSWORD), put(users::reset_password))
        .route(relative(v1::users::PIN), put(users::reset_pin))
        .route(
            relative(v1::users::CLIENTS),
            get(clients::user_clients).put(clients::assign_client),
        )
        .route(relative(v1::clients::COLLECTION), get(clients::search_clients))
        .route(
            relative(v1::clients::AVAILABLE),
            get(clients::available_clients),
        )
        .route(relative(v1::cities::COLLECTION), get(clients::list_cities))
        .route(relative(v1::logs::COLLECTION), get(logs::list_logs))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_admin_session,
        ))
}
