//! Client association and reference lookups. Admin-only, like the user
//! management surface.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use gusen_core::auth::AdminSession;
use gusen_model::{
    ApiResponse, AssignClientRequest, City, ClientAssignment, ClientDetail,
    ClientSearchQuery,
};

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn user_clients(
    State(state): State<AppState>,
    Path(login_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ClientAssignment>>>> {
    let clients = state.directory.clients_of(&login_id).await?;
    Ok(Json(ApiResponse::success(clients)))
}

pub async fn assign_client(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(login_id): Path<String>,
    Json(request): Json<AssignClientRequest>,
) -> AppResult<Json<ApiResponse<ClientAssignment>>> {
    let assignment = state
        .directory
        .assign_client(&login_id, &request, &session.login_id)
        .await?;
    Ok(Json(ApiResponse::success(assignment).with_message("client assigned")))
}

pub async fn search_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientSearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<ClientDetail>>>> {
    let clients = state.directory.search_available(&query.client_code).await?;
    Ok(Json(ApiResponse::success(clients)))
}

pub async fn available_clients(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ClientDetail>>>> {
    let clients = state.directory.available_clients().await?;
    Ok(Json(ApiResponse::success(clients)))
}

pub async fn list_cities(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<City>>>> {
    let cities = state.directory.cities().await?;
    Ok(Json(ApiResponse::success(cities)))
}
