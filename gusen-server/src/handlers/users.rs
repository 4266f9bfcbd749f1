//! User management endpoints. All of them sit behind
//! [`crate::auth::require_admin_session`]; the acting administrator comes
//! from the session it stores.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use gusen_core::auth::AdminSession;
use gusen_model::{
    ApiResponse, CreateUserRequest, Page, PageQuery, PasswordChangeRequest,
    PinChangeRequest, UpdateUserRequest, UserDetail, UserSummary,
};

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<UserSummary>>>> {
    let page = state.users.list_users(&query.normalize()).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(login_id): Path<String>,
) -> AppResult<Json<ApiResponse<UserDetail>>> {
    let user = state.users.get_user(&login_id).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserDetail>>)> {
    let user = state.users.create_user(request, &session.login_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user).with_message("user created")),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(login_id): Path<String>,
    Json(changes): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserDetail>>> {
    let user = state
        .users
        .update_user(&login_id, changes, &session.login_id)
        .await?;
    Ok(Json(ApiResponse::success(user).with_message("user updated")))
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(login_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.users.deactivate(&login_id, &session.login_id).await?;
    Ok(Json(ApiResponse::success(()).with_message("user deactivated")))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(login_id): Path<String>,
    Json(request): Json<PasswordChangeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .users
        .reset_password(&login_id, &request.password, &session.login_id)
        .await?;
    Ok(Json(ApiResponse::success(()).with_message("password reset")))
}

pub async fn reset_pin(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(login_id): Path<String>,
    Json(request): Json<PinChangeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .users
        .reset_pin(&login_id, &request.pin, &session.login_id)
        .await?;
    Ok(Json(ApiResponse::success(()).with_message("pin reset")))
}
