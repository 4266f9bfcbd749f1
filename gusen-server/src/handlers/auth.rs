use axum::{Json, extract::State};
use gusen_model::{ApiResponse, LoginRequest, LoginResponse};

use crate::infra::{app_state::AppState, errors::AppResult};

pub const TOKEN_TYPE: &str = "Bearer";

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let issued = state
        .auth
        .login_admin(&request.login_id, &request.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: issued.token,
        token_type: TOKEN_TYPE.to_string(),
        expires_at: issued.expires_at,
    })))
}
