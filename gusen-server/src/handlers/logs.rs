use axum::{
    Json,
    extract::{Query, State},
};
use gusen_model::{ApiResponse, LoginLogEntry, Page, PageQuery};

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<LoginLogEntry>>>> {
    let page = state.activity.list_logs(&query.normalize()).await?;
    Ok(Json(ApiResponse::success(page)))
}
