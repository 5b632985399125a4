//! Department self-service handlers.

use axum::Json;
use axum::extract::State;

use santa_core::error::AppError;
use santa_entity::department::Department;

use crate::dto::request::SelectDepartmentRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/departments
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Department>>>, AppError> {
    let departments = state.department_service.list_for_caller(&auth).await?;
    Ok(Json(ApiResponse::ok(departments)))
}

/// POST /api/departments/select
pub async fn select(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SelectDepartmentRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .department_service
        .select(&auth, req.department_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Department updated".to_string(),
    })))
}
