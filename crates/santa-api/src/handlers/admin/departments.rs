//! Admin department management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use santa_core::error::AppError;
use santa_entity::department::{Department, DepartmentSummary};

use crate::dto::request::{CreateDepartmentRequest, DepartmentListQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/departments?domain_id=...
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DepartmentListQuery>,
) -> Result<Json<ApiResponse<Vec<DepartmentSummary>>>, AppError> {
    let departments = state
        .admin_domain_service
        .list_departments(&auth, query.domain_id)
        .await?;
    Ok(Json(ApiResponse::ok(departments)))
}

/// POST /api/admin/departments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let department = state
        .admin_domain_service
        .create_department(&auth, req.domain_id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(department)))
}

/// DELETE /api/admin/departments/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .admin_domain_service
        .delete_department(&auth, id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Department deleted".to_string(),
    })))
}
