//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use santa_core::error::AppError;
use santa_entity::user::{AdminUserRow, UpdateUser, User};

use crate::dto::request::{ResetPasswordRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AdminUserRow>>>, AppError> {
    let users = state.admin_user_service.list_users(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .admin_user_service
        .update_user(
            &auth,
            id,
            UpdateUser {
                email: req.email,
                department_id: req.department_id,
                is_admin: req.is_admin,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/admin/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .admin_user_service
        .reset_password(&auth, id, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password updated".to_string(),
    })))
}

/// DELETE /api/admin/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.admin_user_service.delete_user(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deleted".to_string(),
    })))
}
