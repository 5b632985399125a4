//! Admin domain management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use santa_core::error::AppError;
use santa_entity::domain::{DomainWithUsers, EmailDomain};

use crate::dto::request::CreateDomainRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/domains
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<DomainWithUsers>>>, AppError> {
    let domains = state.admin_domain_service.list_domains(&auth).await?;
    Ok(Json(ApiResponse::ok(domains)))
}

/// POST /api/admin/domains
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDomainRequest>,
) -> Result<Json<ApiResponse<EmailDomain>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let domain = state
        .admin_domain_service
        .create_domain(&auth, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(domain)))
}

/// POST /api/admin/domains/{id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmailDomain>>, AppError> {
    let domain = state.admin_domain_service.toggle_domain(&auth, id).await?;
    Ok(Json(ApiResponse::ok(domain)))
}

/// DELETE /api/admin/domains/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.admin_domain_service.delete_domain(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Domain deleted".to_string(),
    })))
}
