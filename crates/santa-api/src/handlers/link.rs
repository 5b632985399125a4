//! Wishlist link handlers — own link, submission, allocation, and
//! purchase/problem reporting.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use santa_core::error::AppError;

use crate::dto::request::{AllocateRequest, SubmitLinkRequest};
use crate::dto::response::{
    AllocatedLinksResponse, ApiResponse, MessageResponse, OwnLink, OwnLinkResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/links
pub async fn own_link(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<OwnLinkResponse>>, AppError> {
    let link = state.link_service.own_link(&auth).await?;

    Ok(Json(ApiResponse::ok(OwnLinkResponse {
        link: link.map(|l| OwnLink { id: l.id, url: l.url }),
    })))
}

/// PUT /api/links
pub async fn submit_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubmitLinkRequest>,
) -> Result<Json<ApiResponse<OwnLinkResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let link = state.link_service.submit(&auth, &req.url).await?;

    Ok(Json(ApiResponse::ok(OwnLinkResponse {
        link: Some(OwnLink { id: link.id, url: link.url }),
    })))
}

/// POST /api/links/allocate
pub async fn allocate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AllocateRequest>,
) -> Result<Json<ApiResponse<AllocatedLinksResponse>>, AppError> {
    let allocated = state.allocation_engine.allocate(&auth, req.additional).await?;

    Ok(Json(ApiResponse::ok(AllocatedLinksResponse { allocated })))
}

/// GET /api/links/allocated
pub async fn allocated(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AllocatedLinksResponse>>, AppError> {
    let allocated = state.link_service.allocated(&auth).await?;

    Ok(Json(ApiResponse::ok(AllocatedLinksResponse { allocated })))
}

/// POST /api/links/{id}/purchased
pub async fn report_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.link_service.report_purchase(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Purchase recorded".to_string(),
    })))
}

/// POST /api/links/{id}/report-error
pub async fn report_error(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.link_service.report_error(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Problem recorded".to_string(),
    })))
}
