//! Auth handlers — identify, login, register, logout, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use santa_auth::session::IdentifyOutcome;
use santa_core::error::AppError;
use santa_entity::user::User;

use crate::dto::request::{IdentifyRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, DepartmentResponse, IdentifyResponse, MeResponse, MessageResponse,
    SessionResponse, UserResponse,
};
use crate::extractors::{AuthUser, BearerToken};
use crate::state::AppState;

/// POST /api/auth/identify
///
/// Email-first sign-in: unknown emails are told to sign up, admins are
/// asked for a password, and regular users get a session directly.
pub async fn identify(
    State(state): State<AppState>,
    Json(req): Json<IdentifyRequest>,
) -> Result<Json<ApiResponse<IdentifyResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let response = match state.session_manager.identify(&req.email).await? {
        IdentifyOutcome::Unknown => IdentifyResponse {
            exists: false,
            is_admin: false,
            token: None,
            expires_at: None,
        },
        IdentifyOutcome::AdminPasswordRequired => IdentifyResponse {
            exists: true,
            is_admin: true,
            token: None,
            expires_at: None,
        },
        IdentifyOutcome::SignedIn { token, .. } => IdentifyResponse {
            exists: true,
            is_admin: false,
            token: Some(token.token),
            expires_at: Some(token.expires_at),
        },
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, token) = state
        .session_manager
        .login_admin(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        token: token.token,
        expires_at: token.expires_at,
        user: user_response(&state, &user).await?,
    })))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, token) = state.session_manager.register(&req.email).await?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        token: token.token,
        expires_at: token.expires_at,
        user: user_response(&state, &user).await?,
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.session_manager.logout(&token.0).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let user = state
        .user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    let domain_enabled = match user.domain_id {
        Some(domain_id) => state
            .domain_repo
            .find_by_id(domain_id)
            .await?
            .map(|d| d.is_enabled)
            .unwrap_or(false),
        None => false,
    };

    Ok(Json(ApiResponse::ok(MeResponse {
        user: user_response(&state, &user).await?,
        domain_enabled,
    })))
}

/// Resolve a user's department and build the shared user summary.
async fn user_response(state: &AppState, user: &User) -> Result<UserResponse, AppError> {
    let department = match user.department_id {
        Some(id) => state
            .department_repo
            .find_by_id(id)
            .await?
            .map(|d| DepartmentResponse {
                id: d.id,
                name: d.name,
            }),
        None => None,
    };

    Ok(UserResponse {
        id: user.id,
        email: user.email.clone(),
        is_admin: user.is_admin,
        department,
    })
}
