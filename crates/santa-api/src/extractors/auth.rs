//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates the session, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use santa_core::error::AppError;
use santa_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Derefs to [`RequestContext`] so handlers can pass `&auth` straight
/// into service methods.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let (user, session) = state.session_manager.authenticate(&token).await?;

        let ctx = RequestContext::new(
            user.id,
            session.id,
            user.email,
            user.is_admin,
            user.domain_id,
            user.department_id,
        );

        Ok(AuthUser(ctx))
    }
}

/// The raw bearer token, for endpoints that act on the session itself
/// (logout).
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts)?))
    }
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Result<String, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/links");
        if let Some(value) = value {
            builder = builder.header("authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        assert!(bearer_token(&parts_with_auth(None)).is_err());
        assert!(bearer_token(&parts_with_auth(Some("Basic abc123"))).is_err());
    }
}
