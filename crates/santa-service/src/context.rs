//! Request context carrying the authenticated user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use santa_core::error::AppError;
use santa_core::result::AppResult;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The user's email address.
    pub email: String,
    /// Whether the user has admin privileges.
    pub is_admin: bool,
    /// The user's email domain.
    pub domain_id: Option<Uuid>,
    /// The user's chosen department.
    pub department_id: Option<Uuid>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        session_id: Uuid,
        email: String,
        is_admin: bool,
        domain_id: Option<Uuid>,
        department_id: Option<Uuid>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            email,
            is_admin,
            domain_id,
            department_id,
            request_time: Utc::now(),
        }
    }

    /// Fail with `Forbidden` unless the current user is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator privileges required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let mut ctx = RequestContext::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "elf@north-pole.co.uk".to_string(),
            false,
            None,
            None,
        );
        assert!(ctx.require_admin().is_err());

        ctx.is_admin = true;
        assert!(ctx.require_admin().is_ok());
    }
}
