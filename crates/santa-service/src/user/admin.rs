//! Admin management of user accounts.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use santa_auth::password;
use santa_core::error::AppError;
use santa_core::result::AppResult;
use santa_database::repositories::session::SessionRepository;
use santa_database::repositories::user::UserRepository;
use santa_entity::user::{AdminUserRow, UpdateUser, User};

use crate::context::RequestContext;

/// Handles admin operations on user accounts.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session repository (revocation on delete).
    session_repo: Arc<SessionRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, session_repo: Arc<SessionRepository>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// List all users with their domain, department, and link details.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<AdminUserRow>> {
        ctx.require_admin()?;
        self.user_repo.list_admin_rows().await
    }

    /// Update a user's email, department, and admin flag.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateUser,
    ) -> AppResult<User> {
        ctx.require_admin()?;

        if !data.email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }

        let user = self.user_repo.update(id, &data).await?;
        info!(admin_id = %ctx.user_id, user_id = %id, "User updated");
        Ok(user)
    }

    /// Set a user's password (for admin accounts signing in with one).
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_password: &str,
    ) -> AppResult<()> {
        ctx.require_admin()?;

        if new_password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let hash = password::hash(new_password)?;
        self.user_repo.update_password(id, &hash).await?;

        info!(admin_id = %ctx.user_id, user_id = %id, "Password reset");
        Ok(())
    }

    /// Delete a user account and revoke their sessions.
    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        if id == ctx.user_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        self.session_repo.delete_by_user(id).await?;
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }

        info!(admin_id = %ctx.user_id, user_id = %id, "User deleted");
        Ok(())
    }
}
