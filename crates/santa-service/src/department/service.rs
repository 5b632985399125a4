//! Department self-service — list the departments of your domain and
//! choose the one you belong to.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use santa_core::error::AppError;
use santa_core::result::AppResult;
use santa_database::repositories::department::DepartmentRepository;
use santa_database::repositories::user::UserRepository;
use santa_entity::department::Department;

use crate::context::RequestContext;

/// Handles department self-service operations.
#[derive(Debug, Clone)]
pub struct DepartmentService {
    /// Department repository.
    department_repo: Arc<DepartmentRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl DepartmentService {
    /// Creates a new department service.
    pub fn new(
        department_repo: Arc<DepartmentRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            department_repo,
            user_repo,
        }
    }

    /// Departments available to the caller (those of their domain).
    pub async fn list_for_caller(&self, ctx: &RequestContext) -> AppResult<Vec<Department>> {
        let Some(domain_id) = ctx.domain_id else {
            return Ok(Vec::new());
        };
        self.department_repo.list_by_domain(domain_id).await
    }

    /// Set the caller's department. The department must belong to the
    /// caller's domain.
    pub async fn select(&self, ctx: &RequestContext, department_id: Uuid) -> AppResult<()> {
        let domain_id = ctx
            .domain_id
            .ok_or_else(|| AppError::validation("Your account has no domain"))?;

        self.department_repo
            .find_in_domain(department_id, domain_id)
            .await?
            .ok_or_else(|| AppError::validation("Invalid department for your domain"))?;

        self.user_repo.set_department(ctx.user_id, department_id).await?;

        info!(user_id = %ctx.user_id, department_id = %department_id, "Department selected");
        Ok(())
    }
}
