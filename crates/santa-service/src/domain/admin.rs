//! Admin management of email domains and their departments.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use santa_core::error::AppError;
use santa_core::result::AppResult;
use santa_database::repositories::department::DepartmentRepository;
use santa_database::repositories::domain::DomainRepository;
use santa_entity::department::{Department, DepartmentSummary};
use santa_entity::domain::{DomainWithUsers, EmailDomain};

use crate::context::RequestContext;

/// Handles admin operations on domains and departments.
#[derive(Debug, Clone)]
pub struct AdminDomainService {
    /// Domain repository.
    domain_repo: Arc<DomainRepository>,
    /// Department repository.
    department_repo: Arc<DepartmentRepository>,
}

impl AdminDomainService {
    /// Creates a new admin domain service.
    pub fn new(
        domain_repo: Arc<DomainRepository>,
        department_repo: Arc<DepartmentRepository>,
    ) -> Self {
        Self {
            domain_repo,
            department_repo,
        }
    }

    /// List all registered domains with their user counts.
    pub async fn list_domains(&self, ctx: &RequestContext) -> AppResult<Vec<DomainWithUsers>> {
        ctx.require_admin()?;
        self.domain_repo.list_with_user_counts().await
    }

    /// Register a new email domain.
    pub async fn create_domain(&self, ctx: &RequestContext, name: &str) -> AppResult<EmailDomain> {
        ctx.require_admin()?;

        let name = name.trim().to_lowercase();
        if name.is_empty() || !name.contains('.') || name.contains('@') {
            return Err(AppError::validation("Invalid domain name"));
        }

        let domain = self.domain_repo.create(&name).await?;
        info!(admin_id = %ctx.user_id, domain = %domain.name, "Domain registered");
        Ok(domain)
    }

    /// Flip a domain's enabled flag.
    pub async fn toggle_domain(&self, ctx: &RequestContext, id: Uuid) -> AppResult<EmailDomain> {
        ctx.require_admin()?;
        let domain = self.domain_repo.toggle_enabled(id).await?;
        info!(
            admin_id = %ctx.user_id,
            domain = %domain.name,
            enabled = domain.is_enabled,
            "Domain toggled"
        );
        Ok(domain)
    }

    /// Delete a domain. Refused while any users remain registered
    /// under it.
    pub async fn delete_domain(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        if self.domain_repo.has_users(id).await? {
            return Err(AppError::conflict(
                "Cannot delete domain: delete all users in this domain first",
            ));
        }

        if !self.domain_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Domain {id} not found")));
        }

        info!(admin_id = %ctx.user_id, domain_id = %id, "Domain deleted");
        Ok(())
    }

    /// List a domain's departments with member and link counts.
    pub async fn list_departments(
        &self,
        ctx: &RequestContext,
        domain_id: Uuid,
    ) -> AppResult<Vec<DepartmentSummary>> {
        ctx.require_admin()?;
        self.department_repo.list_with_counts(domain_id).await
    }

    /// Add a department to a domain.
    pub async fn create_department(
        &self,
        ctx: &RequestContext,
        domain_id: Uuid,
        name: &str,
    ) -> AppResult<Department> {
        ctx.require_admin()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Department name is required"));
        }

        self.domain_repo
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Domain {domain_id} not found")))?;

        let department = self.department_repo.create(domain_id, name).await?;
        info!(
            admin_id = %ctx.user_id,
            domain_id = %domain_id,
            department = %department.name,
            "Department created"
        );
        Ok(department)
    }

    /// Delete a department.
    pub async fn delete_department(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        if !self.department_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Department {id} not found")));
        }

        info!(admin_id = %ctx.user_id, department_id = %id, "Department deleted");
        Ok(())
    }
}
