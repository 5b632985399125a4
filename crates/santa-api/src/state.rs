//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use santa_auth::session::SessionManager;
use santa_core::config::AppConfig;
use santa_database::DatabasePool;
use santa_database::repositories::department::DepartmentRepository;
use santa_database::repositories::domain::DomainRepository;
use santa_database::repositories::user::UserRepository;
use santa_service::allocation::AllocationEngine;
use santa_service::department::DepartmentService;
use santa_service::domain::AdminDomainService;
use santa_service::link::LinkService;
use santa_service::user::AdminUserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Domain repository
    pub domain_repo: Arc<DomainRepository>,
    /// Department repository
    pub department_repo: Arc<DepartmentRepository>,

    // ── Services ─────────────────────────────────────────────
    /// The link allocation engine
    pub allocation_engine: Arc<AllocationEngine>,
    /// Wishlist link service
    pub link_service: Arc<LinkService>,
    /// Department self-service
    pub department_service: Arc<DepartmentService>,
    /// Admin domain/department management
    pub admin_domain_service: Arc<AdminDomainService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
}
