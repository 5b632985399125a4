//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered participant or administrator.
///
/// Regular users sign in with their email alone; administrators carry an
/// Argon2 password hash and must present a password.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique, lowercased).
    pub email: String,
    /// Whether this user has admin privileges.
    pub is_admin: bool,
    /// Argon2 password hash (admins only).
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// The email domain this user belongs to.
    pub domain_id: Option<Uuid>,
    /// The department the user has chosen (if any).
    pub department_id: Option<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Whether the user is an admin.
    pub is_admin: bool,
    /// Pre-hashed password (admins only).
    pub password_hash: Option<String>,
    /// The email domain the user belongs to.
    pub domain_id: Option<Uuid>,
}

/// Data for an admin updating an existing user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New email address.
    pub email: String,
    /// New department (or none).
    pub department_id: Option<Uuid>,
    /// New admin flag.
    pub is_admin: bool,
}

/// Joined row for the admin user listing: user plus domain, department,
/// and wishlist link details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUserRow {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Name of the user's email domain.
    pub domain_name: Option<String>,
    /// Department ID (if chosen).
    pub department_id: Option<Uuid>,
    /// Department name (if chosen).
    pub department_name: Option<String>,
    /// The user's wishlist link URL (if submitted).
    pub link_url: Option<String>,
}
