//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Email-first identification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IdentifyRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Admin sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Wishlist link submission body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitLinkRequest {
    /// The wishlist URL.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// Allocation request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocateRequest {
    /// Whether this is an "additional" request (1 link) rather than the
    /// initial batch (3 links).
    #[serde(default)]
    pub additional: bool,
}

/// Department selection body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectDepartmentRequest {
    /// The chosen department.
    pub department_id: Uuid,
}

/// Domain registration body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDomainRequest {
    /// Domain name, e.g. `"example.co.uk"`.
    #[validate(length(min = 1, message = "Domain name is required"))]
    pub name: String,
}

/// Department creation body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    /// The domain the department belongs to.
    pub domain_id: Uuid,
    /// Department name.
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
}

/// Department listing query (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentListQuery {
    /// The domain whose departments to list.
    pub domain_id: Uuid,
}

/// Password reset body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// The new password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// User update body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// New department (or none).
    pub department_id: Option<Uuid>,
    /// New admin flag.
    pub is_admin: bool,
}
