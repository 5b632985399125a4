//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use santa_entity::link::LinkSummary;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Outcome of the email-first identification step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyResponse {
    /// Whether an account with this email exists.
    pub exists: bool,
    /// Whether the account requires a password (admin).
    pub is_admin: bool,
    /// Issued session token (regular accounts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Session expiry (when a token was issued).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Successful sign-in or sign-up response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token.
    pub token: String,
    /// Session expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: UserResponse,
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Chosen department, if any.
    pub department: Option<DepartmentResponse>,
}

/// Department summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    /// Department ID.
    pub id: Uuid,
    /// Department name.
    pub name: String,
}

/// Current-user response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The current user.
    pub user: UserResponse,
    /// Whether the user's email domain is currently enabled.
    pub domain_enabled: bool,
}

/// The caller's own wishlist link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnLinkResponse {
    /// The link, if one has been submitted.
    pub link: Option<OwnLink>,
}

/// Identity and URL of the caller's own link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnLink {
    /// Link ID.
    pub id: Uuid,
    /// Wishlist URL.
    pub url: String,
}

/// Links handed to the caller, with their counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatedLinksResponse {
    /// The allocated links.
    pub allocated: Vec<LinkSummary>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
}
