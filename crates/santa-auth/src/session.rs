//! Session lifecycle manager — identify, sign-in, sign-up, validation,
//! logout, and expired-session sweeping.
//!
//! Sign-in is email-first: a regular user presents only their email and
//! receives a session immediately; an admin account must follow up with
//! a password. Sign-up derives the user's domain from the email address
//! and requires that domain to be registered and enabled.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use santa_core::config::session::SessionConfig;
use santa_core::error::AppError;
use santa_core::result::AppResult;
use santa_database::repositories::domain::DomainRepository;
use santa_database::repositories::session::SessionRepository;
use santa_database::repositories::user::UserRepository;
use santa_entity::session::{CreateSession, Session};
use santa_entity::user::{CreateUser, User};

use crate::password;
use crate::token::{generate_token, hash_token};

/// A freshly issued bearer token and its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionToken {
    /// The plaintext token, shown to the client exactly once.
    pub token: String,
    /// When the session expires.
    pub expires_at: chrono::DateTime<Utc>,
}

/// Outcome of the email-first identification step.
#[derive(Debug, Clone)]
pub enum IdentifyOutcome {
    /// No account with this email; the client should offer sign-up.
    Unknown,
    /// The account is an admin; a password is required to sign in.
    AdminPasswordRequired,
    /// Regular account; a session has been issued.
    SignedIn { user: User, token: SessionToken },
}

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Session persistence.
    session_repo: Arc<SessionRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Domain repository (sign-up gating).
    domain_repo: Arc<DomainRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        session_repo: Arc<SessionRepository>,
        user_repo: Arc<UserRepository>,
        domain_repo: Arc<DomainRepository>,
        config: SessionConfig,
    ) -> Self {
        Self {
            session_repo,
            user_repo,
            domain_repo,
            config,
        }
    }

    /// Email-first identification: resolve what the client should do
    /// next, issuing a session directly for non-admin accounts.
    pub async fn identify(&self, email: &str) -> AppResult<IdentifyOutcome> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(IdentifyOutcome::Unknown);
        };

        if user.is_admin {
            return Ok(IdentifyOutcome::AdminPasswordRequired);
        }

        let token = self.issue_session(&user).await?;
        Ok(IdentifyOutcome::SignedIn { user, token })
    }

    /// Admin sign-in with email and password.
    pub async fn login_admin(&self, email: &str, password: &str) -> AppResult<(User, SessionToken)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let Some(ref hash) = user.password_hash else {
            warn!(email = %email, "Password sign-in attempted for account without password");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !user.is_admin || !password::verify(password, hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = self.issue_session(&user).await?;
        info!(user_id = %user.id, "Admin signed in");
        Ok((user, token))
    }

    /// Sign up a new participant. The domain is taken from the email
    /// address and must be registered and enabled.
    pub async fn register(&self, email: &str) -> AppResult<(User, SessionToken)> {
        let email = email.trim().to_lowercase();
        let Some((_, domain_name)) = email.split_once('@') else {
            return Err(AppError::validation("Invalid email address"));
        };

        let domain = self
            .domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| {
                AppError::forbidden(format!("Domain '{domain_name}' is not registered"))
            })?;

        if !domain.is_enabled {
            return Err(AppError::forbidden(format!(
                "Domain '{domain_name}' is currently disabled"
            )));
        }

        let user = self
            .user_repo
            .create(&CreateUser {
                email: email.clone(),
                is_admin: false,
                password_hash: None,
                domain_id: Some(domain.id),
            })
            .await?;

        let token = self.issue_session(&user).await?;
        info!(user_id = %user.id, domain = %domain.name, "User registered");
        Ok((user, token))
    }

    /// Validate a bearer token and return the session with its user.
    pub async fn authenticate(&self, token: &str) -> AppResult<(User, Session)> {
        let session = self
            .session_repo
            .find_valid_by_token_hash(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))?;

        Ok((user, session))
    }

    /// Destroy the session behind a bearer token.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.session_repo
            .delete_by_token_hash(&hash_token(token))
            .await?;
        Ok(())
    }

    /// Delete expired sessions. Returns how many were removed.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        let removed = self.session_repo.delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Swept expired sessions");
        }
        Ok(removed)
    }

    /// Issue a fresh session for a user.
    async fn issue_session(&self, user: &User) -> AppResult<SessionToken> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.config.ttl_hours as i64);

        self.session_repo
            .create(&CreateSession {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at,
            })
            .await?;

        Ok(SessionToken { token, expires_at })
    }
}
