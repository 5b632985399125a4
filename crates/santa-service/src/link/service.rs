//! Wishlist link operations — submit/replace a link, view your own,
//! view what you've been allocated, and report purchases or problems.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;
use uuid::Uuid;

use santa_core::error::AppError;
use santa_core::result::AppResult;
use santa_database::repositories::allocation::AllocationRepository;
use santa_database::repositories::link::LinkRepository;
use santa_entity::link::{LinkSummary, UpsertLink, WishlistLink};

use crate::context::RequestContext;

/// Accepted wishlist URL shape (Amazon UK wishlists only).
static WISHLIST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.amazon\.co\.uk/hz/wishlist/[A-Za-z0-9?=&#_/-]+$")
        .expect("wishlist URL pattern is valid")
});

/// Handles wishlist link self-service operations.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Link repository.
    link_repo: Arc<LinkRepository>,
    /// Allocation repository (read side + report guards).
    allocation_repo: Arc<AllocationRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repo: Arc<LinkRepository>, allocation_repo: Arc<AllocationRepository>) -> Self {
        Self {
            link_repo,
            allocation_repo,
        }
    }

    /// The caller's own wishlist link, if submitted.
    pub async fn own_link(&self, ctx: &RequestContext) -> AppResult<Option<WishlistLink>> {
        self.link_repo.find_by_owner(ctx.user_id).await
    }

    /// Create or replace the caller's wishlist link.
    pub async fn submit(&self, ctx: &RequestContext, url: &str) -> AppResult<WishlistLink> {
        let url = url.trim();
        if !WISHLIST_URL.is_match(url) {
            return Err(AppError::validation(
                "Invalid Amazon UK wishlist link format",
            ));
        }

        let link = self
            .link_repo
            .upsert(&UpsertLink {
                owner_id: ctx.user_id,
                url: url.to_string(),
                domain_id: ctx.domain_id,
                department_id: ctx.department_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, link_id = %link.id, "Wishlist link submitted");
        Ok(link)
    }

    /// Links previously allocated to the caller, oldest first.
    pub async fn allocated(&self, ctx: &RequestContext) -> AppResult<Vec<LinkSummary>> {
        self.allocation_repo.find_allocated_links(ctx.user_id).await
    }

    /// Record that the caller bought something from an allocated link.
    pub async fn report_purchase(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        self.require_allocation(ctx, link_id).await?;
        self.link_repo.record_purchase(link_id).await?;
        info!(user_id = %ctx.user_id, link_id = %link_id, "Purchase reported");
        Ok(())
    }

    /// Record that an allocated link is broken or otherwise unusable.
    pub async fn report_error(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        self.require_allocation(ctx, link_id).await?;
        self.link_repo.record_error(link_id).await?;
        info!(user_id = %ctx.user_id, link_id = %link_id, "Link problem reported");
        Ok(())
    }

    /// Reports are only accepted from users the link was allocated to.
    async fn require_allocation(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        self.allocation_repo
            .find_allocation(ctx.user_id, link_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::forbidden("Link is not allocated to you"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_url_pattern() {
        assert!(WISHLIST_URL.is_match("https://www.amazon.co.uk/hz/wishlist/ls/ABC123XYZ"));
        assert!(WISHLIST_URL.is_match("https://www.amazon.co.uk/hz/wishlist/ls/1X2Y?ref_=abc"));

        assert!(!WISHLIST_URL.is_match("https://www.amazon.com/hz/wishlist/ls/ABC123"));
        assert!(!WISHLIST_URL.is_match("http://www.amazon.co.uk/hz/wishlist/ls/ABC123"));
        assert!(!WISHLIST_URL.is_match("https://www.amazon.co.uk/gp/product/B000000000"));
        assert!(!WISHLIST_URL.is_match("https://example.com/?u=https://www.amazon.co.uk/hz/wishlist/x"));
    }
}
