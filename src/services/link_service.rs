//! Link management service
//!
//! Provides the business logic for link operations: slug generation with
//! collision retry, custom-slug validation, dashboard listing, and the
//! per-link stats used by the detail endpoint.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::get_config;
use crate::errors::LinkboardError;
use crate::storage::{AppStorage, LinkWithClicks, NewShortLink, ReferrerCount};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_slug, is_valid_slug};

use migration::entities::short_link;

/// Title 长度上限（与 short_links.title 列宽一致）
const MAX_TITLE_LEN: usize = 120;
/// 随机 slug 碰撞重试上限；62^6 的空间下几乎不会用到
const MAX_SLUG_ATTEMPTS: usize = 10;
/// detail 页展示的 referrer 条数
const TOP_REFERRER_LIMIT: u64 = 5;

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Display title (may be empty)
    pub title: String,
    /// Target URL
    pub original_url: String,
    /// Custom slug (optional, will be generated if not provided)
    pub slug: Option<String>,
}

/// Link detail with stats, as shown on the per-link dashboard
#[derive(Debug, Clone)]
pub struct LinkDetail {
    pub link: short_link::Model,
    /// 完整短链接（public_url + /r/{slug}）
    pub short_url: String,
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub top_referrers: Vec<ReferrerCount>,
}

/// Service for link management operations
pub struct LinkService {
    storage: Arc<AppStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<AppStorage>) -> Self {
        Self { storage }
    }

    fn slug_length(&self) -> usize {
        get_config().shortener.slug_length
    }

    /// Create a new short link
    ///
    /// Custom slugs are validated and checked for uniqueness; missing slugs
    /// are generated with a bounded collision retry. The unique index on
    /// `short_links.slug` remains the final arbiter under concurrency.
    pub async fn create_link(
        &self,
        owner_id: i64,
        req: CreateLinkRequest,
    ) -> Result<short_link::Model, LinkboardError> {
        // Validate URL
        validate_url(&req.original_url)
            .map_err(|e| LinkboardError::validation(e.to_string()))?;

        let title = req.title.trim().to_string();
        if title.len() > MAX_TITLE_LEN {
            return Err(LinkboardError::validation(format!(
                "Title too long (max {} characters)",
                MAX_TITLE_LEN
            )));
        }

        match req.slug.filter(|s| !s.is_empty()) {
            Some(slug) => {
                // 自定义 slug：格式 + 占用检查
                if !is_valid_slug(&slug) {
                    return Err(LinkboardError::validation(format!(
                        "Invalid slug '{}'. Only alphanumeric, underscore and hyphen allowed (max 32 chars).",
                        slug
                    )));
                }
                if self.storage.slug_exists(&slug).await? {
                    return Err(LinkboardError::slug_taken(format!(
                        "Slug '{}' is already in use",
                        slug
                    )));
                }

                let link = self
                    .storage
                    .insert_link(NewShortLink {
                        owner_id,
                        title,
                        original_url: req.original_url,
                        slug,
                    })
                    .await?;

                info!(
                    "LinkService: created link '{}' -> '{}' (custom slug)",
                    link.slug, link.original_url
                );
                Ok(link)
            }
            None => {
                self.create_with_generated_slug(owner_id, title, req.original_url)
                    .await
            }
        }
    }

    /// 自动生成 slug 并插入，碰撞时换一个重试
    async fn create_with_generated_slug(
        &self,
        owner_id: i64,
        title: String,
        original_url: String,
    ) -> Result<short_link::Model, LinkboardError> {
        let length = self.slug_length();

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_random_slug(length);

            match self
                .storage
                .insert_link(NewShortLink {
                    owner_id,
                    title: title.clone(),
                    original_url: original_url.clone(),
                    slug: slug.clone(),
                })
                .await
            {
                Ok(link) => {
                    info!(
                        "LinkService: created link '{}' -> '{}' (generated slug)",
                        link.slug, link.original_url
                    );
                    return Ok(link);
                }
                Err(LinkboardError::SlugTaken(_)) => {
                    warn!(
                        "Slug collision on '{}' (attempt {}/{}), regenerating",
                        slug, attempt, MAX_SLUG_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LinkboardError::database_operation(format!(
            "Failed to generate a unique slug after {} attempts",
            MAX_SLUG_ATTEMPTS
        )))
    }

    /// Redirect lookup: only active links resolve
    pub async fn find_active_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<short_link::Model>, LinkboardError> {
        self.storage.find_active_link_by_slug(slug).await
    }

    /// Dashboard listing: the owner's links, newest first, with click counts
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<LinkWithClicks>, LinkboardError> {
        self.storage.list_links_by_owner(owner_id).await
    }

    /// Link detail + stats; 404 when the link is not owned by the caller
    pub async fn link_detail(
        &self,
        owner_id: i64,
        link_id: i64,
    ) -> Result<LinkDetail, LinkboardError> {
        let link = self
            .storage
            .find_link_by_id_and_owner(link_id, owner_id)
            .await?
            .ok_or_else(|| LinkboardError::not_found(format!("Link {} not found", link_id)))?;

        let total_clicks = self.storage.count_clicks(link.id).await?;
        let unique_clicks = self.storage.count_unique_visitors(link.id).await?;
        let top_referrers = self
            .storage
            .top_referrers(link.id, TOP_REFERRER_LIMIT)
            .await?;

        let short_url = build_short_url(&link.slug);

        Ok(LinkDetail {
            link,
            short_url,
            total_clicks,
            unique_clicks,
            top_referrers,
        })
    }
}

/// 拼接对外完整短链接
pub fn build_short_url(slug: &str) -> String {
    let base = get_config().server.public_url.trim_end_matches('/');
    format!("{}/r/{}", base, slug)
}
