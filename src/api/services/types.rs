//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::errors::LinkboardError;
use crate::services::link_service::{LinkDetail, build_short_url};
use crate::storage::{LinkWithClicks, ReferrerCount};

use migration::entities::{short_link, user};

/// API 错误码枚举
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证/账号错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证/账号错误 2000-2099
    UsernameTaken = 2000,

    // 链接错误 3000-3099
    SlugTaken = 3000,
}

impl From<&LinkboardError> for ErrorCode {
    fn from(err: &LinkboardError) -> Self {
        match err {
            LinkboardError::Validation(_) => ErrorCode::BadRequest,
            LinkboardError::NotFound(_) => ErrorCode::NotFound,
            LinkboardError::Unauthorized(_) => ErrorCode::Unauthorized,
            LinkboardError::UsernameTaken(_) => ErrorCode::UsernameTaken,
            LinkboardError::SlugTaken(_) => ErrorCode::SlugTaken,
            _ => ErrorCode::InternalServerError,
        }
    }
}

/// 统一 JSON 响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

// ============ 账号相关 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthSuccessResponse {
    pub message: String,
    pub user: UserResponse,
    /// access token 剩余有效期（秒）
    pub expires_in: u64,
}

// ============ 链接相关 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    #[serde(default)]
    pub title: String,
    pub original_url: String,
    pub slug: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkResponse {
    pub id: i64,
    pub title: String,
    pub original_url: String,
    pub slug: String,
    pub short_url: String,
    pub is_active: bool,
    pub created_at: String,
    pub click_count: i64,
}

impl From<LinkWithClicks> for LinkResponse {
    fn from(row: LinkWithClicks) -> Self {
        Self {
            id: row.id,
            title: row.title,
            short_url: build_short_url(&row.slug),
            original_url: row.original_url,
            slug: row.slug,
            is_active: row.is_active,
            created_at: row.created_at.to_rfc3339(),
            click_count: row.click_count,
        }
    }
}

impl From<short_link::Model> for LinkResponse {
    fn from(link: short_link::Model) -> Self {
        Self {
            id: link.id,
            title: link.title,
            short_url: build_short_url(&link.slug),
            original_url: link.original_url,
            slug: link.slug,
            is_active: link.is_active,
            created_at: link.created_at.to_rfc3339(),
            // 新建链接还没有任何点击
            click_count: 0,
        }
    }
}

/// 链接详情 + 统计信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkDetailResponse {
    pub id: i64,
    pub title: String,
    pub original_url: String,
    pub slug: String,
    pub short_url: String,
    pub is_active: bool,
    pub created_at: String,
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub top_referrers: Vec<ReferrerCount>,
}

impl From<LinkDetail> for LinkDetailResponse {
    fn from(detail: LinkDetail) -> Self {
        Self {
            id: detail.link.id,
            title: detail.link.title,
            original_url: detail.link.original_url,
            slug: detail.link.slug,
            short_url: detail.short_url,
            is_active: detail.link.is_active,
            created_at: detail.link.created_at.to_rfc3339(),
            total_clicks: detail.total_clicks,
            unique_clicks: detail.unique_clicks,
            top_referrers: detail.top_referrers,
        }
    }
}

// ============ 健康检查相关 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub storage: HealthStorageCheck,
}
