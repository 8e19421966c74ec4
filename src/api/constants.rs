//! API 层常量

/// Access token cookie 名称
pub const ACCESS_COOKIE_NAME: &str = "lb_access_token";

/// Refresh token cookie 名称
pub const REFRESH_COOKIE_NAME: &str = "lb_refresh_token";

/// 访客标识 cookie 名称（点击归因）
pub const VISITOR_COOKIE_NAME: &str = "visitor_id";
