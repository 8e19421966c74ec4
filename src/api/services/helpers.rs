//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::api::constants;
use crate::errors::LinkboardError;

use super::types::{ApiResponse, ErrorCode};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 Created 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkboardError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_linkboard(err: &LinkboardError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// Cookie 构建器，消除重复的 cookie 创建代码
pub struct CookieBuilder {
    secure: bool,
    access_token_minutes: u64,
    refresh_token_days: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let auth = &crate::config::get_config().auth;

        Self {
            secure: auth.cookie_secure,
            access_token_minutes: auth.access_token_minutes,
            refresh_token_days: auth.refresh_token_days,
        }
    }

    fn build_cookie_base(
        &self,
        name: String,
        value: String,
        path: String,
        max_age: Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path(path);
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_access_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::ACCESS_COOKIE_NAME.to_string(),
            token,
            "/".to_string(),
            Duration::minutes(self.access_token_minutes as i64),
        )
    }

    /// refresh cookie 只发给刷新端点，不随普通请求携带
    pub fn build_refresh_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::REFRESH_COOKIE_NAME.to_string(),
            token,
            "/api/auth".to_string(),
            Duration::days(self.refresh_token_days as i64),
        )
    }

    pub fn build_expired_access_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::ACCESS_COOKIE_NAME.to_string(),
            String::new(),
            "/".to_string(),
            Duration::ZERO,
        )
    }

    pub fn build_expired_refresh_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::REFRESH_COOKIE_NAME.to_string(),
            String::new(),
            "/api/auth".to_string(),
            Duration::ZERO,
        )
    }

    /// 访客标识 cookie：一年有效，SameSite=Lax，全站路径
    pub fn build_visitor_cookie(&self, visitor_id: String, max_age_days: u64) -> Cookie<'static> {
        self.build_cookie_base(
            constants::VISITOR_COOKIE_NAME.to_string(),
            visitor_id,
            "/".to_string(),
            Duration::days(max_age_days as i64),
        )
    }

    pub fn refresh_cookie_name(&self) -> &str {
        constants::REFRESH_COOKIE_NAME
    }

    pub fn access_token_minutes(&self) -> u64 {
        self.access_token_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = success_response("data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Something went wrong",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_from_linkboard_maps_status() {
        let err = LinkboardError::slug_taken("dup");
        let response = error_from_linkboard(&err);
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let err = LinkboardError::not_found("missing");
        let response = error_from_linkboard(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
