//! 短链接跳转处理

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;
use uuid::Uuid;

use crate::api::constants::VISITOR_COOKIE_NAME;
use crate::config::get_config;
use crate::services::{ClickRecord, ClickService, LinkService};
use crate::utils::ip::extract_client_ip;

use super::helpers::CookieBuilder;

/// GET /r/{slug}
///
/// 查找启用状态的链接，记录点击事件后 302 跳转。
/// 未知或停用的 slug 一律返回 404，不泄露链接是否存在过。
pub async fn redirect_slug(
    links: web::Data<LinkService>,
    clicks: web::Data<ClickService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let slug = path.into_inner();

    let link = match links.find_active_by_slug(&slug).await {
        Ok(Some(link)) => link,
        Ok(None) => {
            debug!("Slug not found or inactive: {}", slug);
            return not_found_response();
        }
        Err(err) => {
            tracing::error!("Redirect lookup failed for '{}': {}", slug, err);
            return not_found_response();
        }
    };

    // 复用已有的访客 cookie，否则生成新标识
    let visitor_id = match req.cookie(VISITOR_COOKIE_NAME) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => Uuid::new_v4().simple().to_string(),
    };

    let record = ClickRecord {
        visitor_id: visitor_id.clone(),
        ip_address: extract_client_ip(&req),
        user_agent: header_value(&req, "User-Agent"),
        referrer: header_value(&req, "Referer"),
        accept_language: header_value(&req, "Accept-Language"),
    };
    clicks.record_click(link.id, record).await;

    let mut response = HttpResponse::Found()
        .append_header(("Location", link.original_url))
        .finish();

    // 每次重定向都重发 cookie，让有效期随访问滚动
    let max_age_days = get_config().shortener.visitor_cookie_days;
    let cookie = CookieBuilder::from_config().build_visitor_cookie(visitor_id, max_age_days);
    if let Err(err) = response.add_cookie(&cookie) {
        tracing::warn!("Failed to attach visitor cookie: {}", err);
    }

    response
}

fn header_value(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}

fn not_found_response() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND)
        .append_header(("Content-Type", "text/html; charset=utf-8"))
        .append_header(("Cache-Control", "public, max-age=60"))
        .body("Not Found")
}
