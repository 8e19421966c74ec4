//! 链接管理 API：列表、创建、详情

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use tracing::{info, warn};

use crate::api::middleware::AuthUser;
use crate::services::{CreateLinkRequest, LinkService};

use super::helpers::{created_response, error_from_linkboard, error_response, success_response};
use super::types::{ErrorCode, LinkDetailResponse, LinkResponse, PostNewLink};

/// 从请求扩展中取出中间件写入的用户标识
fn current_user(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<AuthUser>().map(|user| user.0)
}

/// GET /api/links
pub async fn list_links(links: web::Data<LinkService>, req: HttpRequest) -> HttpResponse {
    let Some(owner_id) = current_user(&req) else {
        return unauthorized();
    };

    match links.list_links(owner_id).await {
        Ok(rows) => {
            let rows: Vec<LinkResponse> = rows.into_iter().map(LinkResponse::from).collect();
            success_response(rows)
        }
        Err(err) => {
            warn!("Failed to list links for user {}: {}", owner_id, err);
            error_from_linkboard(&err)
        }
    }
}

/// POST /api/links
pub async fn create_link(
    links: web::Data<LinkService>,
    req: HttpRequest,
    payload: web::Json<PostNewLink>,
) -> HttpResponse {
    let Some(owner_id) = current_user(&req) else {
        return unauthorized();
    };

    let payload = payload.into_inner();
    let request = CreateLinkRequest {
        title: payload.title,
        original_url: payload.original_url,
        slug: payload.slug,
    };

    match links.create_link(owner_id, request).await {
        Ok(link) => {
            info!("User {} created link '{}'", owner_id, link.slug);
            created_response(LinkResponse::from(link))
        }
        Err(err) => {
            warn!("Failed to create link for user {}: {}", owner_id, err);
            error_from_linkboard(&err)
        }
    }
}

/// GET /api/links/{id}
pub async fn link_detail(
    links: web::Data<LinkService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> HttpResponse {
    let Some(owner_id) = current_user(&req) else {
        return unauthorized();
    };
    let link_id = path.into_inner();

    match links.link_detail(owner_id, link_id).await {
        Ok(detail) => success_response(LinkDetailResponse::from(detail)),
        Err(err) => error_from_linkboard(&err),
    }
}

fn unauthorized() -> HttpResponse {
    error_response(
        StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthorized,
        "Authentication required",
    )
}

/// 注册链接管理路由（挂在认证中间件之内）
pub fn configure_link_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/links", web::get().to(list_links))
        .route("/links", web::post().to(create_link))
        .route("/links/{id}", web::get().to(link_detail));
}
