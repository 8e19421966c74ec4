use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, trace};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;
use crate::api::services::types::{ApiResponse, ErrorCode};

/// 认证通过后写入请求扩展的用户标识
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser(pub i64);

/// Authentication middleware for the user-facing API
///
/// Accepts a Bearer token in the Authorization header or the access token
/// cookie; on success the authenticated user id is inserted into the
/// request extensions as [`AuthUser`].
#[derive(Clone)]
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    /// Handle unauthorized requests
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: Invalid or missing token".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    /// 校验 token 并解析出用户 ID
    fn authenticated_user(token: &str) -> Option<i64> {
        let jwt_service = get_jwt_service();
        match jwt_service.validate_access_token(token) {
            Ok(claims) => {
                let user_id = claims.user_id();
                if user_id.is_none() {
                    info!("Access token carried a non-numeric subject");
                }
                user_id
            }
            Err(e) => {
                info!("Access token validation failed: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // Handle CORS preflight requests
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            // 1. 先尝试 Bearer Token 认证（API 用户）
            if let Some(token) = Self::extract_bearer_token(&req)
                && let Some(user_id) = Self::authenticated_user(&token)
            {
                trace!("Authentication successful via Bearer token");
                req.extensions_mut().insert(AuthUser(user_id));
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            // 2. 再尝试 Cookie 认证（浏览器会话）
            if let Some(cookie) = req.cookie(constants::ACCESS_COOKIE_NAME)
                && let Some(user_id) = Self::authenticated_user(cookie.value())
            {
                trace!("Authentication successful via access cookie");
                req.extensions_mut().insert(AuthUser(user_id));
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            // 两种认证都失败
            Ok(Self::handle_unauthorized(req))
        })
    }
}
