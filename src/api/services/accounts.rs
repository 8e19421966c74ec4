//! 账户相关 API：注册、登录、刷新令牌、登出

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{info, warn};

use crate::api::jwt::get_jwt_service;
use crate::services::AccountService;

use super::helpers::{CookieBuilder, error_from_linkboard, error_response, json_response};
use super::types::{
    AuthSuccessResponse, ErrorCode, LoginCredentials, MessageResponse, SignupRequest, UserResponse,
};

/// POST /api/auth/signup
pub async fn signup(
    accounts: web::Data<AccountService>,
    payload: web::Json<SignupRequest>,
) -> HttpResponse {
    let payload = payload.into_inner();

    match accounts.register(&payload.username, &payload.password).await {
        Ok(user) => {
            info!("User registered: {}", user.username);
            issue_session(user.id, UserResponse::from(user), StatusCode::CREATED)
        }
        Err(err) => {
            warn!("Signup rejected: {}", err);
            error_from_linkboard(&err)
        }
    }
}

/// POST /api/auth/login
pub async fn login(
    accounts: web::Data<AccountService>,
    payload: web::Json<LoginCredentials>,
) -> HttpResponse {
    let payload = payload.into_inner();

    match accounts
        .verify_credentials(&payload.username, &payload.password)
        .await
    {
        Ok(user) => {
            info!("User logged in: {}", user.username);
            issue_session(user.id, UserResponse::from(user), StatusCode::OK)
        }
        Err(err) => {
            warn!("Login failed for '{}': {}", payload.username, err);
            error_from_linkboard(&err)
        }
    }
}

/// POST /api/auth/refresh
///
/// 使用 refresh cookie 换取新的一对令牌
pub async fn refresh(accounts: web::Data<AccountService>, req: HttpRequest) -> HttpResponse {
    let cookies = CookieBuilder::from_config();

    let Some(refresh_cookie) = req.cookie(cookies.refresh_cookie_name()) else {
        return error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Missing refresh token",
        );
    };

    let jwt_service = get_jwt_service();

    let user_id = match jwt_service.validate_refresh_token(refresh_cookie.value()) {
        Ok(claims) => match claims.user_id() {
            Some(id) => id,
            None => {
                return error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Invalid refresh token",
                );
            }
        },
        Err(err) => {
            warn!("Refresh token validation failed: {}", err);
            return error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Invalid refresh token",
            );
        }
    };

    // 令牌有效但用户已不存在时同样拒绝
    match accounts.find_by_id(user_id).await {
        Ok(Some(user)) => issue_session(user.id, UserResponse::from(user), StatusCode::OK),
        Ok(None) => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Invalid refresh token",
        ),
        Err(err) => error_from_linkboard(&err),
    }
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    let cookies = CookieBuilder::from_config();

    let mut response = json_response(
        StatusCode::OK,
        ErrorCode::Success,
        "OK",
        Some(MessageResponse {
            message: "Logged out".to_string(),
        }),
    );

    for cookie in [
        cookies.build_expired_access_cookie(),
        cookies.build_expired_refresh_cookie(),
    ] {
        if let Err(err) = response.add_cookie(&cookie) {
            warn!("Failed to attach expired cookie: {}", err);
        }
    }

    response
}

/// 签发一对新令牌并写入 cookie
fn issue_session(user_id: i64, user: UserResponse, status: StatusCode) -> HttpResponse {
    let jwt_service = get_jwt_service();

    let tokens = jwt_service
        .generate_access_token(user_id)
        .and_then(|access| {
            jwt_service
                .generate_refresh_token(user_id)
                .map(|refresh| (access, refresh))
        });
    let (access_token, refresh_token) = match tokens {
        Ok(pair) => pair,
        Err(err) => {
            tracing::error!("Failed to sign session tokens: {}", err);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to create session",
            );
        }
    };

    let cookies = CookieBuilder::from_config();

    let mut response = json_response(
        status,
        ErrorCode::Success,
        "OK",
        Some(AuthSuccessResponse {
            message: "Authenticated".to_string(),
            user,
            expires_in: cookies.access_token_minutes() * 60,
        }),
    );

    for cookie in [
        cookies.build_access_cookie(access_token),
        cookies.build_refresh_cookie(refresh_token),
    ] {
        if let Err(err) = response.add_cookie(&cookie) {
            warn!("Failed to attach session cookie: {}", err);
        }
    }

    response
}

/// 注册认证相关路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout)),
    );
}
