//! Account service
//!
//! Signup and credential verification, shared between HTTP handlers and tests.

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::LinkboardError;
use crate::storage::AppStorage;
use crate::utils::password::{hash_password, verify_password};

use migration::entities::user;

/// 用户名长度上限（与 users.username 列宽一致）
const MAX_USERNAME_LEN: usize = 150;
/// 密码最小长度
const MIN_PASSWORD_LEN: usize = 8;

pub struct AccountService {
    storage: Arc<AppStorage>,
}

impl AccountService {
    pub fn new(storage: Arc<AppStorage>) -> Self {
        Self { storage }
    }

    /// 注册新用户
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, LinkboardError> {
        let username = username.trim();

        if username.is_empty() {
            return Err(LinkboardError::validation("Username cannot be empty"));
        }
        if username.len() > MAX_USERNAME_LEN {
            return Err(LinkboardError::validation(format!(
                "Username too long (max {} characters)",
                MAX_USERNAME_LEN
            )));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(LinkboardError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = hash_password(password).map_err(|e| {
            error!("Failed to hash password: {}", e);
            LinkboardError::password_hash(e.to_string())
        })?;

        let user = self.storage.insert_user(username, &password_hash).await?;

        info!("AccountService: registered user '{}'", user.username);
        Ok(user)
    }

    /// 校验登录凭证，失败统一返回 Unauthorized（不泄露用户是否存在）
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, LinkboardError> {
        let user = self
            .storage
            .find_user_by_username(username.trim())
            .await?
            .ok_or_else(|| LinkboardError::unauthorized("Invalid username or password"))?;

        let valid = verify_password(password, &user.password_hash).map_err(|e| {
            error!("Password verification error: {}", e);
            LinkboardError::password_hash(e.to_string())
        })?;

        if !valid {
            return Err(LinkboardError::unauthorized("Invalid username or password"));
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, LinkboardError> {
        self.storage.find_user_by_id(id).await
    }
}
