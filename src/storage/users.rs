//! User accounts: insert and lookup

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};

use super::AppStorage;
use crate::errors::{LinkboardError, Result};

use migration::entities::user;

impl AppStorage {
    /// 创建用户，用户名冲突映射为 UsernameTaken
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<user::Model> {
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) if is_unique_violation(&e) => Err(LinkboardError::username_taken(format!(
                "Username '{}' is already taken",
                username
            ))),
            Err(e) => Err(LinkboardError::database_operation(format!(
                "创建用户失败: {}",
                e
            ))),
        }
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("查询用户失败: {}", e)))
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<user::Model>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("查询用户失败: {}", e)))
    }
}

/// 判断是否是唯一约束冲突错误
pub(super) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
