//! Short link queries and mutations

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::AppStorage;
use super::users::is_unique_violation;
use crate::errors::{LinkboardError, Result};

use migration::entities::{click_event, short_link};

/// 待插入的短链接
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub owner_id: i64,
    pub title: String,
    pub original_url: String,
    pub slug: String,
}

/// Dashboard 列表行：链接 + 点击计数（LEFT JOIN 聚合）
#[derive(Debug, Clone, FromQueryResult)]
pub struct LinkWithClicks {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub original_url: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl AppStorage {
    /// 插入新链接，slug 冲突映射为 SlugTaken
    ///
    /// 唯一索引是 slug 唯一性的最终裁决者：服务层的存在性
    /// 预检查只是为了更友好的错误信息，并发插入仍会落到这里。
    pub async fn insert_link(&self, link: NewShortLink) -> Result<short_link::Model> {
        let model = short_link::ActiveModel {
            owner_id: Set(link.owner_id),
            title: Set(link.title),
            original_url: Set(link.original_url),
            slug: Set(link.slug.clone()),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) if is_unique_violation(&e) => Err(LinkboardError::slug_taken(format!(
                "Slug '{}' is already in use",
                link.slug
            ))),
            Err(e) => Err(LinkboardError::database_operation(format!(
                "插入短链接失败: {}",
                e
            ))),
        }
    }

    /// slug 是否已被占用
    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count = short_link::Entity::find()
            .filter(short_link::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("查询 slug 失败: {}", e)))?;
        Ok(count > 0)
    }

    /// 某用户的所有链接，按创建时间倒序，附带点击计数
    pub async fn list_links_by_owner(&self, owner_id: i64) -> Result<Vec<LinkWithClicks>> {
        short_link::Entity::find()
            .left_join(click_event::Entity)
            .select_only()
            .column(short_link::Column::Id)
            .column(short_link::Column::OwnerId)
            .column(short_link::Column::Title)
            .column(short_link::Column::OriginalUrl)
            .column(short_link::Column::Slug)
            .column(short_link::Column::IsActive)
            .column(short_link::Column::CreatedAt)
            .column_as(click_event::Column::Id.count(), "click_count")
            .filter(short_link::Column::OwnerId.eq(owner_id))
            .group_by(short_link::Column::Id)
            .order_by_desc(short_link::Column::CreatedAt)
            .into_model::<LinkWithClicks>()
            .all(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("加载链接列表失败: {}", e)))
    }

    /// 按主键 + 所有者查询（detail 页的权限边界）
    pub async fn find_link_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<short_link::Model>> {
        short_link::Entity::find_by_id(id)
            .filter(short_link::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("查询短链接失败: {}", e)))
    }

    /// 重定向入口：只匹配 active 的链接
    pub async fn find_active_link_by_slug(&self, slug: &str) -> Result<Option<short_link::Model>> {
        short_link::Entity::find()
            .filter(short_link::Column::Slug.eq(slug))
            .filter(short_link::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("查询短链接失败: {}", e)))
    }
}
