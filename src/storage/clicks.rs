//! Click event storage and aggregate queries
//!
//! Click events are append-only; nothing here ever updates a row.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::AppStorage;
use crate::errors::{LinkboardError, Result};

use migration::entities::click_event;

/// 待记录的点击事件
#[derive(Debug, Clone)]
pub struct NewClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub visitor_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: String,
    pub accept_language: String,
}

/// referrer 排行条目
#[derive(Debug, Clone, FromQueryResult, serde::Serialize, serde::Deserialize)]
pub struct ReferrerCount {
    pub referrer: String,
    pub clicks: i64,
}

impl AppStorage {
    /// 追加一条点击记录
    pub async fn insert_click(&self, event: NewClickEvent) -> Result<()> {
        let model = click_event::ActiveModel {
            link_id: Set(event.link_id),
            clicked_at: Set(event.clicked_at),
            visitor_id: Set(event.visitor_id),
            ip_address: Set(event.ip_address),
            user_agent: Set(event.user_agent),
            referrer: Set(event.referrer),
            accept_language: Set(event.accept_language),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("记录点击失败: {}", e)))?;
        Ok(())
    }

    /// 总点击数
    pub async fn count_clicks(&self, link_id: i64) -> Result<u64> {
        click_event::Entity::find()
            .filter(click_event::Column::LinkId.eq(link_id))
            .count(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("统计点击失败: {}", e)))
    }

    /// 唯一访客数（distinct 非空 visitor_id）
    pub async fn count_unique_visitors(&self, link_id: i64) -> Result<u64> {
        click_event::Entity::find()
            .select_only()
            .column(click_event::Column::VisitorId)
            .filter(click_event::Column::LinkId.eq(link_id))
            .filter(click_event::Column::VisitorId.ne(""))
            .distinct()
            .count(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("统计唯一访客失败: {}", e)))
    }

    /// Top referrers（按出现次数倒序，排除空值）
    pub async fn top_referrers(&self, link_id: i64, limit: u64) -> Result<Vec<ReferrerCount>> {
        click_event::Entity::find()
            .select_only()
            .column(click_event::Column::Referrer)
            .column_as(click_event::Column::Id.count(), "clicks")
            .filter(click_event::Column::LinkId.eq(link_id))
            .filter(click_event::Column::Referrer.ne(""))
            .group_by(click_event::Column::Referrer)
            .order_by_desc(click_event::Column::Id.count())
            .limit(limit)
            .into_model::<ReferrerCount>()
            .all(&self.db)
            .await
            .map_err(|e| LinkboardError::database_operation(format!("统计 referrer 失败: {}", e)))
    }
}
