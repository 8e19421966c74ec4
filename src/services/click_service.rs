//! Click recording service
//!
//! One ClickEvent per visit to a short link, written synchronously in the
//! redirect path. A failed insert must never break the redirect itself.

use std::sync::Arc;

use chrono::Utc;
use tracing::error;

use crate::storage::{AppStorage, NewClickEvent};

/// 重定向请求中采集到的访问信息
#[derive(Debug, Clone, Default)]
pub struct ClickRecord {
    pub visitor_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: String,
    pub accept_language: String,
}

pub struct ClickService {
    storage: Arc<AppStorage>,
}

impl ClickService {
    pub fn new(storage: Arc<AppStorage>) -> Self {
        Self { storage }
    }

    /// 记录一次点击；失败只打日志，调用方照常完成重定向
    pub async fn record_click(&self, link_id: i64, record: ClickRecord) {
        let event = NewClickEvent {
            link_id,
            clicked_at: Utc::now(),
            visitor_id: record.visitor_id,
            ip_address: record.ip_address,
            user_agent: record.user_agent,
            referrer: record.referrer,
            accept_language: record.accept_language,
        };

        if let Err(e) = self.storage.insert_click(event).await {
            error!("Failed to record click for link {}: {}", link_id, e);
        }
    }
}
