//! 健康检查端点

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::storage::AppStorage;

use super::types::{HealthResponse, HealthStorageCheck};

/// GET /health
///
/// 探测数据库连接是否可用；失败时整体状态为 degraded 并返回 503
pub async fn health_check(storage: web::Data<Arc<AppStorage>>) -> HttpResponse {
    let storage_check = match storage.ping().await {
        Ok(()) => HealthStorageCheck {
            status: "ok".to_string(),
            backend: storage.backend_name().to_string(),
            error: None,
        },
        Err(err) => HealthStorageCheck {
            status: "error".to_string(),
            backend: storage.backend_name().to_string(),
            error: Some(err.to_string()),
        },
    };

    let healthy = storage_check.status == "ok";
    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        storage: storage_check,
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
