//! IP 地址处理工具
//!
//! 提取客户端真实 IP。应用通常部署在反向代理之后，
//! 因此优先读取 X-Forwarded-For / X-Real-IP，退回连接 IP。

use actix_web::HttpRequest;

/// 从 HttpRequest 提取客户端 IP
///
/// 顺序：X-Forwarded-For 第一跳 > X-Real-IP > peer_addr。
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 或 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            // 其次 X-Real-IP
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}
