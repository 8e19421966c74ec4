pub mod ip;
pub mod password;
pub mod url_validator;

/// 生成随机 slug（字母 + 数字）
///
/// 用户未提供自定义 slug 时使用，碰撞由调用方重试处理。
pub fn generate_random_slug(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// 校验用户自定义 slug 的格式
///
/// 允许字母、数字、下划线、连字符，长度 1-32。
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 32
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// 生成加密安全的随机 token（用于 JWT secret 兜底）
pub fn generate_secure_token(length: usize) -> String {
    use rand::RngExt;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())] as char)
        .collect()
}
