use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkboardError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    UsernameTaken(String),
    SlugTaken(String),
    PasswordHash(String),
    Serialization(String),
}

impl LinkboardError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkboardError::DatabaseConfig(_) => "E001",
            LinkboardError::DatabaseConnection(_) => "E002",
            LinkboardError::DatabaseOperation(_) => "E003",
            LinkboardError::Validation(_) => "E004",
            LinkboardError::NotFound(_) => "E005",
            LinkboardError::Unauthorized(_) => "E006",
            LinkboardError::UsernameTaken(_) => "E007",
            LinkboardError::SlugTaken(_) => "E008",
            LinkboardError::PasswordHash(_) => "E009",
            LinkboardError::Serialization(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkboardError::DatabaseConfig(_) => "Database Configuration Error",
            LinkboardError::DatabaseConnection(_) => "Database Connection Error",
            LinkboardError::DatabaseOperation(_) => "Database Operation Error",
            LinkboardError::Validation(_) => "Validation Error",
            LinkboardError::NotFound(_) => "Resource Not Found",
            LinkboardError::Unauthorized(_) => "Unauthorized",
            LinkboardError::UsernameTaken(_) => "Username Already Taken",
            LinkboardError::SlugTaken(_) => "Slug Already Taken",
            LinkboardError::PasswordHash(_) => "Password Hash Error",
            LinkboardError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkboardError::DatabaseConfig(msg)
            | LinkboardError::DatabaseConnection(msg)
            | LinkboardError::DatabaseOperation(msg)
            | LinkboardError::Validation(msg)
            | LinkboardError::NotFound(msg)
            | LinkboardError::Unauthorized(msg)
            | LinkboardError::UsernameTaken(msg)
            | LinkboardError::SlugTaken(msg)
            | LinkboardError::PasswordHash(msg)
            | LinkboardError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码（API 层统一使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkboardError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkboardError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkboardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkboardError::UsernameTaken(_) | LinkboardError::SlugTaken(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for LinkboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LinkboardError {}

// 便捷的构造函数
impl LinkboardError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkboardError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkboardError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkboardError::Unauthorized(msg.into())
    }

    pub fn username_taken<T: Into<String>>(msg: T) -> Self {
        LinkboardError::UsernameTaken(msg.into())
    }

    pub fn slug_taken<T: Into<String>>(msg: T) -> Self {
        LinkboardError::SlugTaken(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        LinkboardError::PasswordHash(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkboardError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkboardError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkboardError {
    fn from(err: serde_json::Error) -> Self {
        LinkboardError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(LinkboardError::validation("x").code(), "E004");
        assert_eq!(LinkboardError::not_found("x").code(), "E005");
        assert_eq!(LinkboardError::slug_taken("x").code(), "E008");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            LinkboardError::validation("bad url").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LinkboardError::not_found("missing").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LinkboardError::slug_taken("dup").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LinkboardError::username_taken("dup").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LinkboardError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_format() {
        let err = LinkboardError::slug_taken("slug 'abc' is already in use");
        assert_eq!(
            err.to_string(),
            "Slug Already Taken: slug 'abc' is already in use"
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: LinkboardError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, LinkboardError::DatabaseOperation(_)));
    }
}
