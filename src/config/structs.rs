use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 服务器地址、端口、对外 URL
/// - database: 数据库连接配置
/// - auth: JWT / Cookie 配置
/// - shortener: 短链接行为配置
/// - cors: 跨域配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：LB，分隔符：__
    /// 示例：LB__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 LB，分隔符 __
            .add_source(
                Environment::with_prefix("LB")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// 对外访问的基础 URL，用于拼接短链接（如 https://lb.example.com）
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// JWT / Cookie 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT 签名密钥，为空时启动会生成随机值（重启后所有会话失效）
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: u64,
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

/// 短链接行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    /// 自动生成 slug 的长度
    #[serde(default = "default_slug_length")]
    pub slug_length: usize,
    /// visitor_id cookie 的有效期（天）
    #[serde(default = "default_visitor_cookie_days")]
    pub visitor_cookie_days: u64,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 允许的来源，空表示不启用跨域放行
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "plain" 或 "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 日志文件路径，为空则输出到控制台
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            public_url: default_public_url(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_minutes: default_access_token_minutes(),
            refresh_token_days: default_refresh_token_days(),
            cookie_secure: false,
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            slug_length: default_slug_length(),
            visitor_cookie_days: default_visitor_cookie_days(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://linkboard.db?mode=rwc".to_string()
}

fn default_access_token_minutes() -> u64 {
    15
}

fn default_refresh_token_days() -> u64 {
    7
}

fn default_slug_length() -> usize {
    6
}

fn default_visitor_cookie_days() -> u64 {
    365
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.shortener.slug_length, 6);
        assert_eq!(config.shortener.visitor_cookie_days, 365);
        assert_eq!(config.auth.access_token_minutes, 15);
        assert_eq!(config.auth.refresh_token_days, 7);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        // 缺省字段应回退到默认值
        let toml = r#"
            [server]
            port = 9000

            [shortener]
            slug_length = 8
        "#;
        let config: StaticConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.shortener.slug_length, 8);
        assert_eq!(config.shortener.visitor_cookie_days, 365);
    }
}
