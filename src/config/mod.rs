mod structs;

pub use structs::*;

use std::sync::OnceLock;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// 初始化全局配置（幂等，重复调用返回已有配置）
pub fn init_config() -> &'static StaticConfig {
    CONFIG.get_or_init(StaticConfig::load)
}

/// 获取全局配置
///
/// # Panics
/// 在 `init_config` 之前调用会 panic
pub fn get_config() -> &'static StaticConfig {
    CONFIG.get().expect("Config not initialized, call init_config() first")
}
