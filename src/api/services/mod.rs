//! HTTP 处理层
//!
//! 按资源拆分的 handler 模块，共用 `types` 里的响应信封和
//! `helpers` 里的响应/cookie 构建函数。

pub mod accounts;
pub mod health;
pub mod helpers;
pub mod links;
pub mod redirect;
pub mod types;

pub use accounts::configure_auth_routes;
pub use health::health_check;
pub use links::configure_link_routes;
pub use redirect::redirect_slug;
