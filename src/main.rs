use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::info;

use linkboard::api::middleware::RequireAuth;
use linkboard::api::services::{
    configure_auth_routes, configure_link_routes, health_check, redirect_slug,
};
use linkboard::config::{CorsConfig, init_config};
use linkboard::services::{AccountService, ClickService, LinkService};
use linkboard::storage::StorageFactory;
use linkboard::system::logging::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = init_config();

    // 日志 guard 需要活到进程结束，否则文件日志会被截断
    let _log_guard = init_logging(&config.logging);

    let storage = StorageFactory::create().await.unwrap_or_else(|err| {
        eprintln!("Failed to initialize storage: {err}");
        std::process::exit(1);
    });
    info!("Using storage backend: {}", storage.backend_name());

    let accounts = web::Data::new(AccountService::new(storage.clone()));
    let links = web::Data::new(LinkService::new(storage.clone()));
    let clicks = web::Data::new(ClickService::new(storage.clone()));
    let storage_data = web::Data::new(storage);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(storage_data.clone())
            .app_data(accounts.clone())
            .app_data(links.clone())
            .app_data(clicks.clone())
            .wrap(build_cors(&cors_config))
            .configure(configure_auth_routes)
            .service(
                web::scope("/api")
                    .wrap(RequireAuth)
                    .configure(configure_link_routes),
            )
            .route("/health", web::get().to(health_check))
            .route("/r/{slug}", web::get().to(redirect_slug))
            .route("/r/{slug}", web::head().to(redirect_slug))
    })
    .bind(&bind_address)?
    .run()
    .await
}

/// 按配置构建 CORS 规则；未配置来源时仅放行同源请求
fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
