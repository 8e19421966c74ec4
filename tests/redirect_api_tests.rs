//! Redirect endpoint tests
//!
//! Exercises GET /r/{slug} end to end over a temporary SQLite database:
//! the 302 response, click recording, and visitor cookie handling.

use std::sync::{Arc, Once};

use actix_web::{App, test, web};
use sea_orm::{ActiveModelTrait, ActiveValue};
use tempfile::TempDir;

use migration::entities::short_link;

use linkboard::api::services::redirect_slug;
use linkboard::config::init_config;
use linkboard::services::{AccountService, ClickService, CreateLinkRequest, LinkService};
use linkboard::storage::{AppStorage, connect_sqlite, run_migrations};

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

struct TestBackend {
    storage: Arc<AppStorage>,
    links: web::Data<LinkService>,
    clicks: web::Data<ClickService>,
    owner_id: i64,
    _temp: TempDir,
}

async fn create_test_backend() -> TestBackend {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test_redirect.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url).await.expect("Failed to connect");
    run_migrations(&db).await.expect("Failed to run migrations");

    let storage = Arc::new(AppStorage::from_connection(db, "sqlite"));
    let owner = AccountService::new(storage.clone())
        .register("owner", "password123")
        .await
        .expect("owner registration should succeed");

    TestBackend {
        links: web::Data::new(LinkService::new(storage.clone())),
        clicks: web::Data::new(ClickService::new(storage.clone())),
        storage,
        owner_id: owner.id,
        _temp: temp_dir,
    }
}

async fn create_link(backend: &TestBackend, slug: &str, target: &str) -> short_link::Model {
    backend
        .links
        .create_link(
            backend.owner_id,
            CreateLinkRequest {
                title: String::new(),
                original_url: target.to_string(),
                slug: Some(slug.to_string()),
            },
        )
        .await
        .expect("link creation should succeed")
}

macro_rules! test_app {
    ($backend:expr) => {
        test::init_service(
            App::new()
                .app_data($backend.links.clone())
                .app_data($backend.clicks.clone())
                .route("/r/{slug}", web::get().to(redirect_slug))
                .route("/r/{slug}", web::head().to(redirect_slug)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_redirect_found() {
    let backend = create_test_backend().await;
    create_link(&backend, "hello", "https://example.com/page").await;
    let app = test_app!(backend);

    let req = test::TestRequest::get().uri("/r/hello").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 302);
    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(location, "https://example.com/page");
}

#[actix_web::test]
async fn test_redirect_sets_visitor_cookie() {
    let backend = create_test_backend().await;
    create_link(&backend, "cookie", "https://example.com").await;
    let app = test_app!(backend);

    let req = test::TestRequest::get().uri("/r/cookie").to_request();
    let resp = test::call_service(&app, req).await;

    let visitor_cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "visitor_id")
        .expect("visitor cookie should be set");
    // uuid4 的 simple 十六进制表示
    assert_eq!(visitor_cookie.value().len(), 32);
}

#[actix_web::test]
async fn test_redirect_reuses_visitor_cookie() {
    let backend = create_test_backend().await;
    create_link(&backend, "repeat", "https://example.com").await;
    let app = test_app!(backend);

    let req = test::TestRequest::get()
        .uri("/r/repeat")
        .cookie(actix_web::cookie::Cookie::new("visitor_id", "abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 302);
    // 重发的 cookie 必须保留原有标识，只滚动有效期
    let visitor_cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "visitor_id")
        .expect("visitor cookie should be re-issued");
    assert_eq!(visitor_cookie.value(), "abc123");
}

#[actix_web::test]
async fn test_redirect_records_clicks() {
    let backend = create_test_backend().await;
    let link = create_link(&backend, "tracked", "https://example.com").await;
    let app = test_app!(backend);

    // 同一访客两次、新访客一次
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/r/tracked")
            .cookie(actix_web::cookie::Cookie::new("visitor_id", "visitor-a"))
            .insert_header(("Referer", "https://news.example"))
            .insert_header(("User-Agent", "integration-test"))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::get().uri("/r/tracked").to_request();
    test::call_service(&app, req).await;

    let total = backend
        .storage
        .count_clicks(link.id)
        .await
        .expect("count should run");
    assert_eq!(total, 3);

    let unique = backend
        .storage
        .count_unique_visitors(link.id)
        .await
        .expect("count should run");
    assert_eq!(unique, 2);

    let referrers = backend
        .storage
        .top_referrers(link.id, 5)
        .await
        .expect("query should run");
    assert_eq!(referrers[0].referrer, "https://news.example");
    assert_eq!(referrers[0].clicks, 2);
}

#[actix_web::test]
async fn test_redirect_unknown_slug() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);

    let req = test::TestRequest::get().uri("/r/missing").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_redirect_inactive_link() {
    let backend = create_test_backend().await;
    let link = create_link(&backend, "paused", "https://example.com").await;

    // 停用链接
    let mut active: short_link::ActiveModel = link.into();
    active.is_active = ActiveValue::Set(false);
    active
        .update(backend.storage.get_db())
        .await
        .expect("update should succeed");

    let app = test_app!(backend);
    let req = test::TestRequest::get().uri("/r/paused").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_redirect_head_request() {
    let backend = create_test_backend().await;
    create_link(&backend, "headreq", "https://example.com").await;
    let app = test_app!(backend);

    let req = test::TestRequest::with_uri("/r/headreq")
        .method(actix_web::http::Method::HEAD)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 302);
}
