//! Link API tests
//!
//! End-to-end flow over HTTP: sign up, create links, list the dashboard,
//! and read per-link detail.

use std::sync::{Arc, Once};

use actix_web::cookie::Cookie;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use linkboard::api::middleware::RequireAuth;
use linkboard::api::services::{configure_auth_routes, configure_link_routes};
use linkboard::config::init_config;
use linkboard::services::{AccountService, LinkService};
use linkboard::storage::{AppStorage, connect_sqlite, run_migrations};

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

struct TestBackend {
    accounts: web::Data<AccountService>,
    links: web::Data<LinkService>,
    _temp: TempDir,
}

async fn create_test_backend() -> TestBackend {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test_links_api.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url).await.expect("Failed to connect");
    run_migrations(&db).await.expect("Failed to run migrations");

    let storage = Arc::new(AppStorage::from_connection(db, "sqlite"));
    TestBackend {
        accounts: web::Data::new(AccountService::new(storage.clone())),
        links: web::Data::new(LinkService::new(storage)),
        _temp: temp_dir,
    }
}

macro_rules! test_app {
    ($backend:expr) => {
        test::init_service(
            App::new()
                .app_data($backend.accounts.clone())
                .app_data($backend.links.clone())
                .configure(configure_auth_routes)
                .service(
                    web::scope("/api")
                        .wrap(RequireAuth)
                        .configure(configure_link_routes),
                ),
        )
        .await
    };
}

macro_rules! signup {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({"username": $username, "password": "password123"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status().as_u16(), 201);

        let cookie: Cookie<'static> = resp
            .response()
            .cookies()
            .find(|c| c.name() == "lb_access_token")
            .expect("access cookie should be set")
            .into_owned();
        cookie
    }};
}

#[actix_web::test]
async fn test_create_and_list_links() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);
    let session = signup!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/links")
        .cookie(session.clone())
        .set_json(json!({
            "title": "My blog",
            "original_url": "https://blog.example.com/post",
            "slug": "blog"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["slug"], "blog");
    assert_eq!(body["data"]["click_count"], 0);
    assert!(
        body["data"]["short_url"]
            .as_str()
            .unwrap_or("")
            .ends_with("/r/blog")
    );

    let req = test::TestRequest::get()
        .uri("/api/links")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let rows = body["data"].as_array().expect("data should be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["slug"], "blog");
}

#[actix_web::test]
async fn test_create_link_generated_slug_over_http() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);
    let session = signup!(app, "bob");

    let req = test::TestRequest::post()
        .uri("/api/links")
        .cookie(session)
        .set_json(json!({"original_url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    let slug = body["data"]["slug"].as_str().expect("slug should be set");
    assert_eq!(slug.len(), 6);
}

#[actix_web::test]
async fn test_create_link_duplicate_slug_conflict() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);
    let session = signup!(app, "carol");

    for expected_status in [201, 409] {
        let req = test::TestRequest::post()
            .uri("/api/links")
            .cookie(session.clone())
            .set_json(json!({"original_url": "https://example.com", "slug": "dup"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), expected_status);
    }
}

#[actix_web::test]
async fn test_create_link_invalid_url_over_http() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);
    let session = signup!(app, "dave");

    let req = test::TestRequest::post()
        .uri("/api/links")
        .cookie(session)
        .set_json(json!({"original_url": "javascript:alert(1)"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_link_detail_over_http() {
    let backend = create_test_backend().await;
    let app = test_app!(backend);
    let session = signup!(app, "erin");

    let req = test::TestRequest::post()
        .uri("/api/links")
        .cookie(session.clone())
        .set_json(json!({"original_url": "https://example.com", "slug": "mine"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let link_id = body["data"]["id"].as_i64().expect("id should be set");

    let req = test::TestRequest::get()
        .uri(&format!("/api/links/{}", link_id))
        .cookie(session.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_clicks"], 0);
    assert_eq!(body["data"]["unique_clicks"], 0);
    assert_eq!(
        body["data"]["top_referrers"].as_array().map(|a| a.len()),
        Some(0)
    );

    // 其他用户看不到这条链接
    let other_session = signup!(app, "frank");
    let req = test::TestRequest::get()
        .uri(&format!("/api/links/{}", link_id))
        .cookie(other_session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}
