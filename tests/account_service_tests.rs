//! AccountService tests
//!
//! Tests for registration and credential verification.

use std::sync::{Arc, Once};

use tempfile::TempDir;

use linkboard::config::init_config;
use linkboard::errors::LinkboardError;
use linkboard::services::AccountService;
use linkboard::storage::{AppStorage, connect_sqlite, run_migrations};

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// Create a test service backed by a temporary SQLite database
async fn create_test_service() -> (AccountService, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test_accounts.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url).await.expect("Failed to connect");
    run_migrations(&db).await.expect("Failed to run migrations");

    let storage = Arc::new(AppStorage::from_connection(db, "sqlite"));
    (AccountService::new(storage), temp_dir)
}

#[tokio::test]
async fn test_register_and_login() {
    let (service, _temp) = create_test_service().await;

    let user = service
        .register("alice", "correct horse battery")
        .await
        .expect("registration should succeed");
    assert_eq!(user.username, "alice");
    assert!(user.id > 0);

    let logged_in = service
        .verify_credentials("alice", "correct horse battery")
        .await
        .expect("login should succeed");
    assert_eq!(logged_in.id, user.id);
}

#[tokio::test]
async fn test_register_trims_username() {
    let (service, _temp) = create_test_service().await;

    let user = service
        .register("  bob  ", "password123")
        .await
        .expect("registration should succeed");
    assert_eq!(user.username, "bob");
}

#[tokio::test]
async fn test_register_rejects_empty_username() {
    let (service, _temp) = create_test_service().await;

    let result = service.register("   ", "password123").await;
    assert!(matches!(result, Err(LinkboardError::Validation(_))));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (service, _temp) = create_test_service().await;

    let result = service.register("carol", "short").await;
    assert!(matches!(result, Err(LinkboardError::Validation(_))));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (service, _temp) = create_test_service().await;

    service
        .register("dave", "password123")
        .await
        .expect("first registration should succeed");

    let result = service.register("dave", "another-password").await;
    assert!(matches!(result, Err(LinkboardError::UsernameTaken(_))));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, _temp) = create_test_service().await;

    service
        .register("erin", "password123")
        .await
        .expect("registration should succeed");

    let result = service.verify_credentials("erin", "wrong-password").await;
    assert!(matches!(result, Err(LinkboardError::Unauthorized(_))));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (service, _temp) = create_test_service().await;

    let result = service.verify_credentials("nobody", "password123").await;
    assert!(matches!(result, Err(LinkboardError::Unauthorized(_))));
}

#[tokio::test]
async fn test_find_by_id() {
    let (service, _temp) = create_test_service().await;

    let user = service
        .register("frank", "password123")
        .await
        .expect("registration should succeed");

    let found = service.find_by_id(user.id).await.expect("query should run");
    assert_eq!(found.map(|u| u.username), Some("frank".to_string()));

    let missing = service.find_by_id(9999).await.expect("query should run");
    assert!(missing.is_none());
}
