//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};

use cobrafacil::api::AppState;
use cobrafacil::api::app;
use cobrafacil::core::db::initialize_db;
use cobrafacil::core::{AppConfig, NotificationDefaults};
use cobrafacil::worker::OriginPolicy;

pub const APP_ORIGIN: &str = "https://app.cobrafacil.com.br";

pub fn test_config() -> AppConfig {
    AppConfig {
        storage_path: String::from("test_storage_path"),
        db_path: String::from("test_db_path"),
        vapid_key_path: String::from("test_vapid_key_path"),
        app_origin: String::from(APP_ORIGIN),
        origin_policy: OriginPolicy::Exact,
        notification_defaults: NotificationDefaults::default(),
    }
}

/// Creates a test application router backed by an in-memory database.
pub async fn test_app() -> Router {
    let db = tokio_rusqlite::Connection::open_in_memory()
        .await
        .expect("Failed to open in-memory db");
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await
    .expect("Failed to initialize db");

    let app_state = AppState::new(db, test_config());
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}
