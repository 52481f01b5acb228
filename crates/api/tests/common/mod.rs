//! Shared helpers for HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use condo_api::{AppState, create_router};
use condo_core::payment::EvidencePolicy;
use condo_core::storage::{StorageConfig, StorageProvider, StorageService};
use http_body_util::BodyExt;
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

use condo_db::migration::{Migrator, MigratorTrait};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub fn storage() -> Arc<StorageService> {
    let root = std::env::temp_dir().join(format!("condo-api-{}", Uuid::new_v4()));
    let config = StorageConfig::new(
        StorageProvider::local_fs(root),
        "http://localhost:8080/uploads",
    );
    Arc::new(StorageService::from_config(config).expect("Failed to build storage"))
}

pub fn app_with(db: DatabaseConnection) -> Router {
    create_router(AppState {
        db: Arc::new(db),
        storage: storage(),
        evidence: EvidencePolicy::default(),
        body_limit: 16 * 1024 * 1024,
    })
}

/// Router whose database is never reachable.
pub fn offline_app() -> Router {
    app_with(DatabaseConnection::default())
}

/// Connect and migrate, or `None` when `DATABASE_URL` is unset.
pub async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("CONDO__DATABASE__URL"))
        .ok()?;
    MIGRATED
        .get_or_init(|| async {
            let db = Database::connect(&url)
                .await
                .expect("Failed to connect to database");
            Migrator::up(&db, None).await.expect("Failed to run migrations");
        })
        .await;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "condo-tests/1.0");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
