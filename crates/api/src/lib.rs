//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token middleware
//! - Request extractors
//! - The `{success: true, ...}` / `{error}` response envelope

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use condo_core::payment::{EvidencePolicy, PaymentSubmissionEngine};
use condo_core::storage::StorageService;
use condo_db::PostgresLedger;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Object storage for payment evidence.
    pub storage: Arc<StorageService>,
    /// Evidence upload limits.
    pub evidence: EvidencePolicy,
    /// Request body limit in bytes.
    pub body_limit: usize,
}

impl AppState {
    /// Store-backed ledger over the shared pool.
    #[must_use]
    pub fn ledger(&self) -> Arc<PostgresLedger> {
        Arc::new(PostgresLedger::new((*self.db).clone()))
    }

    /// Submission engine wired to the database and evidence storage.
    #[must_use]
    pub fn payments(&self) -> PaymentSubmissionEngine<PostgresLedger, StorageService> {
        PaymentSubmissionEngine::new(self.ledger(), Arc::clone(&self.storage), self.evidence)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(DefaultBodyLimit::max(state.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
