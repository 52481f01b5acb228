//! Evidence storage using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, MinIO
//! - Local filesystem (development only)
//!
//! Domain services depend on the `BlobStore` trait only, so tests can swap
//! the OpenDAL-backed `StorageService` for an in-memory store.

mod blob;
mod config;
mod error;
mod service;

pub use blob::{BlobStore, public_url_for};
pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
