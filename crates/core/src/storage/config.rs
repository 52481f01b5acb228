//! Storage configuration types.

use std::path::PathBuf;

use condo_shared::config::StorageSettings;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (Cloudflare R2, Supabase, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL under which stored objects are served.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Create a new storage config.
    #[must_use]
    pub fn new(provider: StorageProvider, public_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.into(),
        }
    }

    /// Build from the application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown or S3 settings are incomplete.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.provider.trim().to_ascii_lowercase().as_str() {
            "local" | "fs" => StorageProvider::local_fs(&settings.root),
            "s3" => {
                let required = |value: &Option<String>, name: &str| {
                    value.clone().filter(|v| !v.is_empty()).ok_or_else(|| {
                        StorageError::configuration(format!("storage.{name} is required for s3"))
                    })
                };
                StorageProvider::s3(
                    required(&settings.endpoint, "endpoint")?,
                    required(&settings.bucket, "bucket")?,
                    required(&settings.access_key_id, "access_key_id")?,
                    required(&settings.secret_access_key, "secret_access_key")?,
                    settings.region.clone().unwrap_or_else(|| "auto".to_string()),
                )
            }
            other => {
                return Err(StorageError::configuration(format!(
                    "unknown storage provider '{other}'"
                )));
            }
        };

        Ok(Self::new(provider, settings.public_base_url.clone()))
    }
}
