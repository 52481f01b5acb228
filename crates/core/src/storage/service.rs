//! Storage service implementation using Apache OpenDAL.

use opendal::{Operator, services};
use tracing::debug;

use super::blob::{BlobStore, public_url_for};
use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// OpenDAL-backed evidence storage.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

impl BlobStore for StorageService {
    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let size = bytes.len();
        self.operator
            .write(key, bytes)
            .await
            .map_err(StorageError::from)?;

        debug!(key, size, provider = self.provider_name(), "Stored evidence");
        Ok(key.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        public_url_for(&self.config.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("condo-storage-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_store_writes_under_root() {
        let root = temp_root();
        let config = StorageConfig::new(
            StorageProvider::local_fs(&root),
            "https://files.example.com/",
        );
        let service = StorageService::from_config(config).expect("should create service");

        let path = service
            .store("pagos/abc.pdf", b"%PDF-1.4".to_vec())
            .await
            .expect("should store");

        assert_eq!(path, "pagos/abc.pdf");
        let written = std::fs::read(root.join("pagos/abc.pdf")).expect("file should exist");
        assert_eq!(written, b"%PDF-1.4");
        assert_eq!(
            service.public_url(&path),
            "https://files.example.com/pagos/abc.pdf"
        );

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_store_overwrites_same_key() {
        let root = temp_root();
        let config = StorageConfig::new(StorageProvider::local_fs(&root), "http://localhost");
        let service = StorageService::from_config(config).expect("should create service");

        service.store("pagos/k.png", vec![1, 2, 3]).await.expect("first write");
        service.store("pagos/k.png", vec![4]).await.expect("second write");

        let written = std::fs::read(root.join("pagos/k.png")).expect("file should exist");
        assert_eq!(written, vec![4]);

        let _ = std::fs::remove_dir_all(root);
    }
}
