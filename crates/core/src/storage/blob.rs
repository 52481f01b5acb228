//! Blob store abstraction for uploaded evidence.

use super::error::StorageError;

/// Write-only object store with public URLs.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous object, and return
    /// the stored path.
    fn store(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<String, StorageError>> + Send;

    /// Public URL of a stored path.
    fn public_url(&self, path: &str) -> String;
}

/// Join a stored path onto a public base URL.
///
/// Paths that already are absolute `http(s)` URLs are returned unchanged.
/// Backslashes are normalized and duplicate slashes at the seam removed.
#[must_use]
pub fn public_url_for(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let clean = path.replace('\\', "/");
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        clean.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://cdn.example.com/", "pagos/a.pdf", "https://cdn.example.com/pagos/a.pdf")]
    #[case("https://cdn.example.com", "/pagos/a.pdf", "https://cdn.example.com/pagos/a.pdf")]
    #[case("https://cdn.example.com", "pagos\\a.png", "https://cdn.example.com/pagos/a.png")]
    #[case("https://cdn.example.com", "https://other.example.com/x.jpg", "https://other.example.com/x.jpg")]
    #[case("https://cdn.example.com", "http://legacy.example.com/x.jpg", "http://legacy.example.com/x.jpg")]
    fn test_public_url_for(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(public_url_for(base, path), expected);
    }
}
