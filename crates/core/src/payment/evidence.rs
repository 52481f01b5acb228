//! Evidence file validation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use super::error::PaymentError;
use super::types::EvidenceUpload;

/// Accepted evidence extensions, lowercase.
pub const ALLOWED_EVIDENCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Storage key of the evidence for a report.
///
/// Keyed by the idempotency key so a replayed submission overwrites the same
/// object instead of leaving an orphan.
#[must_use]
pub fn evidence_key(client_uuid: Uuid, extension: &str) -> String {
    format!("pagos/{client_uuid}.{extension}")
}

/// Decoded evidence ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvidence {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Normalized extension (lowercase, no dot).
    pub extension: String,
}

/// Limits applied to uploaded evidence.
#[derive(Debug, Clone, Copy)]
pub struct EvidencePolicy {
    max_file_size: u64,
}

impl Default for EvidencePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FILE_SIZE)
    }
}

impl EvidencePolicy {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a policy with the given maximum decoded size.
    #[must_use]
    pub const fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Maximum decoded size in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validate the extension, decode the content and check its size.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not accepted, the content is not
    /// base64, or the decoded file is too large.
    pub fn decode(&self, upload: &EvidenceUpload) -> Result<DecodedEvidence, PaymentError> {
        let extension = normalize_extension(&upload.extension);
        if !ALLOWED_EVIDENCE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PaymentError::EvidenceExtension(extension));
        }

        let payload: String = strip_data_uri(&upload.content_base64)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if payload.is_empty() {
            return Err(PaymentError::EvidenceEncoding);
        }

        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|_| PaymentError::EvidenceEncoding)?;

        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > self.max_file_size {
            return Err(PaymentError::EvidenceTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(DecodedEvidence { bytes, extension })
    }
}

fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Drop a `data:<mime>;base64,` prefix if present.
fn strip_data_uri(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("data:") {
        trimmed
            .split_once(',')
            .map_or(trimmed, |(_, payload)| payload)
    } else {
        trimmed
    }
}
