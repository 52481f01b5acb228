//! Review error types.

use condo_shared::AppError;
use condo_shared::types::ReportId;
use thiserror::Error;

use crate::payment::ReportStatus;
use crate::store::StoreError;

/// Review errors.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Report does not exist.
    #[error("report {0} not found")]
    NotFound(ReportId),

    /// Rejection without a reason.
    #[error("a rejection reason is required")]
    MissingReason,

    /// The report already holds the opposite decision.
    #[error("report already {}", decided_word(.0))]
    AlreadyDecided(ReportStatus),

    /// Repository failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

const fn decided_word(status: &ReportStatus) -> &'static str {
    match status {
        ReportStatus::Aprobado => "approved",
        ReportStatus::Rechazado => "rejected",
        ReportStatus::EnProceso => "pending",
    }
}

impl ReviewError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MissingReason | Self::AlreadyDecided(_) => 400,
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for logs and API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "REPORT_NOT_FOUND",
            Self::MissingReason => "MISSING_REASON",
            Self::AlreadyDecided(_) => "ALREADY_DECIDED",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(id) => Self::NotFound(format!("report {id} not found")),
            ReviewError::Store(e) => e.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}
