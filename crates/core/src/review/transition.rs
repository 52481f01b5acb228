//! Pure review transition rules.

use super::error::ReviewError;
use crate::payment::ReportStatus;

/// Staff decision on a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the report.
    Approve,
    /// Reject the report with a reason.
    Reject {
        /// Trimmed, non-empty reason.
        reason: String,
    },
}

impl ReviewDecision {
    /// Build a rejection, trimming the reason.
    ///
    /// # Errors
    ///
    /// Returns `MissingReason` if the reason is blank.
    pub fn reject(reason: &str) -> Result<Self, ReviewError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ReviewError::MissingReason);
        }
        Ok(Self::Reject {
            reason: reason.to_string(),
        })
    }

    /// State the report ends in.
    #[must_use]
    pub const fn target_status(&self) -> ReportStatus {
        match self {
            Self::Approve => ReportStatus::Aprobado,
            Self::Reject { .. } => ReportStatus::Rechazado,
        }
    }

    /// Rejection reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Reject { reason } => Some(reason),
        }
    }
}

/// What a decision does to a report in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The report moves to the decision's target state.
    Apply,
    /// The report already holds this decision; nothing changes.
    AlreadyApplied,
}

/// Decide how `decision` applies to a report currently in `current`.
///
/// # Errors
///
/// Returns `AlreadyDecided` when the report holds the opposite decision.
pub fn evaluate(
    current: ReportStatus,
    decision: &ReviewDecision,
) -> Result<Transition, ReviewError> {
    let target = decision.target_status();
    match current {
        ReportStatus::EnProceso => Ok(Transition::Apply),
        status if status == target => Ok(Transition::AlreadyApplied),
        status => Err(ReviewError::AlreadyDecided(status)),
    }
}
