//! Review service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use condo_shared::types::ReportId;
use serde::Serialize;
use tracing::info;

use super::error::ReviewError;
use super::transition::{ReviewDecision, Transition, evaluate};
use crate::payment::ReportStatus;
use crate::store::StoreError;

/// Repository trait for review persistence.
pub trait ReviewRepository: Send + Sync {
    /// Current state of a report.
    fn report_status(
        &self,
        report_id: ReportId,
    ) -> impl std::future::Future<Output = Result<Option<ReportStatus>, StoreError>> + Send;

    /// Apply a decision only if the report is still `EN_PROCESO`.
    ///
    /// Must be a single conditional update. Returns the number of rows changed.
    fn apply_decision(
        &self,
        report_id: ReportId,
        decision: &ReviewDecision,
        decided_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}

/// Result of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// Report ID.
    pub id: ReportId,
    /// State after the review.
    pub estado: ReportStatus,
    /// True when the report already held this decision.
    pub sin_cambios: bool,
}

/// Transitions reports out of `EN_PROCESO`.
pub struct ReportReviewer<R: ReviewRepository> {
    repo: Arc<R>,
}

impl<R: ReviewRepository> ReportReviewer<R> {
    /// Create a new reviewer.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Apply a decision to a report.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown reports, `MissingReason` for blank
    /// rejections and `AlreadyDecided` when the report holds the opposite
    /// decision.
    pub async fn review(
        &self,
        report_id: ReportId,
        decision: ReviewDecision,
    ) -> Result<ReviewOutcome, ReviewError> {
        if matches!(&decision, ReviewDecision::Reject { reason } if reason.trim().is_empty()) {
            return Err(ReviewError::MissingReason);
        }

        let target = decision.target_status();
        let changed = self
            .repo
            .apply_decision(report_id, &decision, Utc::now())
            .await?;

        if changed > 0 {
            info!(report_id = %report_id, estado = %target, "Payment report reviewed");
            return Ok(ReviewOutcome {
                id: report_id,
                estado: target,
                sin_cambios: false,
            });
        }

        let current = self
            .repo
            .report_status(report_id)
            .await?
            .ok_or(ReviewError::NotFound(report_id))?;

        match evaluate(current, &decision)? {
            Transition::AlreadyApplied => {
                info!(report_id = %report_id, estado = %current, "Review repeated, no change");
                Ok(ReviewOutcome {
                    id: report_id,
                    estado: current,
                    sin_cambios: true,
                })
            }
            // The conditional update matched nothing yet the report is still
            // pending; only a store that ignores the state filter gets here.
            Transition::Apply => Err(StoreError::backend(format!(
                "conditional review update skipped pending report {report_id}"
            ))
            .into()),
        }
    }
}
