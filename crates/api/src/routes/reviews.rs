//! Payment report review routes.

use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    routing::post,
};
use condo_core::review::{ReportReviewer, ReviewDecision, ReviewError, ReviewOutcome};
use condo_shared::types::ReportId;
use serde::Deserialize;
use tracing::info;

use crate::extractors::ApiJson;
use crate::middleware::AuthUser;
use crate::response::Success;
use crate::{ApiError, AppState};

/// Creates the review routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pagos/{id}/revision", post(review_report))
}

/// Body of `POST /pagos/{id}/revision`.
#[derive(Debug, Deserialize)]
#[serde(tag = "estado")]
pub enum ReviewRequest {
    /// Approve the report.
    #[serde(rename = "APROBADO")]
    Aprobado,
    /// Reject the report with a reason.
    #[serde(rename = "RECHAZADO")]
    Rechazado {
        /// Rejection reason.
        #[serde(default)]
        motivo: Option<String>,
    },
}

impl TryFrom<ReviewRequest> for ReviewDecision {
    type Error = ReviewError;

    fn try_from(request: ReviewRequest) -> Result<Self, Self::Error> {
        match request {
            ReviewRequest::Aprobado => Ok(Self::Approve),
            ReviewRequest::Rechazado { motivo } => {
                Self::reject(motivo.as_deref().unwrap_or_default())
            }
        }
    }
}

/// POST `/pagos/{id}/revision`
///
/// Open to any authenticated caller; reviewer roles are not checked here.
async fn review_report(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<i64>, PathRejection>,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<Success<ReviewOutcome>, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::validation(e.body_text()))?;
    if id <= 0 {
        return Err(ApiError::validation("ID requerido"));
    }

    let decision = ReviewDecision::try_from(body)?;
    let outcome = ReportReviewer::new(state.ledger())
        .review(ReportId::new(id), decision)
        .await?;

    info!(
        report_id = id,
        reviewer = %auth.user_id(),
        estado = %outcome.estado,
        sin_cambios = outcome.sin_cambios,
        "Payment report reviewed"
    );

    Ok(Success::new(outcome))
}
