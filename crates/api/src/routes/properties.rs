//! Property listing routes.

use axum::{Router, extract::State, routing::get};
use condo_core::debt::{PropertyDebtService, PropertyWithDebt};
use serde::Serialize;

use crate::middleware::AuthUser;
use crate::response::Success;
use crate::{ApiError, AppState};

/// Creates the property routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/inmuebles", get(list_properties))
}

/// Response of `GET /inmuebles`.
#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    /// Properties of the caller with their debt.
    pub inmuebles: Vec<PropertyWithDebt>,
}

/// GET `/inmuebles`
async fn list_properties(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Success<PropertiesResponse>, ApiError> {
    let inmuebles = PropertyDebtService::new(state.ledger())
        .list_with_debt(auth.user_id())
        .await?;

    Ok(Success::new(PropertiesResponse { inmuebles }))
}
