//! Staff review of payment reports.
//!
//! ```text
//!                 approve
//!   EN_PROCESO ───────────▶ APROBADO
//!        │
//!        │ reject(reason)
//!        ▼
//!    RECHAZADO
//! ```
//!
//! Terminal states never change. Repeating the decision that produced the
//! current state is a no-op; the opposite decision is refused.

mod error;
mod reviewer;
mod transition;

pub use error::ReviewError;
pub use reviewer::{ReportReviewer, ReviewOutcome, ReviewRepository};
pub use transition::{ReviewDecision, Transition, evaluate};
