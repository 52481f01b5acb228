//! Charges (notificaciones de cobro) and the pending charge ledger.

mod ledger;
mod types;

pub use ledger::{ChargeRepository, PendingChargeLedger};
pub use types::{Charge, PAID_STATE, PendingCharge};
