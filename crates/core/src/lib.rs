//! Core business logic for the condominium payment backend.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the repository traits declared here and
//! implemented by the db crate.
//!
//! # Modules
//!
//! - `currency` - Conversion rates between currencies
//! - `property` - Property records and the ownership check
//! - `charge` - Charges (notificaciones) and the pending charge ledger
//! - `payment` - Payment report preparation, submission and listing
//! - `review` - Approve/reject state machine for reported payments
//! - `debt` - Per-property debt summary and payment history
//! - `storage` - Evidence storage on top of OpenDAL

pub mod charge;
pub mod currency;
pub mod debt;
pub mod payment;
pub mod property;
pub mod review;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use store::{PropertyLedger, StoreError};
