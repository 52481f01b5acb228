//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MONEY_TOLERANCE, covers_with_tolerance, exceeds_with_tolerance, format_amount};
