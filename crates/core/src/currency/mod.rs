//! Multi-currency handling and conversion rates.

pub mod conversion;
pub mod resolver;

pub use conversion::{RATE_SCALE, convert_amount, round_money};
pub use resolver::{RateRepository, RateResolver};
