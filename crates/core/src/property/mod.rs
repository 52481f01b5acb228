//! Property (inmueble) records and the ownership check.

mod guard;
mod types;

pub use guard::{AccessError, PropertyAccessGuard, PropertyRepository};
pub use types::Property;
