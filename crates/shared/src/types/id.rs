//! Typed IDs for type-safe entity references.
//!
//! The condominium schema keys every table by a serial integer, so the
//! wrappers hold an `i64`. Using typed IDs prevents accidentally passing a
//! `ChargeId` where a `PropertyId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw database key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Returns true if the key can reference a stored row.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for an application user.");
typed_id!(CondominiumId, "Unique identifier for a condominium.");
typed_id!(PropertyId, "Unique identifier for a property (inmueble).");
typed_id!(ChargeId, "Unique identifier for a charge notice (notificacion de cobro).");
typed_id!(CurrencyId, "Unique identifier for a currency (moneda).");
typed_id!(AccountId, "Unique identifier for a condominium payment account.");
typed_id!(ReportId, "Unique identifier for a reported payment.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
