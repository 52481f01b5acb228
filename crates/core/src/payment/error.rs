//! Payment reporting error types.

use condo_shared::AppError;
use condo_shared::types::{ChargeId, PropertyId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::property::AccessError;
use crate::storage::StorageError;
use crate::store::StoreError;

/// Payment reporting errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Property missing or not owned by the caller.
    #[error("property {0} not found")]
    PropertyNotFound(PropertyId),

    /// No charge allocations in the submission.
    #[error("at least one charge allocation is required")]
    NoAllocations,

    /// No payment instruments in the submission.
    #[error("at least one payment instrument is required")]
    NoInstruments,

    /// Allocation with a non-positive charge ID or amount.
    #[error("invalid allocation for charge {0}")]
    InvalidAllocation(ChargeId),

    /// The same charge appears in more than one allocation.
    #[error("charge {0} is allocated more than once")]
    DuplicateAllocation(ChargeId),

    /// Charge is not pending on the property.
    #[error("charge {0} does not belong to the property or has no outstanding balance")]
    UnknownCharge(ChargeId),

    /// Allocation larger than the remaining balance of the charge.
    #[error("allocation exceeds the outstanding balance of charge {0}")]
    AllocationExceedsBalance(ChargeId),

    /// Instrument with a non-positive amount or currency.
    #[error("payment instruments require a positive amount and a currency")]
    InvalidInstrument,

    /// Instruments do not cover the allocations.
    #[error("payment total below allocation total")]
    Underpaid {
        /// Tendered total in base.
        tendered: Decimal,
        /// Allocated total in base.
        allocated: Decimal,
    },

    /// An amount or rate too large to be converted and totalled.
    #[error("amount or rate is out of the accepted range")]
    AmountOutOfRange,

    /// The tendered total rounds to zero or does not fit the stored precision.
    #[error("payment total {0} in base currency is out of range")]
    TotalOutOfRange(Decimal),

    /// Idempotency key already used by another user.
    #[error("client_uuid is already in use")]
    KeyConflict,

    /// Evidence extension not accepted.
    #[error("unsupported evidence file type '{0}'")]
    EvidenceExtension(String),

    /// Evidence content is not base64.
    #[error("evidence content is not valid base64")]
    EvidenceEncoding,

    /// Evidence larger than the configured maximum.
    #[error("evidence size {size} bytes exceeds maximum allowed {max} bytes")]
    EvidenceTooLarge {
        /// Decoded size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Evidence storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Repository failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AccessError> for PaymentError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(id) => Self::PropertyNotFound(id),
            AccessError::Store(e) => Self::Store(e),
        }
    }
}

impl PaymentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PropertyNotFound(_) => 404,
            Self::Storage(_) | Self::Store(_) => 500,
            _ => 400,
        }
    }

    /// Returns the error code for logs and API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PropertyNotFound(_) => "PROPERTY_NOT_FOUND",
            Self::NoAllocations | Self::NoInstruments => "EMPTY_SUBMISSION",
            Self::InvalidAllocation(_) | Self::DuplicateAllocation(_) => "INVALID_ALLOCATION",
            Self::UnknownCharge(_) => "UNKNOWN_CHARGE",
            Self::AllocationExceedsBalance(_) => "ALLOCATION_EXCEEDS_BALANCE",
            Self::InvalidInstrument => "INVALID_INSTRUMENT",
            Self::Underpaid { .. } => "UNDERPAID",
            Self::AmountOutOfRange | Self::TotalOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::KeyConflict => "KEY_CONFLICT",
            Self::EvidenceExtension(_) | Self::EvidenceEncoding | Self::EvidenceTooLarge { .. } => {
                "INVALID_EVIDENCE"
            }
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::PropertyNotFound(id) => {
                Self::NotFound(format!("property {id} not found"))
            }
            PaymentError::Storage(e) => Self::Storage(e.to_string()),
            PaymentError::Store(e) => e.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::PropertyNotFound(PropertyId::new(1)).status_code(), 404);
        assert_eq!(PaymentError::NoAllocations.status_code(), 400);
        assert_eq!(
            PaymentError::Underpaid {
                tendered: dec!(1),
                allocated: dec!(2)
            }
            .status_code(),
            400
        );
        assert_eq!(PaymentError::AmountOutOfRange.status_code(), 400);
        assert_eq!(PaymentError::TotalOutOfRange(dec!(0)).status_code(), 400);
        assert_eq!(PaymentError::Store(StoreError::backend("down")).status_code(), 500);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = PaymentError::UnknownCharge(ChargeId::new(9)).into();
        assert!(matches!(app, AppError::Validation(_)));
        assert_eq!(app.status_code(), 400);

        let app: AppError = PaymentError::PropertyNotFound(PropertyId::new(3)).into();
        assert!(matches!(app, AppError::NotFound(ref m) if m == "property 3 not found"));

        let app: AppError = PaymentError::Store(StoreError::backend("down")).into();
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_underpaid_message() {
        let err = PaymentError::Underpaid {
            tendered: dec!(50),
            allocated: dec!(100),
        };
        assert_eq!(err.to_string(), "payment total below allocation total");
    }
}
