//! Ownership check for property-scoped operations.

use std::sync::Arc;

use condo_shared::AppError;
use condo_shared::types::{PropertyId, UserId};
use thiserror::Error;

use super::types::Property;
use crate::store::StoreError;

/// Repository trait for property lookups.
pub trait PropertyRepository: Send + Sync {
    /// Find a property the user owns directly or as a co-owner.
    fn find_accessible(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Option<Property>, StoreError>> + Send;

    /// List every property the user owns directly or as a co-owner, by ID.
    fn list_accessible(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Property>, StoreError>> + Send;
}

/// Errors from the ownership check.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Property missing or not owned by the caller. The two cases are not
    /// distinguished so property IDs cannot be probed.
    #[error("property {0} not found")]
    NotFound(PropertyId),

    /// Repository failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(id) => Self::NotFound(format!("property {id} not found")),
            AccessError::Store(e) => e.into(),
        }
    }
}

/// Verifies that a user may act on a property.
pub struct PropertyAccessGuard<R: PropertyRepository> {
    repo: Arc<R>,
}

impl<R: PropertyRepository> PropertyAccessGuard<R> {
    /// Create a new access guard.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Return the property if the user owns or co-owns it.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::NotFound` when the user has no claim on the property.
    pub async fn authorize(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Property, AccessError> {
        self.repo
            .find_accessible(user_id, property_id)
            .await?
            .ok_or(AccessError::NotFound(property_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryLedger;

    #[tokio::test]
    async fn test_direct_owner_is_authorized() {
        let ledger = InMemoryLedger::new();
        ledger.add_property(10, 1, Some(7), 1);
        let guard = PropertyAccessGuard::new(Arc::new(ledger));

        let property = guard
            .authorize(UserId::new(7), PropertyId::new(10))
            .await
            .unwrap();
        assert_eq!(property.id, PropertyId::new(10));
    }

    #[tokio::test]
    async fn test_co_owner_is_authorized() {
        let ledger = InMemoryLedger::new();
        ledger.add_property(10, 1, Some(7), 1);
        ledger.add_co_owner(10, 8);
        let guard = PropertyAccessGuard::new(Arc::new(ledger));

        let result = guard.authorize(UserId::new(8), PropertyId::new(10)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stranger_gets_not_found() {
        let ledger = InMemoryLedger::new();
        ledger.add_property(10, 1, Some(7), 1);
        let guard = PropertyAccessGuard::new(Arc::new(ledger));

        let err = guard
            .authorize(UserId::new(99), PropertyId::new(10))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound(id) if id == PropertyId::new(10)));

        let err = guard
            .authorize(UserId::new(7), PropertyId::new(11))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).status_code(), 404);
    }
}
