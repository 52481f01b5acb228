//! Bearer token lookup.
//!
//! Tokens are issued by the login service and stored opaque; this side only
//! resolves them to a user while they are unexpired.

use chrono::{DateTime, Utc};
use condo_shared::types::UserId;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::auth_tokens;

/// Repository for `auth_tokens`.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    db: DatabaseConnection,
}

impl TokenRepository {
    /// Creates a new token repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user owning `token` if it has not expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn resolve_user_id(&self, token: &str) -> Result<Option<UserId>, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let row = auth_tokens::Entity::find_by_id(token.to_string())
            .filter(auth_tokens::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await?;

        Ok(row.map(|t| UserId::new(t.user_id)))
    }

    /// Stores a token for `user_id` valid until `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token already exists or the insert fails.
    pub async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        auth_tokens::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id.get()),
            expires_at: Set(expires_at.into()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}
