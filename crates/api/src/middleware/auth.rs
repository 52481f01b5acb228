//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use condo_db::TokenRepository;
use condo_shared::AppError;
use condo_shared::types::UserId;
use tracing::debug;

use crate::{ApiError, AppState};

/// Message returned for a missing, unknown or expired token.
pub const INVALID_TOKEN: &str = "Token invalido o expirado.";

/// Authentication middleware that resolves bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Looks the token up in `auth_tokens`, ignoring expired rows
/// 3. Stores the owning user in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        return ApiError::unauthorized(INVALID_TOKEN).into_response();
    };

    let tokens = TokenRepository::new((*state.db).clone());
    match tokens.resolve_user_id(bearer.token()).await {
        Ok(Some(user_id)) => {
            request.extensions_mut().insert(AuthUser(user_id));
            next.run(request).await
        }
        Ok(None) => {
            debug!("Rejected unknown or expired token");
            ApiError::unauthorized(INVALID_TOKEN).into_response()
        }
        Err(e) => ApiError(AppError::Database(e.to_string())).into_response(),
    }
}

/// Extractor for the authenticated user.
///
/// Use this in handlers to get the caller:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized(INVALID_TOKEN))
    }
}
