//! Request extractors.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use axum_extra::headers::{HeaderMapExt, UserAgent};
use condo_core::payment::SubmissionMetadata;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Longest textual IPv6 address.
const MAX_IP_LEN: usize = 45;

/// JSON body whose rejections render as `{"error": ...}` with status 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

/// Origin of the request, recorded with payment reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    /// First `X-Forwarded-For` hop, else the peer address.
    pub ip: Option<String>,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .filter(|ip| ip.len() <= MAX_IP_LEN);

        let user_agent = parts
            .headers
            .typed_get::<UserAgent>()
            .map(|ua| ua.as_str().to_string());

        Ok(Self { ip, user_agent })
    }
}

impl From<ClientMeta> for SubmissionMetadata {
    fn from(meta: ClientMeta) -> Self {
        Self {
            ip: meta.ip,
            user_agent: meta.user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn meta_for(request: HttpRequest<()>) -> ClientMeta {
        let (mut parts, ()) = request.into_parts();
        ClientMeta::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_forwarded_for_takes_precedence() {
        let mut request = HttpRequest::builder()
            .header("x-forwarded-for", "200.44.32.12, 10.0.0.1")
            .header("user-agent", "CondoApp/3.2 (Android)")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9000))));

        let meta = meta_for(request).await;
        assert_eq!(meta.ip.as_deref(), Some("200.44.32.12"));
        assert_eq!(meta.user_agent.as_deref(), Some("CondoApp/3.2 (Android)"));
    }

    #[tokio::test]
    async fn test_peer_address_fallback() {
        let mut request = HttpRequest::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 9000))));

        let meta = meta_for(request).await;
        assert_eq!(meta.ip.as_deref(), Some("192.168.1.20"));
        assert_eq!(meta.user_agent, None);
    }

    #[tokio::test]
    async fn test_no_origin_information() {
        let meta = meta_for(HttpRequest::builder().body(()).unwrap()).await;
        assert_eq!(meta, ClientMeta::default());
    }
}
