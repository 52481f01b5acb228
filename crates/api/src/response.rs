//! Success envelope.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Wraps a payload as `{"success": true, ...payload}`.
///
/// The payload must serialize to a JSON object; its fields are flattened next
/// to `success`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize> Success<T> {
    /// Wrap a payload.
    pub const fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        id: i64,
        estado: &'static str,
    }

    #[test]
    fn test_payload_is_flattened() {
        let body = serde_json::to_value(Success::new(Payload {
            id: 4,
            estado: "APROBADO",
        }))
        .unwrap();
        assert_eq!(body, json!({ "success": true, "id": 4, "estado": "APROBADO" }));
    }
}
