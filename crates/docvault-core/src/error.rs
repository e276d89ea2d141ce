//! Client-level error types.

use docvault_shared::ErrorPayload;
use docvault_shared::messages::error as msg;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ports::{ApiResponse, TransportError};

/// Raw outcome of a failed call inside the request pipeline, before it is
/// normalized for callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("no response: {0}")]
    Network(#[from] TransportError),

    #[error("HTTP {}", .0.status)]
    Status(ApiResponse),
}

impl Failure {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Status(response) => Some(response.status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response was received.
    Network,
    /// 401 that the refresh protocol could not recover.
    Unauthorized,
    BadRequest,
    Forbidden,
    NotFound,
    Server,
    /// Any other non-2xx status.
    Status,
    /// 2xx response whose body did not have the expected shape.
    Decode,
}

/// Normalized error every client operation rejects with.
///
/// `message` is always set and suitable for display. Structured server
/// fields (validation maps, error codes) are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    pub detail: Option<String>,
    pub fields: Map<String, Value>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            detail: None,
            fields: Map::new(),
        }
    }

    pub fn network() -> Self {
        Self::new(ApiErrorKind::Network, None, msg::NETWORK_ERROR)
    }

    pub fn decode(err: &serde_json::Error) -> Self {
        let mut error = Self::new(ApiErrorKind::Decode, None, msg::GENERIC_ERROR);
        error.detail = Some(err.to_string());
        error
    }

    /// Map a non-2xx response.
    ///
    /// Known statuses get a fixed message; other statuses fall back to the
    /// server's `detail`. A server-supplied `message` always takes precedence.
    pub fn from_response(response: &ApiResponse) -> Self {
        let (kind, fixed) = match response.status {
            400 => (ApiErrorKind::BadRequest, Some(msg::BAD_REQUEST)),
            401 => (ApiErrorKind::Unauthorized, Some(msg::UNAUTHORIZED)),
            403 => (ApiErrorKind::Forbidden, Some(msg::FORBIDDEN)),
            404 => (ApiErrorKind::NotFound, Some(msg::NOT_FOUND)),
            500 => (ApiErrorKind::Server, Some(msg::SERVER_ERROR)),
            _ => (ApiErrorKind::Status, None),
        };

        let payload = ErrorPayload::from_body(&response.body).unwrap_or_default();

        let message = payload
            .message
            .clone()
            .or_else(|| fixed.map(str::to_string))
            .or_else(|| payload.detail.clone())
            .unwrap_or_else(|| msg::GENERIC_ERROR.to_string());

        Self {
            kind,
            status: Some(response.status),
            message,
            detail: payload.detail,
            fields: payload.fields,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Network(_) => Self::network(),
            Failure::Status(response) => Self::from_response(&response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_failure_uses_connectivity_message() {
        let err = ApiError::from(Failure::Network(TransportError::Timeout));
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.message, msg::NETWORK_ERROR);
        assert_eq!(err.status, None);
    }

    #[test]
    fn test_known_statuses_use_fixed_messages() {
        let cases = [
            (400, msg::BAD_REQUEST, ApiErrorKind::BadRequest),
            (401, msg::UNAUTHORIZED, ApiErrorKind::Unauthorized),
            (403, msg::FORBIDDEN, ApiErrorKind::Forbidden),
            (404, msg::NOT_FOUND, ApiErrorKind::NotFound),
            (500, msg::SERVER_ERROR, ApiErrorKind::Server),
        ];

        for (status, message, kind) in cases {
            let err = ApiError::from_response(&ApiResponse::new(status, ""));
            assert_eq!(err.message, message);
            assert_eq!(err.kind, kind);
            assert_eq!(err.status, Some(status));
        }
    }

    #[test]
    fn test_server_fields_are_merged() {
        let body = json!({"email": ["Ce champ est obligatoire."], "detail": "bad input"});
        let err = ApiError::from_response(&ApiResponse::json_body(400, &body));

        assert_eq!(err.message, msg::BAD_REQUEST);
        assert_eq!(err.detail.as_deref(), Some("bad input"));
        assert_eq!(err.fields["email"][0], "Ce champ est obligatoire.");
    }

    #[test]
    fn test_unrecognized_status_prefers_detail_then_generic() {
        let with_detail =
            ApiResponse::json_body(429, &json!({"detail": "Request was throttled."}));
        assert_eq!(
            ApiError::from_response(&with_detail).message,
            "Request was throttled."
        );

        let bare = ApiResponse::new(502, "<html>bad gateway</html>");
        let err = ApiError::from_response(&bare);
        assert_eq!(err.message, msg::GENERIC_ERROR);
        assert_eq!(err.kind, ApiErrorKind::Status);
    }

    #[test]
    fn test_server_message_takes_precedence() {
        let body = json!({"message": "Compte désactivé"});
        let err = ApiError::from_response(&ApiResponse::json_body(403, &body));
        assert_eq!(err.message, "Compte désactivé");
        assert_eq!(err.to_string(), "Compte désactivé");
    }
}
