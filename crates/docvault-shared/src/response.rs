//! Error bodies returned by the document API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error payload sent by the server on a non-2xx response.
///
/// The API is not uniform here: validation failures come back as a map of
/// field name to messages, permission failures as `{"detail": ...}` and some
/// handlers use `{"error": ...}` or `{"message": ...}`. Everything that is not
/// `message` or `detail` is kept in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ErrorPayload {
    /// Parse a raw response body.
    ///
    /// Returns `None` when the body is empty, not JSON, or not a JSON object.
    /// Non-string `message`/`detail` values stay in `fields`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let Value::Object(mut map) = serde_json::from_slice::<Value>(body).ok()? else {
            return None;
        };

        let message = take_string(&mut map, "message");
        let detail = take_string(&mut map, "detail");

        Some(Self {
            message,
            detail,
            fields: map,
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_splits_known_fields() {
        let body = br#"{"detail":"Given token not valid","code":"token_not_valid"}"#;
        let payload = ErrorPayload::from_body(body).unwrap();

        assert_eq!(payload.detail.as_deref(), Some("Given token not valid"));
        assert!(payload.message.is_none());
        assert_eq!(payload.fields["code"], "token_not_valid");
    }

    #[test]
    fn test_from_body_keeps_validation_maps() {
        let body = br#"{"email":["Enter a valid email address."]}"#;
        let payload = ErrorPayload::from_body(body).unwrap();

        assert!(payload.detail.is_none());
        assert_eq!(payload.fields["email"][0], "Enter a valid email address.");
    }

    #[test]
    fn test_from_body_rejects_non_objects() {
        assert!(ErrorPayload::from_body(b"").is_none());
        assert!(ErrorPayload::from_body(b"<html>boom</html>").is_none());
        assert!(ErrorPayload::from_body(br#"["a","b"]"#).is_none());
    }

    #[test]
    fn test_non_string_detail_stays_in_fields() {
        let payload = ErrorPayload::from_body(br#"{"detail":{"nested":true}}"#).unwrap();
        assert!(payload.detail.is_none());
        assert_eq!(payload.fields["detail"]["nested"], true);
    }
}
