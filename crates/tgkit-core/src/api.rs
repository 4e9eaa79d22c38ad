//! The Telegram Bot API response envelope.
//!
//! Every method of the remote API answers with the same outer shape:
//!
//! ```json
//! { "ok": true,  "result": ... }
//! { "ok": false, "description": "why it failed" }
//! ```
//!
//! [`ApiResponse`] models that envelope without interpreting the inner
//! `result`, which stays a loosely-typed [`Value`]. Callers that need a
//! concrete shape deserialize it themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Response envelope returned by every Bot API method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Payload of a successful response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Human-readable failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiResponse {
    /// Builds a successful envelope around `result`.
    pub fn ok(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
        }
    }

    /// Builds a failure envelope with the given description.
    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
        }
    }

    /// Unwraps the envelope into its `result` payload.
    ///
    /// A failure envelope becomes [`ApiError::Telegram`]; a success envelope
    /// without a `result` becomes [`ApiError::MissingResult`].
    pub fn into_result(self) -> ApiResult<Value> {
        if !self.ok {
            return Err(ApiError::Telegram {
                description: self
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        self.result.ok_or(ApiError::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_unwraps_result() {
        let resp: ApiResponse =
            serde_json::from_value(json!({"ok": true, "result": [1, 2, 3]})).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn failure_envelope_carries_description() {
        let resp: ApiResponse =
            serde_json::from_value(json!({"ok": false, "description": "Oops"})).unwrap();
        match resp.into_result() {
            Err(ApiError::Telegram { description }) => assert_eq!(description, "Oops"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn success_without_result_is_an_error() {
        let resp = ApiResponse {
            ok: true,
            result: None,
            description: None,
        };
        assert!(matches!(resp.into_result(), Err(ApiError::MissingResult)));
    }
}
