//! The transport facade.
//!
//! The dispatch core never performs network I/O itself. Everything outbound
//! goes through [`RequestSender`], a single-method trait whose implementation
//! may be an HTTP client, a test double, or anything else that can answer a
//! Bot API method call with a response envelope.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ApiResponse;
use crate::error::ApiResult;

/// Performs an outbound Bot API call.
///
/// Implementations receive the API method name (e.g. `"sendMessage"`) and a
/// JSON object of parameters, and resolve to the response envelope. The
/// caller decides whether to await the result.
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Issues one API call and returns its response envelope.
    async fn call(&self, method: &str, params: Value) -> ApiResult<ApiResponse>;
}

/// Shared handle to a transport implementation.
pub type SharedSender = Arc<dyn RequestSender>;
