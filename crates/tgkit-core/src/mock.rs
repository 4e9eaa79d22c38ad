//! A recording transport double for tests and examples.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::api::ApiResponse;
use crate::error::ApiResult;
use crate::transport::RequestSender;

/// [`RequestSender`] implementation that records every call instead of
/// talking to the network.
///
/// Each call stores its parameters under the method name (later calls to the
/// same method overwrite earlier ones) and answers with a canned success
/// envelope.
#[derive(Default)]
pub struct RecordingSender {
    calls: Mutex<HashMap<String, Value>>,
    count: Mutex<usize>,
}

impl RecordingSender {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty recorder behind an [`Arc`], ready to hand to a bot.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Whether `method` was called at least once.
    pub fn was_called(&self, method: &str) -> bool {
        self.calls.lock().contains_key(method)
    }

    /// Parameters of the most recent call to `method`.
    pub fn params_for(&self, method: &str) -> Option<Value> {
        self.calls.lock().get(method).cloned()
    }

    /// Total number of recorded calls.
    pub fn call_count(&self) -> usize {
        *self.count.lock()
    }
}

#[async_trait]
impl RequestSender for RecordingSender {
    async fn call(&self, method: &str, params: Value) -> ApiResult<ApiResponse> {
        self.calls.lock().insert(method.to_string(), params);
        *self.count.lock() += 1;
        Ok(ApiResponse::ok(json!(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_method_and_params() {
        let sender = RecordingSender::new();
        let resp = sender
            .call("sendMessage", json!({"chat_id": 1, "text": "hi"}))
            .await
            .unwrap();

        assert!(resp.ok);
        assert!(sender.was_called("sendMessage"));
        assert_eq!(sender.params_for("sendMessage").unwrap()["text"], "hi");
        assert_eq!(sender.call_count(), 1);
    }
}
