//! Context wrappers for inline and callback queries.

use serde_json::{Value, json};

use tgkit_core::api::ApiResponse;
use tgkit_core::error::ApiResult;
use tgkit_core::model;
use tgkit_core::transport::SharedSender;

/// An inline query, ready to be answered.
#[derive(Clone)]
pub struct InlineQuery {
    api: SharedSender,
    src: model::InlineQuery,
}

impl InlineQuery {
    pub(crate) fn new(api: SharedSender, src: model::InlineQuery) -> Self {
        Self { api, src }
    }

    /// Text of the query.
    pub fn query(&self) -> &str {
        &self.src.query
    }

    /// The raw payload.
    pub fn raw(&self) -> &model::InlineQuery {
        &self.src
    }

    /// Answers the query with an array of inline results.
    ///
    /// The results array travels as a JSON-serialized string parameter, as
    /// the API expects.
    pub async fn answer(&self, results: &Value) -> ApiResult<ApiResponse> {
        let params = json!({
            "inline_query_id": self.src.id,
            "results": serde_json::to_string(results)?,
        });
        self.api.call("answerInlineQuery", params).await
    }
}

/// Notification that a user picked an inline result.
#[derive(Clone)]
pub struct ChosenInlineResult {
    src: model::ChosenInlineResult,
}

impl ChosenInlineResult {
    pub(crate) fn new(src: model::ChosenInlineResult) -> Self {
        Self { src }
    }

    /// The query that produced the chosen result.
    pub fn query(&self) -> &str {
        &self.src.query
    }

    /// Id of the chosen result.
    pub fn result_id(&self) -> &str {
        &self.src.result_id
    }

    /// The raw payload.
    pub fn raw(&self) -> &model::ChosenInlineResult {
        &self.src
    }
}

/// A callback query, ready to be answered.
#[derive(Clone)]
pub struct CallbackQuery {
    api: SharedSender,
    src: model::CallbackQuery,
}

impl CallbackQuery {
    pub(crate) fn new(api: SharedSender, src: model::CallbackQuery) -> Self {
        Self { api, src }
    }

    /// Payload attached to the pressed button. Absent for game buttons.
    pub fn data(&self) -> Option<&str> {
        self.src.data.as_deref()
    }

    /// The raw payload.
    pub fn raw(&self) -> &model::CallbackQuery {
        &self.src
    }

    /// Answers the query, optionally showing `text` to the user.
    pub async fn answer(&self, text: Option<&str>) -> ApiResult<ApiResponse> {
        let mut params = json!({"callback_query_id": self.src.id});
        if let Some(text) = text {
            params["text"] = json!(text);
        }
        self.api.call("answerCallbackQuery", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgkit_core::mock::RecordingSender;

    fn inline_src(query: &str) -> model::InlineQuery {
        serde_json::from_value(json!({
            "id": "9999",
            "from": {"id": 123, "first_name": "John"},
            "query": query,
            "offset": "",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn answer_serializes_results_to_a_string() {
        let api = RecordingSender::shared();
        let query = InlineQuery::new(api.clone(), inline_src("Answer!"));

        let results = json!([
            {"type": "article", "id": "000", "title": "test", "message_text": "Foo bar"}
        ]);
        query.answer(&results).await.unwrap();

        let params = api.params_for("answerInlineQuery").unwrap();
        assert_eq!(params["inline_query_id"], "9999");
        assert!(params["results"].is_string());
        let round_trip: Value =
            serde_json::from_str(params["results"].as_str().unwrap()).unwrap();
        assert_eq!(round_trip, results);
    }

    #[tokio::test]
    async fn callback_answer_targets_the_query() {
        let api = RecordingSender::shared();
        let src: model::CallbackQuery = serde_json::from_value(json!({
            "id": "9999",
            "from": {"id": 123, "first_name": "John"},
            "data": "click",
        }))
        .unwrap();
        let query = CallbackQuery::new(api.clone(), src);

        query.answer(Some("done")).await.unwrap();

        let params = api.params_for("answerCallbackQuery").unwrap();
        assert_eq!(params["callback_query_id"], "9999");
        assert_eq!(params["text"], "done");
    }
}
