//! Inbound updates and their classification.
//!
//! On the wire an update is `update_id` plus exactly one populated category
//! field; which field it is decides the category. [`Update::into_event`]
//! turns that implicit discriminant into the explicit [`UpdateEvent`] tag the
//! dispatcher matches on. Updates carrying only fields this library does not
//! know about classify to `None` and are skipped, which is what keeps old
//! bots working when the API grows new update kinds.

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::query::{CallbackQuery, ChosenInlineResult, InlineQuery};

/// Which message-like field of the update carried the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageUpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
}

impl MessageUpdateKind {
    /// The wire field name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::ChannelPost => "channel_post",
            Self::EditedChannelPost => "edited_channel_post",
        }
    }
}

impl std::fmt::Display for MessageUpdateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound event, as fetched from the update source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier.
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<InlineQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

/// An update with its category made explicit.
#[derive(Debug, Clone)]
pub enum UpdateEvent {
    /// A message-like update, in any of its four wire forms.
    Message(MessageUpdateKind, Message),
    /// An inline query.
    InlineQuery(InlineQuery),
    /// A chosen inline result notification.
    ChosenInlineResult(ChosenInlineResult),
    /// A callback query.
    CallbackQuery(CallbackQuery),
}

impl Update {
    /// Classifies this update by testing the category fields in a fixed
    /// order and taking the first one present.
    ///
    /// Returns `None` when no known field is populated; the update should
    /// then be ignored.
    pub fn into_event(self) -> Option<UpdateEvent> {
        if let Some(msg) = self.message {
            return Some(UpdateEvent::Message(MessageUpdateKind::Message, msg));
        }
        if let Some(msg) = self.edited_message {
            return Some(UpdateEvent::Message(MessageUpdateKind::EditedMessage, msg));
        }
        if let Some(msg) = self.channel_post {
            return Some(UpdateEvent::Message(MessageUpdateKind::ChannelPost, msg));
        }
        if let Some(msg) = self.edited_channel_post {
            return Some(UpdateEvent::Message(
                MessageUpdateKind::EditedChannelPost,
                msg,
            ));
        }
        if let Some(query) = self.inline_query {
            return Some(UpdateEvent::InlineQuery(query));
        }
        if let Some(result) = self.chosen_inline_result {
            return Some(UpdateEvent::ChosenInlineResult(result));
        }
        if let Some(query) = self.callback_query {
            return Some(UpdateEvent::CallbackQuery(query));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_with(field: &str, payload: serde_json::Value) -> Update {
        serde_json::from_value(json!({"update_id": 0, field: payload})).unwrap()
    }

    fn text_msg() -> serde_json::Value {
        json!({
            "message_id": 1,
            "date": 0,
            "chat": {"id": 7, "type": "private"},
            "text": "hello",
        })
    }

    #[test]
    fn each_message_field_maps_to_its_kind() {
        let kinds = [
            MessageUpdateKind::Message,
            MessageUpdateKind::EditedMessage,
            MessageUpdateKind::ChannelPost,
            MessageUpdateKind::EditedChannelPost,
        ];
        for kind in kinds {
            let update = update_with(kind.as_str(), text_msg());
            match update.into_event() {
                Some(UpdateEvent::Message(found, msg)) => {
                    assert_eq!(found, kind);
                    assert_eq!(msg.text.as_deref(), Some("hello"));
                }
                other => panic!("{kind}: unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn query_fields_classify() {
        let update = update_with(
            "inline_query",
            json!({"id": "1", "from": {"id": 1, "first_name": "J"}, "query": "q", "offset": ""}),
        );
        assert!(matches!(
            update.into_event(),
            Some(UpdateEvent::InlineQuery(_))
        ));

        let update = update_with(
            "callback_query",
            json!({"id": "1", "from": {"id": 1, "first_name": "J"}, "data": "d"}),
        );
        assert!(matches!(
            update.into_event(),
            Some(UpdateEvent::CallbackQuery(_))
        ));
    }

    #[test]
    fn unknown_update_kind_is_skipped() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 5,
            "shipping_query": {"id": "1"},
        }))
        .unwrap();
        assert!(update.into_event().is_none());
    }
}
