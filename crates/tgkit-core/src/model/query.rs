//! Raw inline- and callback-query payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;
use super::types::User;

/// An incoming inline query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineQuery {
    /// Unique query id, echoed back when answering.
    pub id: String,
    /// The user who sent the query.
    pub from: User,
    /// Text of the query, up to 256 characters.
    pub query: String,
    /// Pagination offset, controlled by previous answers.
    #[serde(default)]
    pub offset: String,
}

/// Notification that a user picked one of the results of an inline query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    /// Id of the chosen result.
    pub result_id: String,
    /// The user who chose it.
    pub from: User,
    /// The query that produced the result.
    pub query: String,
    /// Id of the sent inline message, when the result carried a markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
}

/// An incoming callback query from an inline keyboard button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Unique query id, echoed back when answering.
    pub id: String,
    /// The user who pressed the button.
    pub from: User,
    /// Payload attached to the button. Absent for game buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// The message the button belongs to, when still accessible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Global identifier of the chat the button was pressed in.
    #[serde(default)]
    pub chat_instance: String,
    /// Game short name, for game buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<Value>,
}
