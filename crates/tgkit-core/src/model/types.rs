//! Identity types shared by messages and queries.

use serde::{Deserialize, Serialize};

/// Identifier of a conversation.
///
/// Inbound payloads always carry the numeric form; the username form exists
/// so callers can address channels as `"@channelname"` without resolving the
/// numeric id first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    /// Numeric chat id, as delivered in updates.
    Integer(i64),
    /// `@username` form, accepted by outbound methods for public chats.
    Username(String),
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&str> for ChatId {
    fn from(name: &str) -> Self {
        Self::Username(name.to_string())
    }
}

impl From<String> for ChatId {
    fn from(name: String) -> Self {
        Self::Username(name)
    }
}

/// The `chat` sub-object of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInfo {
    /// Conversation identifier.
    pub id: ChatId,
    /// Conversation kind: `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A Telegram user, as attached to messages and queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: i64,
    /// First name; always present on the wire.
    pub first_name: String,
    /// Last name, if the user set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Username, if the user set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Whether this user is a bot.
    #[serde(default)]
    pub is_bot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_id_deserializes_both_forms() {
        let numeric: ChatId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(numeric, ChatId::Integer(42));

        let named: ChatId = serde_json::from_value(json!("@foobar")).unwrap();
        assert_eq!(named, ChatId::Username("@foobar".to_string()));
    }

    #[test]
    fn chat_id_display() {
        assert_eq!(ChatId::from(42).to_string(), "42");
        assert_eq!(ChatId::from("@foobar").to_string(), "@foobar");
    }

    #[test]
    fn user_tolerates_missing_optionals() {
        let user: User =
            serde_json::from_value(json!({"id": 123, "first_name": "John"})).unwrap();
        assert_eq!(user.first_name, "John");
        assert!(user.username.is_none());
        assert!(!user.is_bot);
    }
}
