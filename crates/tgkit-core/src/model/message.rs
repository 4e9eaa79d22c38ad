//! Messages and their content classification.
//!
//! A message's content type is implicit on the wire: the discriminant is
//! *which* optional field is populated, not an explicit tag.
//! [`Message::content`] reconstructs the explicit tag by scanning a fixed,
//! ordered list of fields and stopping at the first one present. That
//! first-match-wins order is an observable contract relied on by dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{ChatInfo, User};

/// The sub-kind of a media message, named after its wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Document,
    Photo,
    Sticker,
    Video,
    Voice,
    Contact,
    Location,
    Venue,
}

impl MediaKind {
    /// All media kinds, in content-detection precedence order.
    pub const ALL: [MediaKind; 9] = [
        MediaKind::Audio,
        MediaKind::Document,
        MediaKind::Photo,
        MediaKind::Sticker,
        MediaKind::Video,
        MediaKind::Voice,
        MediaKind::Contact,
        MediaKind::Location,
        MediaKind::Venue,
    ];

    /// The wire field name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Photo => "photo",
            Self::Sticker => "sticker",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Contact => "contact",
            Self::Location => "location",
            Self::Venue => "venue",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary content of a message, reconstructed from implicit wire fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageContent<'a> {
    /// A text message.
    Text(&'a str),
    /// A media message: the kind and its raw payload fragment.
    Media(MediaKind, &'a Value),
    /// No recognized content field (service messages and the like).
    Empty,
}

/// An inbound message.
///
/// Media payloads are kept as raw [`Value`] fragments; the dispatch core
/// routes on their presence and hands them to handlers untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message id, unique within the chat.
    pub message_id: i64,
    /// Unix timestamp the message was sent at.
    pub date: i64,
    /// The conversation this message belongs to.
    pub chat: ChatInfo,
    /// The sender. Absent for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// Text content, for text messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Value>,
}

impl Message {
    /// Returns the media fragment for `kind`, if present.
    pub fn media(&self, kind: MediaKind) -> Option<&Value> {
        match kind {
            MediaKind::Audio => self.audio.as_ref(),
            MediaKind::Document => self.document.as_ref(),
            MediaKind::Photo => self.photo.as_ref(),
            MediaKind::Sticker => self.sticker.as_ref(),
            MediaKind::Video => self.video.as_ref(),
            MediaKind::Voice => self.voice.as_ref(),
            MediaKind::Contact => self.contact.as_ref(),
            MediaKind::Location => self.location.as_ref(),
            MediaKind::Venue => self.venue.as_ref(),
        }
    }

    /// Classifies this message's primary content.
    ///
    /// Scans `text` first, then the media fields in [`MediaKind::ALL`] order,
    /// and returns the first populated one. A message with several content
    /// fields (the schema does not forbid it) classifies as the earliest in
    /// that order.
    pub fn content(&self) -> MessageContent<'_> {
        if let Some(text) = &self.text {
            return MessageContent::Text(text);
        }
        for kind in MediaKind::ALL {
            if let Some(value) = self.media(kind) {
                return MessageContent::Media(kind, value);
            }
        }
        MessageContent::Empty
    }
}
