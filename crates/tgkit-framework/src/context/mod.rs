//! Context objects handed to handlers.
//!
//! Each wraps a raw payload fragment together with a transport handle, so a
//! handler can act on the event (`chat.reply(..)`, `query.answer(..)`)
//! without touching the transport facade directly.

mod chat;
mod query;

pub use chat::{Chat, Sender};
pub use query::{CallbackQuery, ChosenInlineResult, InlineQuery};
