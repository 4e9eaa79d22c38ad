//! Raw Telegram payload types.
//!
//! These mirror only the slices of the Bot API wire shapes the dispatch core
//! actually inspects. Fields the core never looks at are either omitted
//! (serde ignores unknown keys) or kept as loosely-typed [`serde_json::Value`]
//! fragments that are handed to user handlers untouched.

mod message;
mod query;
mod types;
mod update;

pub use message::{Message, MediaKind, MessageContent};
pub use query::{CallbackQuery, ChosenInlineResult, InlineQuery};
pub use types::{ChatId, ChatInfo, User};
pub use update::{MessageUpdateKind, Update, UpdateEvent};
