//! # tgkit
//!
//! A small Telegram bot library built around one idea: classify each inbound
//! update, match it against priority-ordered handler patterns, and invoke
//! the first match with a ready-to-use context object.
//!
//! ## Architecture
//!
//! ```text
//! update source ──▶ Bot::process_updates
//!                      │  classify (which field is populated?)
//!                      ▼
//!                  Registry lookup (first matching pattern wins)
//!                      │
//!                      ▼
//!                  handler(Chat / InlineQuery / CallbackQuery, …)
//!                      │  outbound calls
//!                      ▼
//!                  RequestSender (HTTP client, test double, …)
//! ```
//!
//! The transport itself — authenticated HTTP, retries, the polling loop —
//! is deliberately outside this library; anything implementing
//! [`RequestSender`](tgkit_core::RequestSender) plugs in.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use tgkit::prelude::*;
//!
//! let mut bot = Bot::new(transport);
//! bot.command(r"/echo (.+)", |chat, m| async move {
//!     chat.reply(m.group(1).unwrap_or("")).await?;
//!     Ok(())
//! })?;
//! bot.default(|chat, _msg| async move {
//!     chat.send_text("I only echo.").await?;
//!     Ok(())
//! });
//!
//! bot.process_updates(&envelope).await;
//! ```

pub use tgkit_core as core;
pub use tgkit_framework as framework;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use tgkit_core::api::ApiResponse;
    pub use tgkit_core::error::{ApiError, ApiResult};
    pub use tgkit_core::model::{
        ChatId, MediaKind, Message, MessageContent, Update, UpdateEvent, User,
    };
    pub use tgkit_core::transport::{RequestSender, SharedSender};

    pub use tgkit_framework::context::{
        CallbackQuery, Chat, ChosenInlineResult, InlineQuery, Sender,
    };
    pub use tgkit_framework::dispatcher::Bot;
    pub use tgkit_framework::pattern::{PatternMatch, RegistryError};
    pub use tgkit_framework::registry::{HandlerResult, Registry};
}
