//! Handler registry, dispatcher and chat contexts for tgkit.
//!
//! This crate turns classified updates (from `tgkit-core`) into handler
//! invocations:
//!
//! 1. [`Registry`] holds priority-ordered `(pattern, handler)` lists per
//!    event category, populated during setup.
//! 2. [`Bot`] classifies each inbound update, consults the registry for its
//!    category and invokes the first matching handler with the appropriate
//!    [`context`] objects.
//!
//! ```rust,ignore
//! use tgkit_framework::Bot;
//!
//! let mut bot = Bot::new(transport);
//! bot.command(r"/echo (.+)", |chat, m| async move {
//!     chat.reply(m.group(1).unwrap_or("")).await?;
//!     Ok(())
//! })?;
//!
//! // The update-fetch loop (external) feeds envelopes in:
//! bot.process_updates(&envelope).await;
//! ```

pub mod context;
pub mod dispatcher;
pub mod pattern;
pub mod registry;

pub use context::{CallbackQuery, Chat, ChosenInlineResult, InlineQuery, Sender};
pub use dispatcher::Bot;
pub use pattern::{PatternMatch, RegistryError};
pub use registry::{HandlerResult, Registry};
