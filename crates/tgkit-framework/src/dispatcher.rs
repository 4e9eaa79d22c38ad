//! The [`Bot`]: handler registration plus update dispatch.
//!
//! A `Bot` owns the transport handle and the handler [`Registry`]. Setup
//! registers handlers (before any update flows); after that,
//! [`Bot::process_updates`] drives a batch through classification and
//! dispatch, one update at a time, in receipt order.
//!
//! Failure isolation lives here and only here: a handler error is caught at
//! the per-update boundary, logged, and the loop moves on. One bad update
//! never halts processing of the rest of the batch or of later batches.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use tgkit_core::api::ApiResponse;
use tgkit_core::model::{self, ChatId, Message, MessageContent, Update, UpdateEvent};
use tgkit_core::transport::SharedSender;

use crate::context::{CallbackQuery, Chat, ChosenInlineResult, InlineQuery};
use crate::pattern::{PatternMatch, RegistryError};
use crate::registry::{HandlerResult, Registry};

/// A Telegram bot: registered handlers and the transport they reach the API
/// through.
pub struct Bot {
    api: SharedSender,
    registry: Registry,
}

impl Bot {
    /// Creates a bot with an empty registry on top of the given transport.
    pub fn new(api: SharedSender) -> Self {
        Self {
            api,
            registry: Registry::new(),
        }
    }

    /// The transport handle, for issuing calls outside any chat context.
    pub fn api(&self) -> &SharedSender {
        &self.api
    }

    // ------------------------------------------------------------------
    // Registration (delegates to the registry; setup-time only)
    // ------------------------------------------------------------------

    /// Registers a command handler; see [`Registry::command`].
    pub fn command<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Chat, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.command(pattern, handler)
    }

    /// Registers the message fallback handler; see [`Registry::default`].
    pub fn default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(Chat, Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.default(handler);
    }

    /// Registers a media handler; see [`Registry::handle`].
    pub fn handle<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Chat, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.handle(pattern, handler)
    }

    /// Registers an inline query handler; see [`Registry::inline`].
    pub fn inline<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(InlineQuery, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.inline(pattern, handler)
    }

    /// Registers the inline query fallback handler.
    pub fn inline_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(InlineQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.inline_default(handler);
    }

    /// Registers a chosen-inline-result handler.
    pub fn chosen_inline_result<H, Fut>(
        &mut self,
        pattern: &str,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: Fn(ChosenInlineResult, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.chosen_inline_result(pattern, handler)
    }

    /// Registers the chosen-inline-result fallback handler.
    pub fn chosen_inline_result_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(ChosenInlineResult) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.chosen_inline_result_default(handler);
    }

    /// Registers a callback query handler.
    pub fn callback<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Option<Chat>, CallbackQuery, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.callback(pattern, handler)
    }

    /// Registers the callback query fallback handler.
    pub fn callback_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(Option<Chat>, CallbackQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.callback_default(handler);
    }

    // ------------------------------------------------------------------
    // Chat constructors
    // ------------------------------------------------------------------

    /// A chat handle with an explicit kind and no originating message.
    pub fn chat(&self, id: impl Into<ChatId>, kind: &str) -> Chat {
        Chat::new(Arc::clone(&self.api), id, kind)
    }

    /// A private chat handle.
    pub fn private(&self, id: impl Into<ChatId>) -> Chat {
        self.chat(id, "private")
    }

    /// A group chat handle.
    pub fn group(&self, id: impl Into<ChatId>) -> Chat {
        self.chat(id, "group")
    }

    /// A channel handle; `id` is usually the `"@channelname"` form.
    pub fn channel(&self, id: impl Into<ChatId>) -> Chat {
        self.chat(id, "channel")
    }

    // ------------------------------------------------------------------
    // Update processing
    // ------------------------------------------------------------------

    /// Drives one `getUpdates` response envelope through dispatch.
    ///
    /// A failure envelope is logged at error level and processed no
    /// further. Updates dispatch sequentially in receipt order; a handler
    /// error is logged and the loop continues with the next update.
    pub async fn process_updates(&self, response: &ApiResponse) {
        if !response.ok {
            let description = response.description.as_deref().unwrap_or("unknown error");
            error!(description = %description, "getUpdates error");
            return;
        }

        let Some(result) = &response.result else {
            error!("getUpdates succeeded without a result payload");
            return;
        };

        let updates: Vec<Update> = match serde_json::from_value(result.clone()) {
            Ok(updates) => updates,
            Err(err) => {
                error!(error = %err, "failed to decode update batch");
                return;
            }
        };

        for update in updates {
            let update_id = update.update_id;
            if let Err(err) = self.process_update(update).await {
                // The per-update failure boundary: log and keep going.
                error!(update_id, error = %err, "handler failed");
            }
        }
    }

    /// Classifies and dispatches a single update.
    pub async fn process_update(&self, update: Update) -> HandlerResult {
        let update_id = update.update_id;
        match update.into_event() {
            Some(UpdateEvent::Message(kind, message)) => {
                debug!(update_id, kind = %kind, "dispatching message update");
                self.process_message(message).await
            }
            Some(UpdateEvent::InlineQuery(query)) => self.process_inline_query(query).await,
            Some(UpdateEvent::ChosenInlineResult(result)) => {
                self.process_chosen_inline_result(result).await
            }
            Some(UpdateEvent::CallbackQuery(query)) => self.process_callback_query(query).await,
            None => {
                // Unknown update kind: forward-compatibility, not an error.
                debug!(update_id, "skipping unrecognized update kind");
                Ok(())
            }
        }
    }

    /// Dispatches a message: commands on text, media handlers on media
    /// kind, the default handler when nothing else matched.
    pub async fn process_message(&self, message: Message) -> HandlerResult {
        let chat = Chat::from_message(Arc::clone(&self.api), message.clone());

        match message.content() {
            MessageContent::Text(text) => {
                if let Some((handler, m)) = self.registry.find_command(text) {
                    return handler(chat, m).await;
                }
            }
            MessageContent::Media(kind, value) => {
                if let Some(handler) = self.registry.find_media(kind.as_str()) {
                    return handler(chat, value.clone()).await;
                }
            }
            MessageContent::Empty => {}
        }

        if let Some(handler) = self.registry.message_default() {
            return handler(chat, message).await;
        }

        debug!(message_id = message.message_id, "no handler for message");
        Ok(())
    }

    /// Dispatches an inline query against the inline registry.
    pub async fn process_inline_query(&self, src: model::InlineQuery) -> HandlerResult {
        let query = InlineQuery::new(Arc::clone(&self.api), src);

        if let Some((handler, m)) = self.registry.find_inline(query.query()) {
            return handler(query, m).await;
        }
        if let Some(handler) = self.registry.inline_default_handler() {
            return handler(query).await;
        }

        debug!("no handler for inline query");
        Ok(())
    }

    /// Dispatches a chosen-inline-result notification.
    pub async fn process_chosen_inline_result(
        &self,
        src: model::ChosenInlineResult,
    ) -> HandlerResult {
        let result = ChosenInlineResult::new(src);

        if let Some((handler, m)) = self.registry.find_chosen(result.query()) {
            return handler(result, m).await;
        }
        if let Some(handler) = self.registry.chosen_default_handler() {
            return handler(result).await;
        }

        debug!("no handler for chosen inline result");
        Ok(())
    }

    /// Dispatches a callback query.
    ///
    /// Queries without `data` (game buttons) skip the pattern entries
    /// entirely and reach only the default handler.
    pub async fn process_callback_query(&self, src: model::CallbackQuery) -> HandlerResult {
        let chat = src
            .message
            .as_ref()
            .map(|msg| Chat::from_message(Arc::clone(&self.api), msg.clone()));
        let query = CallbackQuery::new(Arc::clone(&self.api), src);

        if let Some(data) = query.data() {
            if let Some((handler, m)) = self.registry.find_callback(data) {
                return handler(chat, query, m).await;
            }
        }
        if let Some(handler) = self.registry.callback_default_handler() {
            return handler(chat, query).await;
        }

        debug!("no handler for callback query");
        Ok(())
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("registry", &self.registry)
            .finish()
    }
}
