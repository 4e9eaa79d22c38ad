//! The handler registry.
//!
//! One ordered list of `(compiled pattern, handler)` pairs per event
//! category, plus an optional default slot per category. Insertion order is
//! match priority: dispatch scans each list front to back and the first
//! pattern that matches the dispatch key wins. First-registered-wins is a
//! user-visible contract, not an implementation detail.
//!
//! Registration happens before dispatch starts (all methods take `&mut
//! self`); the registry is read-only once updates begin flowing.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use serde_json::Value;

use tgkit_core::model::Message;

use crate::context::{CallbackQuery, Chat, ChosenInlineResult, InlineQuery};
use crate::pattern::{PatternMatch, RegistryError, compile_command, compile_search};

/// What a handler resolves to. Errors surface at the per-update boundary of
/// the processing loop, never inside the dispatcher.
pub type HandlerResult = anyhow::Result<()>;

type BoxFut = BoxFuture<'static, HandlerResult>;

pub(crate) type CommandHandler = Box<dyn Fn(Chat, PatternMatch) -> BoxFut + Send + Sync>;
pub(crate) type MessageDefaultHandler = Box<dyn Fn(Chat, Message) -> BoxFut + Send + Sync>;
pub(crate) type MediaHandler = Box<dyn Fn(Chat, Value) -> BoxFut + Send + Sync>;
pub(crate) type InlineHandler = Box<dyn Fn(InlineQuery, PatternMatch) -> BoxFut + Send + Sync>;
pub(crate) type InlineDefaultHandler = Box<dyn Fn(InlineQuery) -> BoxFut + Send + Sync>;
pub(crate) type ChosenHandler =
    Box<dyn Fn(ChosenInlineResult, PatternMatch) -> BoxFut + Send + Sync>;
pub(crate) type ChosenDefaultHandler = Box<dyn Fn(ChosenInlineResult) -> BoxFut + Send + Sync>;
pub(crate) type CallbackHandler =
    Box<dyn Fn(Option<Chat>, CallbackQuery, PatternMatch) -> BoxFut + Send + Sync>;
pub(crate) type CallbackDefaultHandler =
    Box<dyn Fn(Option<Chat>, CallbackQuery) -> BoxFut + Send + Sync>;

/// Priority-ordered handler registrations for every event category.
pub struct Registry {
    commands: Vec<(Regex, CommandHandler)>,
    message_default: Option<MessageDefaultHandler>,
    media: Vec<(Regex, MediaHandler)>,
    inline: Vec<(Regex, InlineHandler)>,
    inline_default: Option<InlineDefaultHandler>,
    chosen: Vec<(Regex, ChosenHandler)>,
    chosen_default: Option<ChosenDefaultHandler>,
    callbacks: Vec<(Regex, CallbackHandler)>,
    callback_default: Option<CallbackDefaultHandler>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            message_default: None,
            media: Vec::new(),
            inline: Vec::new(),
            inline_default: None,
            chosen: Vec::new(),
            chosen_default: None,
            callbacks: Vec::new(),
            callback_default: None,
        }
    }

    /// Registers a command handler.
    ///
    /// The pattern is matched against message text, anchored to
    /// start-of-text and case-insensitive.
    pub fn command<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Chat, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let regex = compile_command(pattern)?;
        self.commands
            .push((regex, Box::new(move |chat, m| handler(chat, m).boxed())));
        Ok(())
    }

    /// Registers the fallback handler for messages nothing else matched.
    ///
    /// It receives the raw message, match-free. A later registration
    /// replaces an earlier one.
    pub fn default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(Chat, Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.message_default = Some(Box::new(move |chat, msg| handler(chat, msg).boxed()));
    }

    /// Registers a media handler.
    ///
    /// The pattern is matched against the media kind name (`"photo"`,
    /// `"audio"`, …); the handler receives the raw payload fragment of that
    /// field.
    pub fn handle<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Chat, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let regex = compile_search(pattern)?;
        self.media
            .push((regex, Box::new(move |chat, value| handler(chat, value).boxed())));
        Ok(())
    }

    /// Registers an inline query handler matched against the query string.
    pub fn inline<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(InlineQuery, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let regex = compile_search(pattern)?;
        self.inline
            .push((regex, Box::new(move |query, m| handler(query, m).boxed())));
        Ok(())
    }

    /// Registers the fallback inline query handler.
    pub fn inline_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(InlineQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.inline_default = Some(Box::new(move |query| handler(query).boxed()));
    }

    /// Registers a chosen-inline-result handler matched against the query
    /// string that produced the result.
    pub fn chosen_inline_result<H, Fut>(
        &mut self,
        pattern: &str,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: Fn(ChosenInlineResult, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let regex = compile_search(pattern)?;
        self.chosen
            .push((regex, Box::new(move |result, m| handler(result, m).boxed())));
        Ok(())
    }

    /// Registers the fallback chosen-inline-result handler.
    pub fn chosen_inline_result_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(ChosenInlineResult) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.chosen_default = Some(Box::new(move |result| handler(result).boxed()));
    }

    /// Registers a callback query handler matched against the callback data.
    pub fn callback<H, Fut>(&mut self, pattern: &str, handler: H) -> Result<(), RegistryError>
    where
        H: Fn(Option<Chat>, CallbackQuery, PatternMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let regex = compile_search(pattern)?;
        self.callbacks.push((
            regex,
            Box::new(move |chat, query, m| handler(chat, query, m).boxed()),
        ));
        Ok(())
    }

    /// Registers the fallback callback query handler.
    pub fn callback_default<H, Fut>(&mut self, handler: H)
    where
        H: Fn(Option<Chat>, CallbackQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.callback_default = Some(Box::new(move |chat, query| handler(chat, query).boxed()));
    }

    // First-match lookups, in registration order.

    pub(crate) fn find_command(&self, text: &str) -> Option<(&CommandHandler, PatternMatch)> {
        self.commands
            .iter()
            .find_map(|(re, h)| PatternMatch::capture(re, text).map(|m| (h, m)))
    }

    pub(crate) fn find_media(&self, kind: &str) -> Option<&MediaHandler> {
        self.media
            .iter()
            .find_map(|(re, h)| re.is_match(kind).then_some(h))
    }

    pub(crate) fn find_inline(&self, query: &str) -> Option<(&InlineHandler, PatternMatch)> {
        self.inline
            .iter()
            .find_map(|(re, h)| PatternMatch::capture(re, query).map(|m| (h, m)))
    }

    pub(crate) fn find_chosen(&self, query: &str) -> Option<(&ChosenHandler, PatternMatch)> {
        self.chosen
            .iter()
            .find_map(|(re, h)| PatternMatch::capture(re, query).map(|m| (h, m)))
    }

    pub(crate) fn find_callback(&self, data: &str) -> Option<(&CallbackHandler, PatternMatch)> {
        self.callbacks
            .iter()
            .find_map(|(re, h)| PatternMatch::capture(re, data).map(|m| (h, m)))
    }

    pub(crate) fn message_default(&self) -> Option<&MessageDefaultHandler> {
        self.message_default.as_ref()
    }

    pub(crate) fn inline_default_handler(&self) -> Option<&InlineDefaultHandler> {
        self.inline_default.as_ref()
    }

    pub(crate) fn chosen_default_handler(&self) -> Option<&ChosenDefaultHandler> {
        self.chosen_default.as_ref()
    }

    pub(crate) fn callback_default_handler(&self) -> Option<&CallbackDefaultHandler> {
        self.callback_default.as_ref()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands.len())
            .field("media", &self.media.len())
            .field("inline", &self.inline.len())
            .field("chosen", &self.chosen.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_command() -> impl Fn(Chat, PatternMatch) -> futures::future::Ready<HandlerResult> {
        |_chat, _m| futures::future::ready(Ok(()))
    }

    #[test]
    fn first_registered_command_wins() {
        let mut registry = Registry::new();
        registry.command(r"/e(.+)", noop_command()).unwrap();
        registry.command(r"/echo (.+)", noop_command()).unwrap();

        // Both patterns match; the first registration must be selected.
        let (_, m) = registry.find_command("/echo foo").unwrap();
        assert_eq!(m.group(1), Some("cho foo"));
    }

    #[test]
    fn no_match_yields_none() {
        let mut registry = Registry::new();
        registry.command(r"/echo (.+)", noop_command()).unwrap();
        assert!(registry.find_command("plain text").is_none());
    }

    #[test]
    fn invalid_pattern_is_rejected_at_registration() {
        let mut registry = Registry::new();
        let err = registry.command(r"(oops", noop_command()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }

    #[test]
    fn media_lookup_matches_kind_names() {
        let mut registry = Registry::new();
        registry
            .handle(r"photo|video", |_chat, _value| async { Ok(()) })
            .unwrap();

        assert!(registry.find_media("photo").is_some());
        assert!(registry.find_media("video").is_some());
        assert!(registry.find_media("audio").is_none());
    }

    #[test]
    fn later_default_replaces_earlier() {
        let mut registry = Registry::new();
        registry.default(|_chat, _msg| async { Ok(()) });
        registry.default(|_chat, _msg| async { Ok(()) });
        assert!(registry.message_default().is_some());
    }
}
