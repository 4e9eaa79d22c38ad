//! The [`Chat`] context object and its outbound operations.

use serde_json::{Value, json};

use tgkit_core::api::ApiResponse;
use tgkit_core::error::ApiResult;
use tgkit_core::model::{ChatId, Message, User};
use tgkit_core::transport::SharedSender;

/// Display wrapper for the sender of a message.
///
/// Formats as `"first_name (username)"` when a username is present, plain
/// `"first_name"` otherwise, and the `"N/A"` sentinel for chats that carry
/// no sender at all (synthetic chats, channel posts).
#[derive(Debug, Clone)]
pub struct Sender(Option<User>);

impl Sender {
    pub(crate) fn new(user: Option<User>) -> Self {
        Self(user)
    }

    /// The raw user payload, when one was attached.
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(user) = &self.0 else {
            return f.write_str("N/A");
        };
        match &user.username {
            Some(username) => write!(f, "{} ({username})", user.first_name),
            None => f.write_str(&user.first_name),
        }
    }
}

/// A conversation handle, passed to most handlers.
///
/// Holds the transport facade plus the message that triggered it (when
/// constructed from one), so reply operations can reference the original
/// message. All outbound operations resolve to the raw response envelope;
/// the caller decides whether to await or fire-and-forget.
#[derive(Clone)]
pub struct Chat {
    api: SharedSender,
    /// Conversation identifier.
    pub id: ChatId,
    /// Conversation kind: `private`, `group`, `supergroup` or `channel`.
    pub kind: String,
    /// The message this chat was derived from, if any.
    pub message: Option<Message>,
    /// The sender of that message.
    pub sender: Sender,
}

impl Chat {
    /// Creates a chat handle from scratch, with no originating message.
    pub fn new(api: SharedSender, id: impl Into<ChatId>, kind: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            kind: kind.into(),
            message: None,
            sender: Sender::new(None),
        }
    }

    /// Derives a chat handle from an inbound message.
    pub fn from_message(api: SharedSender, message: Message) -> Self {
        Self {
            api,
            id: message.chat.id.clone(),
            kind: message.chat.kind.clone(),
            sender: Sender::new(message.from.clone()),
            message: Some(message),
        }
    }

    /// Whether this chat is a group or supergroup.
    pub fn is_group(&self) -> bool {
        self.kind == "group" || self.kind == "supergroup"
    }

    async fn call(&self, method: &str, params: Value) -> ApiResult<ApiResponse> {
        self.api.call(method, params).await
    }

    /// Sends a text message to the chat.
    pub async fn send_text(&self, text: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendMessage",
            json!({"chat_id": self.id, "text": text}),
        )
        .await
    }

    /// Replies to the message this chat was derived from.
    ///
    /// # Panics
    ///
    /// Panics if the chat was not constructed from a message; calling
    /// `reply` on a synthetic chat is a programming error.
    pub async fn reply(&self, text: &str) -> ApiResult<ApiResponse> {
        self.reply_with(text, None, None).await
    }

    /// [`reply`](Self::reply) with optional reply markup and parse mode.
    ///
    /// # Panics
    ///
    /// Panics if the chat was not constructed from a message.
    pub async fn reply_with(
        &self,
        text: &str,
        markup: Option<Value>,
        parse_mode: Option<&str>,
    ) -> ApiResult<ApiResponse> {
        let Some(message) = &self.message else {
            panic!("reply() requires a Chat constructed from a message");
        };

        let mut params = json!({
            "chat_id": self.id,
            "text": text,
            "reply_to_message_id": message.message_id,
            "disable_web_page_preview": true,
        });
        if let Some(mode) = parse_mode {
            params["parse_mode"] = json!(mode);
        }
        if let Some(markup) = markup {
            params["reply_markup"] = markup;
        }
        self.call("sendMessage", params).await
    }

    /// Edits the text of a previously sent message in this chat.
    pub async fn edit_text(&self, message_id: i64, text: &str) -> ApiResult<ApiResponse> {
        self.call(
            "editMessageText",
            json!({"chat_id": self.id, "message_id": message_id, "text": text}),
        )
        .await
    }

    /// Replaces only the reply markup of a message in this chat.
    ///
    /// The markup is serialized to a JSON string parameter, as the API
    /// expects.
    pub async fn edit_reply_markup(
        &self,
        message_id: i64,
        markup: &Value,
    ) -> ApiResult<ApiResponse> {
        let params = json!({
            "chat_id": self.id,
            "message_id": message_id,
            "reply_markup": serde_json::to_string(markup)?,
        });
        self.call("editMessageReplyMarkup", params).await
    }

    /// Sends a sticker. `sticker` is a file id or URL; uploading raw bytes
    /// is a transport concern.
    pub async fn send_sticker(&self, sticker: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendSticker",
            json!({"chat_id": self.id, "sticker": sticker}),
        )
        .await
    }

    /// Sends an audio file.
    pub async fn send_audio(&self, audio: &str) -> ApiResult<ApiResponse> {
        self.call("sendAudio", json!({"chat_id": self.id, "audio": audio}))
            .await
    }

    /// Sends a photo with an optional caption.
    pub async fn send_photo(&self, photo: &str, caption: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendPhoto",
            json!({"chat_id": self.id, "photo": photo, "caption": caption}),
        )
        .await
    }

    /// Sends a video with an optional caption.
    pub async fn send_video(&self, video: &str, caption: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendVideo",
            json!({"chat_id": self.id, "video": video, "caption": caption}),
        )
        .await
    }

    /// Sends a general file with an optional caption.
    pub async fn send_document(&self, document: &str, caption: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendDocument",
            json!({"chat_id": self.id, "document": document, "caption": caption}),
        )
        .await
    }

    /// Sends a voice note.
    pub async fn send_voice(&self, voice: &str) -> ApiResult<ApiResponse> {
        self.call("sendVoice", json!({"chat_id": self.id, "voice": voice}))
            .await
    }

    /// Sends a point on the map.
    pub async fn send_location(&self, latitude: f64, longitude: f64) -> ApiResult<ApiResponse> {
        self.call(
            "sendLocation",
            json!({"chat_id": self.id, "latitude": latitude, "longitude": longitude}),
        )
        .await
    }

    /// Sends information about a venue.
    pub async fn send_venue(
        &self,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
    ) -> ApiResult<ApiResponse> {
        self.call(
            "sendVenue",
            json!({
                "chat_id": self.id,
                "latitude": latitude,
                "longitude": longitude,
                "title": title,
                "address": address,
            }),
        )
        .await
    }

    /// Sends a phone contact.
    pub async fn send_contact(
        &self,
        phone_number: &str,
        first_name: &str,
    ) -> ApiResult<ApiResponse> {
        self.call(
            "sendContact",
            json!({
                "chat_id": self.id,
                "phone_number": phone_number,
                "first_name": first_name,
            }),
        )
        .await
    }

    /// Broadcasts a chat action (`typing`, `upload_photo`, …) so users see
    /// that something is happening on the bot's side.
    pub async fn send_chat_action(&self, action: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendChatAction",
            json!({"chat_id": self.id, "action": action}),
        )
        .await
    }

    /// Sends a group of photos or videos as an album. `media` is the
    /// JSON-serialized media array, 2–10 items.
    pub async fn send_media_group(&self, media: &str) -> ApiResult<ApiResponse> {
        self.call(
            "sendMediaGroup",
            json!({"chat_id": self.id, "media": media}),
        )
        .await
    }

    /// Forwards a message from another chat into this one.
    pub async fn forward_message(
        &self,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> ApiResult<ApiResponse> {
        self.call(
            "forwardMessage",
            json!({
                "chat_id": self.id,
                "from_chat_id": from_chat_id.into(),
                "message_id": message_id,
            }),
        )
        .await
    }

    /// Deletes a message from this chat.
    pub async fn delete_message(&self, message_id: i64) -> ApiResult<ApiResponse> {
        self.call(
            "deleteMessage",
            json!({"chat_id": self.id, "message_id": message_id}),
        )
        .await
    }

    /// Kicks a user from a group or supergroup. Requires admin rights.
    pub async fn kick_chat_member(&self, user_id: i64) -> ApiResult<ApiResponse> {
        self.call(
            "kickChatMember",
            json!({"chat_id": self.id, "user_id": user_id}),
        )
        .await
    }

    /// Unbans a previously kicked user in a supergroup. Requires admin
    /// rights.
    pub async fn unban_chat_member(&self, user_id: i64) -> ApiResult<ApiResponse> {
        self.call(
            "unbanChatMember",
            json!({"chat_id": self.id, "user_id": user_id}),
        )
        .await
    }

    /// Fetches information about the chat.
    pub async fn get_chat(&self) -> ApiResult<ApiResponse> {
        self.call("getChat", json!({"chat_id": self.id})).await
    }

    /// Lists the administrators of the chat. The chat must not be private.
    pub async fn get_chat_administrators(&self) -> ApiResult<ApiResponse> {
        self.call("getChatAdministrators", json!({"chat_id": self.id}))
            .await
    }

    /// Returns the number of members in the chat.
    pub async fn get_chat_members_count(&self) -> ApiResult<ApiResponse> {
        self.call("getChatMembersCount", json!({"chat_id": self.id}))
            .await
    }

    /// Fetches information about one member of the chat.
    pub async fn get_chat_member(&self, user_id: i64) -> ApiResult<ApiResponse> {
        self.call(
            "getChatMember",
            json!({"chat_id": self.id, "user_id": user_id}),
        )
        .await
    }
}

impl std::fmt::Debug for Chat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chat")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("sender", &self.sender.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tgkit_core::mock::RecordingSender;

    fn message_from(user: Value) -> Message {
        serde_json::from_value(json!({
            "message_id": 7,
            "date": 0,
            "chat": {"id": 42, "type": "private"},
            "from": user,
            "text": "Reply!",
        }))
        .unwrap()
    }

    #[test]
    fn sender_display_forms() {
        let john = Sender::new(Some(
            serde_json::from_value(json!({"id": 1, "first_name": "John"})).unwrap(),
        ));
        assert_eq!(john.to_string(), "John");

        let with_username = Sender::new(Some(
            serde_json::from_value(json!({"id": 1, "first_name": "John", "username": "jd"}))
                .unwrap(),
        ));
        assert_eq!(with_username.to_string(), "John (jd)");

        assert_eq!(Sender::new(None).to_string(), "N/A");
    }

    #[tokio::test]
    async fn send_text_issues_one_send_message_call() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api.clone(), 42, "private");

        chat.send_text("hello").await.unwrap();

        assert_eq!(api.call_count(), 1);
        let params = api.params_for("sendMessage").unwrap();
        assert_eq!(params["text"], "hello");
        assert_eq!(params["chat_id"], 42);
    }

    #[tokio::test]
    async fn reply_references_the_originating_message() {
        let api = RecordingSender::shared();
        let msg = message_from(json!({"id": 1, "first_name": "John"}));
        let chat = Chat::from_message(api.clone(), msg);

        chat.reply(&format!("Hi {}", chat.sender)).await.unwrap();

        let params = api.params_for("sendMessage").unwrap();
        assert_eq!(params["text"], "Hi John");
        assert_eq!(params["reply_to_message_id"], 7);
        assert_eq!(params["disable_web_page_preview"], true);
    }

    #[tokio::test]
    #[should_panic(expected = "requires a Chat constructed from a message")]
    async fn reply_without_message_is_a_precondition_violation() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api, 42, "private");
        let _ = chat.reply("hi").await;
    }

    #[tokio::test]
    async fn media_sends_use_their_method_names() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api.clone(), 42, "private");

        chat.send_audio("foo").await.unwrap();
        chat.send_voice("foo").await.unwrap();
        chat.send_photo("foo", "").await.unwrap();
        chat.send_sticker("foo").await.unwrap();
        chat.send_video("foo", "").await.unwrap();
        chat.send_document("foo", "").await.unwrap();
        chat.send_location(13.0, 37.0).await.unwrap();
        chat.send_venue(13.0, 37.0, "foo", "bar").await.unwrap();
        chat.send_contact("+79260000000", "foo").await.unwrap();
        chat.send_chat_action("typing").await.unwrap();
        chat.send_media_group("[]").await.unwrap();
        chat.delete_message(1111).await.unwrap();

        for method in [
            "sendAudio",
            "sendVoice",
            "sendPhoto",
            "sendSticker",
            "sendVideo",
            "sendDocument",
            "sendLocation",
            "sendVenue",
            "sendContact",
            "sendChatAction",
            "sendMediaGroup",
            "deleteMessage",
        ] {
            assert!(api.was_called(method), "missing call to {method}");
        }
    }

    #[tokio::test]
    async fn edit_text_targets_the_message() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api.clone(), 42, "private");

        chat.edit_text(1337, "bye").await.unwrap();

        let params = api.params_for("editMessageText").unwrap();
        assert_eq!(params["text"], "bye");
        assert_eq!(params["message_id"], 1337);
    }

    #[tokio::test]
    async fn edit_reply_markup_serializes_markup_to_a_string() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api.clone(), 42, "private");
        let markup = json!({"inline_keyboard": [[{"text": "ok"}, {"text": "cancel"}]]});

        chat.edit_reply_markup(1337, &markup).await.unwrap();

        let params = api.params_for("editMessageReplyMarkup").unwrap();
        assert_eq!(params["message_id"], 1337);
        let serialized = params["reply_markup"].as_str().unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(serialized).unwrap(),
            markup
        );
    }

    #[tokio::test]
    async fn membership_operations() {
        let api = RecordingSender::shared();
        let chat = Chat::new(api.clone(), 42, "group");

        chat.get_chat().await.unwrap();
        chat.get_chat_administrators().await.unwrap();
        chat.get_chat_members_count().await.unwrap();
        chat.get_chat_member(7).await.unwrap();
        chat.kick_chat_member(7).await.unwrap();
        chat.unban_chat_member(7).await.unwrap();

        assert!(api.was_called("getChat"));
        assert!(api.was_called("getChatAdministrators"));
        assert!(api.was_called("getChatMembersCount"));
        assert_eq!(api.params_for("getChatMember").unwrap()["user_id"], 7);
        assert!(api.was_called("kickChatMember"));
        assert!(api.was_called("unbanChatMember"));
    }

    #[test]
    fn group_detection() {
        let api = RecordingSender::shared();
        assert!(Chat::new(api.clone(), 1, "group").is_group());
        assert!(Chat::new(api.clone(), 1, "supergroup").is_group());
        assert!(!Chat::new(api, 1, "private").is_group());
    }
}
