//! Chat page state machine
//!
//! `ChatState` holds everything the chat page shows and moves between
//! [`ChatPhase`]s in response to page events. Transitions are synchronous
//! and return the side effects the page has to perform (focus, scrolling,
//! timers, navigation) as [`Effect`] values, so the whole lifecycle can be
//! driven and inspected without a rendering surface.
//!
//! A send is split in two: [`ChatState::begin_send`] runs before the
//! network call (validation, optimistic append, form lock) and
//! [`ChatState::finish_send`] runs with its outcome.

use std::time::Duration;

use super::input::{autosize_height, classify_key, InputBox, KeyCommand, KeyPress};
use super::message::{local_timestamp, Sentiment};
use super::modal::{CopingModal, CopingRequest};
use super::transcript::Transcript;
use crate::api::{ApiError, ApiResult, ConversationResponse, CopingStrategy, SendMessageRequest, SendMessageResponse};
use crate::config::ChatConfig;
use crate::notify::{NotificationId, NotificationKind, Notifications};

pub const EMPTY_MESSAGE_ERROR: &str = "Please enter a message";
pub const SEND_FAILED_ERROR: &str =
    "Sorry, there was an error sending your message. Please try again.";
pub const CHAT_CLEARED: &str = "Chat cleared successfully!";
pub const LOCAL_RESET_NOTICE: &str =
    "We couldn't reach the server, so the chat was only reset on this device.";

pub const NEW_CHAT_PROMPT: &str =
    "Start a new chat? The current conversation will be closed.";
pub const CLEAR_CHAT_PROMPT: &str =
    "Are you sure you want to clear this chat session? This cannot be undone.";

/// Lifecycle of the composition form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Composing,
    /// A send is in flight; input and submit control are disabled
    Submitting,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FocusInput,
    ResizeInput { height_px: u32 },
    /// Scroll the transcript to its end once layout has settled
    ScrollToEnd { after: Duration },
    /// Call [`ChatState::dismiss_notification`] after the delay
    ScheduleDismiss { id: NotificationId, after: Duration },
    /// Call [`ChatState::clear_send_flash`] after the delay
    ClearSendFlash { after: Duration },
    /// Run backdrop reconciliation after the delay
    ReconcileOverlays { after: Duration },
    Navigate(String),
}

/// Result of trying to start a send
#[derive(Debug, Clone, PartialEq)]
pub enum SendStart {
    /// The request to post; the user message is already in the transcript
    Started {
        request: SendMessageRequest,
        effects: Vec<Effect>,
    },
    /// Empty input; nothing was sent
    Rejected(Vec<Effect>),
    /// A send is already in flight
    Busy,
}

/// Destructive, confirmation-gated conversation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    NewChat,
    ClearChat,
}

impl ConversationAction {
    pub fn prompt(self) -> &'static str {
        match self {
            ConversationAction::NewChat => NEW_CHAT_PROMPT,
            ConversationAction::ClearChat => CLEAR_CHAT_PROMPT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatState {
    config: ChatConfig,
    phase: ChatPhase,
    input: InputBox,
    transcript: Transcript,
    conversation_id: Option<String>,
    typing: bool,
    send_flash: bool,
    notifications: Notifications,
    modal: CopingModal,
    /// The in-flight reply belongs to a conversation that was reset
    discard_reply: bool,
}

impl ChatState {
    /// Create the page state. `conversation_id` is the thread the page was
    /// opened on, if any.
    pub fn new(config: ChatConfig, conversation_id: Option<String>) -> Self {
        let min_height = autosize_height(
            "",
            config.input_line_height_px,
            config.input_padding_px,
            config.max_input_height_px,
        );

        Self {
            transcript: Transcript::new(config.welcome_message.clone()),
            input: InputBox::new(min_height),
            conversation_id: conversation_id.filter(|id| !id.is_empty()),
            phase: ChatPhase::Idle,
            typing: false,
            send_flash: false,
            notifications: Notifications::new(),
            modal: CopingModal::default(),
            discard_reply: false,
            config,
        }
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// Whether a send is in flight
    pub fn submitting(&self) -> bool {
        self.phase == ChatPhase::Submitting
    }

    pub fn input(&self) -> &InputBox {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Whether the counterpart's typing indicator is shown
    pub fn typing_visible(&self) -> bool {
        self.typing
    }

    /// Whether the submit control is flagged as having just succeeded
    pub fn send_flash(&self) -> bool {
        self.send_flash
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn modal(&self) -> &CopingModal {
        &self.modal
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    // ============ Composition ============

    /// The input text changed
    pub fn input_changed(&mut self, text: impl Into<String>) -> Vec<Effect> {
        if self.input.disabled {
            return Vec::new();
        }

        self.input.text = text.into();
        if self.phase == ChatPhase::Idle {
            self.phase = ChatPhase::Composing;
        }
        vec![self.resize_input()]
    }

    fn resize_input(&mut self) -> Effect {
        self.input.height_px = autosize_height(
            &self.input.text,
            self.config.input_line_height_px,
            self.config.input_padding_px,
            self.config.max_input_height_px,
        );
        Effect::ResizeInput {
            height_px: self.input.height_px,
        }
    }

    fn scroll(&self) -> Effect {
        Effect::ScrollToEnd {
            after: self.config.scroll_debounce(),
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: &str) -> Effect {
        let after = match kind {
            NotificationKind::Error => self.config.error_dismiss(),
            NotificationKind::Success | NotificationKind::Info => self.config.success_dismiss(),
        };
        let notification = self.notifications.push(kind, message, after);
        Effect::ScheduleDismiss {
            id: notification.id,
            after,
        }
    }

    // ============ Sending ============

    /// Start a send using the local clock for the user message timestamp
    pub fn begin_send(&mut self) -> SendStart {
        self.begin_send_at(local_timestamp())
    }

    pub fn begin_send_at(&mut self, timestamp: impl Into<String>) -> SendStart {
        if self.phase == ChatPhase::Submitting {
            return SendStart::Busy;
        }

        let message = self.input.trimmed().to_string();
        if message.is_empty() {
            self.phase = ChatPhase::Composing;
            let effect = self.notify(NotificationKind::Error, EMPTY_MESSAGE_ERROR);
            return SendStart::Rejected(vec![effect]);
        }

        self.phase = ChatPhase::Submitting;
        self.input.disabled = true;
        self.send_flash = false;
        self.transcript.push_user(message.clone(), timestamp);

        self.input.text.clear();
        let resize = self.resize_input();

        self.typing = true;

        SendStart::Started {
            request: SendMessageRequest {
                message,
                conversation_id: self.conversation_id.clone(),
            },
            effects: vec![resize, self.scroll()],
        }
    }

    /// Apply the outcome of the in-flight send
    pub fn finish_send(&mut self, outcome: ApiResult<SendMessageResponse>) -> Vec<Effect> {
        self.typing = false;
        let mut effects = Vec::new();

        if std::mem::take(&mut self.discard_reply) {
            tracing::debug!("Dropping reply for a conversation that was reset");
            self.phase = ChatPhase::Idle;
            self.input.disabled = false;
            effects.push(Effect::FocusInput);
            return effects;
        }

        match accept_reply(outcome) {
            Ok(reply) => {
                let sentiment = reply
                    .sentiment
                    .as_deref()
                    .map(Sentiment::parse)
                    .unwrap_or_default();
                let timestamp = reply
                    .timestamp
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(local_timestamp);

                self.transcript.push_ai(reply.text, timestamp, sentiment);

                if let Some(id) = reply.conversation_id.filter(|id| !id.is_empty()) {
                    if self.conversation_id.as_deref() != Some(id.as_str()) {
                        tracing::debug!(conversation_id = %id, "Conversation reference updated");
                    }
                    self.conversation_id = Some(id);
                }

                self.send_flash = true;
                effects.push(Effect::ClearSendFlash {
                    after: self.config.send_flash(),
                });
                effects.push(self.scroll());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error sending message");
                effects.push(self.notify(NotificationKind::Error, SEND_FAILED_ERROR));
            }
        }

        self.phase = ChatPhase::Idle;
        self.input.disabled = false;
        effects.push(Effect::FocusInput);
        effects
    }

    pub fn clear_send_flash(&mut self) {
        self.send_flash = false;
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) {
        self.notifications.dismiss(id);
    }

    // ============ Keyboard & page events ============

    /// Handle a key press. When the returned command is
    /// [`KeyCommand::Submit`] the caller starts a send.
    pub fn key_down(&mut self, press: &KeyPress) -> (KeyCommand, Vec<Effect>) {
        let command = classify_key(press);
        let effects = match command {
            KeyCommand::FocusInput => vec![Effect::FocusInput],
            KeyCommand::ClearInput if !self.input.disabled => {
                self.input.text.clear();
                if self.phase == ChatPhase::Composing {
                    self.phase = ChatPhase::Idle;
                }
                vec![self.resize_input()]
            }
            _ => Vec::new(),
        };
        (command, effects)
    }

    /// The tab was hidden or shown again
    pub fn visibility_changed(&self, visible: bool) -> Vec<Effect> {
        if visible {
            vec![Effect::FocusInput]
        } else {
            Vec::new()
        }
    }

    pub fn window_resized(&self) -> Vec<Effect> {
        vec![self.scroll()]
    }

    // ============ Coping strategy ============

    /// Show the modal in its loading state; returns the category to fetch
    pub fn open_coping_modal(&mut self, kind: Option<&str>) -> (CopingRequest, Vec<Effect>) {
        let request = self.modal.open(kind);
        let effects = vec![Effect::ReconcileOverlays {
            after: self.config.overlay_reconcile(),
        }];
        (request, effects)
    }

    /// Fill the modal with the outcome of `request`, unless a newer one
    /// replaced it or the modal was closed
    pub fn finish_coping(&mut self, request: &CopingRequest, result: ApiResult<CopingStrategy>) {
        self.modal.finish(request.ticket, result);
    }

    pub fn close_coping_modal(&mut self) -> Vec<Effect> {
        self.modal.close();
        vec![Effect::ReconcileOverlays {
            after: self.config.overlay_reconcile(),
        }]
    }

    // ============ New / clear chat ============

    /// Whether new/clear chat may start. Refused while a send is in flight.
    pub fn can_change_conversation(&self) -> bool {
        !self.submitting()
    }

    /// Apply the server's answer to a confirmed new/clear request.
    ///
    /// Any failure (transport, status, `success: false`) falls back to a
    /// local-only reset and tells the user so.
    pub fn finish_conversation_action(
        &mut self,
        action: ConversationAction,
        outcome: ApiResult<ConversationResponse>,
    ) -> Vec<Effect> {
        let outcome = outcome.and_then(|resp| {
            if resp.success {
                Ok(resp)
            } else {
                Err(ApiError::Rejected(
                    resp.error.unwrap_or_else(|| "Request failed".to_string()),
                ))
            }
        });

        match outcome {
            Ok(resp) => {
                let mut effects = self.reset_local();
                match resp.redirect_url.filter(|url| !url.is_empty()) {
                    Some(url) => effects.push(Effect::Navigate(url)),
                    None if action == ConversationAction::ClearChat => {
                        effects.push(self.notify(NotificationKind::Success, CHAT_CLEARED));
                    }
                    None => {}
                }
                effects
            }
            Err(e) => {
                tracing::warn!(?action, error = %e, "Conversation request failed; resetting locally");
                let mut effects = self.reset_local();
                effects.push(self.notify(NotificationKind::Info, LOCAL_RESET_NOTICE));
                effects
            }
        }
    }

    /// Clear the transcript (keeping the welcome entry) and forget the
    /// conversation reference.
    ///
    /// A send still in flight keeps the form locked until its outcome
    /// arrives; that outcome is then dropped.
    pub fn reset_local(&mut self) -> Vec<Effect> {
        self.transcript.reset_to_welcome();
        self.conversation_id = None;
        self.typing = false;
        self.input.text.clear();

        if self.submitting() {
            self.discard_reply = true;
        } else {
            self.phase = ChatPhase::Idle;
            self.input.disabled = false;
        }
        vec![self.resize_input(), Effect::FocusInput]
    }
}

/// A reply the transcript can show
struct Reply {
    text: String,
    sentiment: Option<String>,
    timestamp: Option<String>,
    conversation_id: Option<String>,
}

/// Only `success: true` with a reply text counts as success
fn accept_reply(outcome: ApiResult<SendMessageResponse>) -> ApiResult<Reply> {
    let resp = outcome?;
    if !resp.success {
        return Err(ApiError::Rejected(
            resp.error.unwrap_or_else(|| "Failed to send message".to_string()),
        ));
    }

    match resp.ai_response {
        Some(text) => Ok(Reply {
            text,
            sentiment: resp.sentiment,
            timestamp: resp.timestamp,
            conversation_id: resp.conversation_id,
        }),
        None => Err(ApiError::Decode("missing ai_response".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Sender;
    use crate::notify::NotificationKind;

    fn state() -> ChatState {
        ChatState::new(ChatConfig::default(), None)
    }

    fn started(start: SendStart) -> (SendMessageRequest, Vec<Effect>) {
        match start {
            SendStart::Started { request, effects } => (request, effects),
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[test]
    fn test_input_moves_idle_to_composing() {
        let mut chat = state();
        assert_eq!(chat.phase(), ChatPhase::Idle);
        let effects = chat.input_changed("Hel");
        assert_eq!(chat.phase(), ChatPhase::Composing);
        assert!(matches!(effects[0], Effect::ResizeInput { .. }));
    }

    #[test]
    fn test_whitespace_is_rejected_without_mutation() {
        let mut chat = state();
        chat.input_changed("   \n\t ");

        let start = chat.begin_send_at("10:00 AM");
        let SendStart::Rejected(effects) = start else {
            panic!("expected rejection");
        };

        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.phase(), ChatPhase::Composing);
        assert!(!chat.input().disabled);

        let note = chat.notifications().latest().unwrap();
        assert_eq!(note.message, EMPTY_MESSAGE_ERROR);
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(
            effects,
            vec![Effect::ScheduleDismiss {
                id: note.id,
                after: Duration::from_secs(5)
            }]
        );
    }

    #[test]
    fn test_begin_send_appends_and_locks() {
        let mut chat = state();
        chat.input_changed("  Hello  ");

        let (request, effects) = started(chat.begin_send_at("10:00 AM"));
        assert_eq!(request.message, "Hello");
        assert!(request.conversation_id.is_none());

        assert_eq!(chat.phase(), ChatPhase::Submitting);
        assert!(chat.input().disabled);
        assert!(chat.input().text.is_empty());
        assert!(chat.typing_visible());

        let last = chat.transcript().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "Hello");
        assert!(effects.iter().any(|e| matches!(e, Effect::ScrollToEnd { .. })));
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut chat = state();
        chat.input_changed("one");
        started(chat.begin_send_at("10:00 AM"));

        // Input changes are ignored while disabled
        assert!(chat.input_changed("two").is_empty());
        assert_eq!(chat.begin_send_at("10:00 AM"), SendStart::Busy);
        assert_eq!(chat.transcript().len(), 2);
    }

    #[test]
    fn test_success_appends_reply() {
        let mut chat = state();
        chat.input_changed("Hello");
        started(chat.begin_send_at("09:59 AM"));

        let mut reply = SendMessageResponse::reply("Hi there", "positive", "10:00 AM");
        reply.conversation_id = Some("c-42".to_string());
        let effects = chat.finish_send(Ok(reply));

        let last = chat.transcript().last().unwrap();
        assert_eq!(last.sender, Sender::Ai);
        assert_eq!(last.text, "Hi there");
        assert_eq!(last.timestamp, "10:00 AM");
        assert_eq!(last.sentiment, Some(Sentiment::Positive));

        assert_eq!(chat.conversation_id(), Some("c-42"));
        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert!(!chat.input().disabled);
        assert!(!chat.typing_visible());
        assert!(chat.send_flash());
        assert!(effects.contains(&Effect::FocusInput));
        assert!(effects.contains(&Effect::ClearSendFlash {
            after: Duration::from_millis(500)
        }));

        chat.clear_send_flash();
        assert!(!chat.send_flash());
    }

    #[test]
    fn test_next_request_carries_conversation_id() {
        let mut chat = ChatState::new(ChatConfig::default(), Some("c-1".to_string()));
        chat.input_changed("again");
        let (request, _) = started(chat.begin_send_at("10:00 AM"));
        assert_eq!(request.conversation_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_failures_add_no_reply() {
        let failures = vec![
            Err(ApiError::Network("offline".into())),
            Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            }),
            Ok(SendMessageResponse {
                success: false,
                error: Some("nope".into()),
                ..Default::default()
            }),
            Ok(SendMessageResponse {
                success: true,
                ..Default::default()
            }),
        ];

        for outcome in failures {
            let mut chat = state();
            chat.input_changed("Hello");
            started(chat.begin_send_at("10:00 AM"));

            let effects = chat.finish_send(outcome);
            assert_eq!(chat.transcript().len(), 2);
            assert_eq!(chat.transcript().last().unwrap().sender, Sender::User);
            assert_eq!(
                chat.notifications().latest().map(|n| n.message.as_str()),
                Some(SEND_FAILED_ERROR)
            );
            assert_eq!(chat.phase(), ChatPhase::Idle);
            assert!(!chat.input().disabled);
            assert!(!chat.typing_visible());
            assert!(effects.contains(&Effect::FocusInput));
            assert!(effects.iter().any(|e| matches!(
                e,
                Effect::ScheduleDismiss { after, .. } if *after == Duration::from_secs(5)
            )));
        }
    }

    #[test]
    fn test_unknown_sentiment_renders_neutral() {
        let mut chat = state();
        chat.input_changed("Hello");
        started(chat.begin_send_at("10:00 AM"));
        chat.finish_send(Ok(SendMessageResponse::reply("ok", "furious", "10:01 AM")));

        assert_eq!(
            chat.transcript().last().unwrap().sentiment,
            Some(Sentiment::Neutral)
        );
    }

    #[test]
    fn test_escape_clears_uncommitted_text() {
        let mut chat = state();
        chat.input_changed("draft\nline");
        let (command, effects) = chat.key_down(&KeyPress::new("Escape").in_input());
        assert_eq!(command, KeyCommand::ClearInput);
        assert!(chat.input().text.is_empty());
        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert_eq!(
            effects,
            vec![Effect::ResizeInput {
                height_px: chat.input().height_px
            }]
        );
    }

    #[test]
    fn test_focus_shortcut_and_visibility() {
        let mut chat = state();
        let (command, effects) = chat.key_down(&KeyPress::new("/").with_ctrl());
        assert_eq!(command, KeyCommand::FocusInput);
        assert_eq!(effects, vec![Effect::FocusInput]);

        assert_eq!(chat.visibility_changed(true), vec![Effect::FocusInput]);
        assert!(chat.visibility_changed(false).is_empty());
    }

    #[test]
    fn test_clear_success_with_redirect_navigates() {
        let mut chat = ChatState::new(ChatConfig::default(), Some("c-1".to_string()));
        chat.input_changed("Hello");
        started(chat.begin_send_at("10:00 AM"));
        chat.finish_send(Ok(SendMessageResponse::reply("Hi", "neutral", "10:00 AM")));

        let effects = chat.finish_conversation_action(
            ConversationAction::ClearChat,
            Ok(ConversationResponse {
                success: true,
                redirect_url: Some("/chat/".to_string()),
                error: None,
            }),
        );

        assert!(effects.contains(&Effect::Navigate("/chat/".to_string())));
        assert_eq!(chat.transcript().len(), 1);
        assert!(chat.conversation_id().is_none());
    }

    #[test]
    fn test_new_chat_failure_resets_locally() {
        let mut chat = ChatState::new(ChatConfig::default(), Some("c-1".to_string()));
        chat.input_changed("Hello");
        started(chat.begin_send_at("10:00 AM"));
        chat.finish_send(Ok(SendMessageResponse::reply("Hi", "neutral", "10:00 AM")));
        assert_eq!(chat.transcript().len(), 3);

        let effects = chat.finish_conversation_action(
            ConversationAction::NewChat,
            Err(ApiError::Network("offline".into())),
        );

        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript().welcome().text, ChatConfig::default().welcome_message);
        assert!(chat.conversation_id().is_none());
        assert!(effects.contains(&Effect::FocusInput));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Navigate(_))));
        assert_eq!(
            chat.notifications().latest().map(|n| n.kind),
            Some(NotificationKind::Info)
        );
    }

    #[test]
    fn test_clear_rejected_by_server_resets_locally() {
        let mut chat = state();
        let effects = chat.finish_conversation_action(
            ConversationAction::ClearChat,
            Ok(ConversationResponse::default()),
        );
        assert_eq!(chat.transcript().len(), 1);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Navigate(_))));
    }

    #[test]
    fn test_clear_during_send_drops_the_stale_reply() {
        let mut chat = ChatState::new(ChatConfig::default(), Some("old".to_string()));
        chat.input_changed("first");
        started(chat.begin_send_at("10:00 AM"));
        assert!(!chat.can_change_conversation());

        chat.finish_conversation_action(
            ConversationAction::ClearChat,
            Ok(ConversationResponse {
                success: true,
                ..Default::default()
            }),
        );

        // Still one request outstanding
        assert_eq!(chat.transcript().len(), 1);
        assert!(chat.conversation_id().is_none());
        assert_eq!(chat.phase(), ChatPhase::Submitting);
        assert!(chat.input().disabled);
        assert!(chat.input_changed("second").is_empty());
        assert_eq!(chat.begin_send_at("10:01 AM"), SendStart::Busy);

        let mut reply = SendMessageResponse::reply("stale reply", "neutral", "10:01 AM");
        reply.conversation_id = Some("old".to_string());
        let effects = chat.finish_send(Ok(reply));

        assert_eq!(chat.transcript().len(), 1);
        assert!(chat.conversation_id().is_none());
        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert!(!chat.input().disabled);
        assert!(chat.can_change_conversation());
        assert!(effects.contains(&Effect::FocusInput));

        // The next send goes through normally
        chat.input_changed("second");
        started(chat.begin_send_at("10:02 AM"));
        chat.finish_send(Ok(SendMessageResponse::reply("fresh", "positive", "10:02 AM")));
        assert_eq!(chat.transcript().len(), 3);
        assert_eq!(chat.transcript().last().unwrap().text, "fresh");
    }

    #[test]
    fn test_coping_modal_requests_reconciliation() {
        let mut chat = state();
        let (request, effects) = chat.open_coping_modal(None);
        assert_eq!(request.kind, "general");
        assert!(chat.modal().visible);
        assert!(chat.modal().is_loading());
        assert_eq!(
            effects,
            vec![Effect::ReconcileOverlays {
                after: Duration::from_millis(50)
            }]
        );

        chat.finish_coping(&request, Err(ApiError::Network("offline".into())));
        assert!(!chat.modal().is_loading());

        chat.close_coping_modal();
        assert!(!chat.modal().visible);
    }
}
