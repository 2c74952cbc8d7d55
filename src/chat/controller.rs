//! Chat Controller
//!
//! Async driver that pairs a [`ChatState`] with a [`ChatApi`]. Each
//! operation suspends at exactly one await point (the network call); all
//! state changes happen synchronously around it.

use super::input::{KeyCommand, KeyPress};
use super::state::{ChatState, ConversationAction, Effect, SendStart};
use crate::api::ChatApi;
use crate::config::ChatConfig;

/// Confirmation gate for destructive actions
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

pub struct ChatController<A> {
    api: A,
    state: ChatState,
}

impl<A: ChatApi> ChatController<A> {
    pub fn new(api: A, config: ChatConfig, conversation_id: Option<String>) -> Self {
        Self {
            api,
            state: ChatState::new(config, conversation_id),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ChatState {
        &mut self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the input text
    pub fn input(&mut self, text: impl Into<String>) -> Vec<Effect> {
        self.state.input_changed(text)
    }

    /// Submit the current input
    pub async fn submit(&mut self) -> Vec<Effect> {
        match self.state.begin_send() {
            SendStart::Started {
                request,
                mut effects,
            } => {
                let outcome = self.api.send_message(&request).await;
                effects.extend(self.state.finish_send(outcome));
                effects
            }
            SendStart::Rejected(effects) => effects,
            SendStart::Busy => Vec::new(),
        }
    }

    /// Handle a key press, submitting on Enter
    pub async fn key_down(&mut self, press: &KeyPress) -> Vec<Effect> {
        let (command, mut effects) = self.state.key_down(press);
        if command == KeyCommand::Submit {
            effects.extend(self.submit().await);
        }
        effects
    }

    /// Open the coping modal and fill it
    pub async fn show_coping_strategy(&mut self, kind: Option<&str>) -> Vec<Effect> {
        let (request, effects) = self.state.open_coping_modal(kind);
        let result = self.api.coping_strategy(&request.kind).await;
        self.state.finish_coping(&request, result);
        effects
    }

    /// Start a fresh conversation if the user confirms
    pub async fn new_chat(&mut self, confirm: &dyn Confirm) -> Vec<Effect> {
        let action = ConversationAction::NewChat;
        if !self.state.can_change_conversation() || !confirm.confirm(action.prompt()) {
            return Vec::new();
        }

        let outcome = self.api.new_conversation().await;
        self.state.finish_conversation_action(action, outcome)
    }

    /// Delete the current conversation if the user confirms
    pub async fn clear_chat(&mut self, confirm: &dyn Confirm) -> Vec<Effect> {
        let action = ConversationAction::ClearChat;
        if !self.state.can_change_conversation() || !confirm.confirm(action.prompt()) {
            return Vec::new();
        }

        let conversation_id = self.state.conversation_id().map(str::to_string);
        let outcome = self.api.clear_conversation(conversation_id.as_deref()).await;
        self.state.finish_conversation_action(action, outcome)
    }
}
