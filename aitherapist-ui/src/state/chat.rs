//! Chat Store
//!
//! Reactive wrapper around the chat state machine. Page events call into
//! the store; the effects each transition returns are applied here with
//! DOM calls and `gloo-timers` timeouts.

use std::rc::Rc;

use aitherapist::api::ChatApi;
use aitherapist::chat::{
    reconcile_backdrops, ChatState, ConversationAction, Effect, KeyCommand, KeyPress, SendStart,
};
use aitherapist::config::ChatConfig;
use gloo_timers::callback::Timeout;
use leptos::*;

use super::dom::{self, DomOverlayHost};
use crate::api::GlooChatApi;

#[derive(Clone)]
pub struct ChatStore {
    pub state: RwSignal<ChatState>,
    pub input_ref: NodeRef<html::Textarea>,
    pub messages_ref: NodeRef<html::Div>,
    api: Rc<GlooChatApi>,
}

/// Create the chat store and provide it to the component tree
pub fn provide_chat_store(
    api: GlooChatApi,
    config: ChatConfig,
    conversation_id: Option<String>,
) -> ChatStore {
    let store = ChatStore {
        state: create_rw_signal(ChatState::new(config, conversation_id)),
        input_ref: create_node_ref(),
        messages_ref: create_node_ref(),
        api: Rc::new(api),
    };
    provide_context(store.clone());
    store
}

pub fn use_chat_store() -> ChatStore {
    use_context::<ChatStore>().expect("ChatStore not found")
}

impl ChatStore {
    fn transition<T>(&self, f: impl FnOnce(&mut ChatState) -> T) -> Option<T> {
        self.state.try_update(f)
    }

    pub fn input(&self, text: String) {
        let effects = self.transition(|s| s.input_changed(text)).unwrap_or_default();
        self.run(effects);
    }

    pub fn submit(&self) {
        match self.transition(|s| s.begin_send()) {
            Some(SendStart::Started { request, effects }) => {
                self.run(effects);

                let store = self.clone();
                spawn_local(async move {
                    let outcome = store.api.send_message(&request).await;
                    let effects = store
                        .transition(|s| s.finish_send(outcome))
                        .unwrap_or_default();
                    store.run(effects);
                });
            }
            Some(SendStart::Rejected(effects)) => self.run(effects),
            Some(SendStart::Busy) | None => {}
        }
    }

    /// Handle a key press anywhere on the page. Returns true when the
    /// browser default should be suppressed.
    pub fn key_down(&self, press: KeyPress) -> bool {
        let Some((command, effects)) = self.transition(|s| s.key_down(&press)) else {
            return false;
        };
        self.run(effects);

        match command {
            KeyCommand::Submit => {
                self.submit();
                true
            }
            KeyCommand::FocusInput => true,
            KeyCommand::ClearInput | KeyCommand::None => false,
        }
    }

    /// Focus the input and show the latest message once the page is up
    pub fn mounted(&self) {
        let after = self.state.with_untracked(|s| s.config().scroll_debounce());
        self.run(vec![Effect::FocusInput, Effect::ScrollToEnd { after }]);
    }

    pub fn visibility_changed(&self, visible: bool) {
        let effects = self.state.with_untracked(|s| s.visibility_changed(visible));
        self.run(effects);
    }

    pub fn window_resized(&self) {
        let effects = self.state.with_untracked(|s| s.window_resized());
        self.run(effects);
    }

    pub fn open_coping(&self, kind: Option<String>) {
        let Some((request, effects)) = self.transition(|s| s.open_coping_modal(kind.as_deref()))
        else {
            return;
        };
        self.run(effects);

        let store = self.clone();
        spawn_local(async move {
            let result = store.api.coping_strategy(&request.kind).await;
            store.transition(|s| s.finish_coping(&request, result));
        });
    }

    pub fn close_coping(&self) {
        let effects = self.transition(|s| s.close_coping_modal()).unwrap_or_default();
        self.run(effects);
    }

    pub fn conversation_action(&self, action: ConversationAction) {
        if !self.state.with_untracked(|s| s.can_change_conversation()) {
            return;
        }
        if !dom::confirm(action.prompt()) {
            return;
        }

        let store = self.clone();
        spawn_local(async move {
            let outcome = match action {
                ConversationAction::NewChat => store.api.new_conversation().await,
                ConversationAction::ClearChat => {
                    let id = store
                        .state
                        .with_untracked(|s| s.conversation_id().map(str::to_string));
                    store.api.clear_conversation(id.as_deref()).await
                }
            };
            let effects = store
                .transition(|s| s.finish_conversation_action(action, outcome))
                .unwrap_or_default();
            store.run(effects);
        });
    }

    pub fn dismiss(&self, id: aitherapist::notify::NotificationId) {
        self.transition(|s| s.dismiss_notification(id));
    }

    /// Whether the message input has focus
    pub fn input_focused(&self) -> bool {
        self.input_ref
            .get_untracked()
            .map(|el| {
                let el: &web_sys::Element = &el;
                dom::is_focused(el)
            })
            .unwrap_or(false)
    }

    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FocusInput => {
                    if let Some(el) = self.input_ref.get_untracked() {
                        dom::focus(&el);
                    }
                }
                Effect::ResizeInput { height_px } => {
                    if let Some(el) = self.input_ref.get_untracked() {
                        dom::set_height(&el, height_px);
                    }
                }
                Effect::ScrollToEnd { after } => {
                    let messages_ref = self.messages_ref;
                    Timeout::new(millis(after), move || {
                        if let Some(el) = messages_ref.get_untracked() {
                            dom::scroll_to_end(&el);
                        }
                    })
                    .forget();
                }
                Effect::ScheduleDismiss { id, after } => {
                    let store = self.clone();
                    Timeout::new(millis(after), move || store.dismiss(id)).forget();
                }
                Effect::ClearSendFlash { after } => {
                    let state = self.state;
                    Timeout::new(millis(after), move || {
                        state.update(|s| s.clear_send_flash());
                    })
                    .forget();
                }
                Effect::ReconcileOverlays { after } => {
                    Timeout::new(millis(after), || {
                        reconcile_backdrops(&mut DomOverlayHost::from_document());
                    })
                    .forget();
                }
                Effect::Navigate(url) => dom::navigate(&url),
            }
        }
    }
}

fn millis(after: std::time::Duration) -> u32 {
    after.as_millis().min(u32::MAX as u128) as u32
}
