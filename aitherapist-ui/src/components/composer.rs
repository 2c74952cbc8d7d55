//! Composer Component
//!
//! Message input, send button and the chat actions.

use aitherapist::chat::{ChatPhase, ConversationAction};
use leptos::*;

use crate::state::use_chat_store;

/// Strategy categories offered in the coping menu
const STRATEGY_TYPES: [(&str, &str); 4] = [
    ("general", "General wellbeing"),
    ("stress", "Stress"),
    ("anxiety", "Anxiety"),
    ("sadness", "Sadness"),
];

/// Message form
#[component]
pub fn Composer() -> impl IntoView {
    let store = use_chat_store();
    let state = store.state;

    let text = move || state.with(|s| s.input().text.clone());
    let disabled = move || state.with(|s| s.input().disabled);
    let submitting = move || state.with(|s| s.phase() == ChatPhase::Submitting);
    let button_class = move || {
        if state.with(|s| s.send_flash()) {
            "btn btn-success"
        } else {
            "btn btn-primary"
        }
    };

    let on_input = {
        let store = store.clone();
        move |ev: ev::Event| store.input(event_target_value(&ev))
    };

    let on_submit = {
        let store = store.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            store.submit();
        }
    };

    view! {
        <form id="chatForm" class="d-flex gap-2 align-items-end" on:submit=on_submit>
            <textarea
                id="messageInput"
                class="form-control"
                rows="1"
                placeholder="Share what's on your mind..."
                node_ref=store.input_ref
                prop:value=text
                prop:disabled=disabled
                on:input=on_input
            ></textarea>

            <button type="submit" id="sendButton" class=button_class prop:disabled=disabled>
                {move || if submitting() {
                    view! { <span class="spinner-border spinner-border-sm"></span> }.into_view()
                } else {
                    view! { <i class="bi bi-send"></i> }.into_view()
                }}
            </button>
        </form>
    }
}

/// Coping menu plus new/clear chat buttons
#[component]
pub fn ChatActions() -> impl IntoView {
    let store = use_chat_store();

    let strategy_buttons = STRATEGY_TYPES
        .iter()
        .map(|(kind, label)| {
            let store = store.clone();
            let kind = kind.to_string();
            view! {
                <button
                    type="button"
                    class="btn btn-outline-success btn-sm"
                    on:click=move |_| store.open_coping(Some(kind.clone()))
                >
                    <i class="bi bi-lightbulb me-1"></i>
                    {*label}
                </button>
            }
        })
        .collect_view();

    let new_chat = {
        let store = store.clone();
        move |_: ev::MouseEvent| store.conversation_action(ConversationAction::NewChat)
    };
    let busy = {
        let state = store.state;
        move || state.with(|s| s.submitting())
    };
    let clear_chat = move |_: ev::MouseEvent| store.conversation_action(ConversationAction::ClearChat);

    view! {
        <div class="d-flex flex-wrap gap-2 mb-3">
            {strategy_buttons}
            <div class="ms-auto d-flex gap-2">
                <button
                    type="button"
                    class="btn btn-outline-primary btn-sm"
                    prop:disabled=busy
                    on:click=new_chat
                >
                    <i class="bi bi-plus-circle me-1"></i>
                    "New Chat"
                </button>
                <button
                    type="button"
                    class="btn btn-outline-danger btn-sm"
                    prop:disabled=busy
                    on:click=clear_chat
                >
                    <i class="bi bi-trash me-1"></i>
                    "Clear Chat"
                </button>
            </div>
        </div>
    }
}
