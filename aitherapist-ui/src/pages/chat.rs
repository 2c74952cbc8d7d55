//! Chat Page
//!
//! Transcript, composer and coping modal for one conversation. The
//! conversation to continue comes from the `conversation` query parameter.

use aitherapist::chat::KeyPress;
use leptos::*;
use leptos_router::use_query_map;

use crate::api::GlooChatApi;
use crate::components::{ChatActions, Composer, CopingModal, MessageBubble, Toast, TypingIndicator};
use crate::state::{provide_chat_store, PageContext};

#[component]
pub fn ChatPage() -> impl IntoView {
    let page = use_context::<PageContext>().expect("PageContext not found");
    let conversation_id = use_query_map()
        .with_untracked(|q| q.get("conversation").cloned())
        .filter(|id| !id.is_empty());

    let store = provide_chat_store(
        GlooChatApi::new(page.server.clone()),
        page.chat.clone(),
        conversation_id,
    );
    let state = store.state;

    // Page-wide listeners
    let keys = store.clone();
    let key_handle = window_event_listener(ev::keydown, move |ev| {
        let press = KeyPress {
            key: ev.key(),
            shift: ev.shift_key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            in_input: keys.input_focused(),
        };
        if keys.key_down(press) {
            ev.prevent_default();
        }
    });

    let resized = store.clone();
    let resize_handle = window_event_listener(ev::resize, move |_| resized.window_resized());

    let visibility = store.clone();
    let visibility_handle = window_event_listener_untyped("visibilitychange", move |_| {
        visibility.visibility_changed(!document().hidden());
    });

    on_cleanup(move || {
        key_handle.remove();
        resize_handle.remove();
        visibility_handle.remove();
    });

    let mounted = store.clone();
    request_animation_frame(move || mounted.mounted());

    let dismiss = store.clone();

    view! {
        <div class="container py-4">
            <div class="card shadow-sm chat-card">
                <div class="card-header bg-white d-flex align-items-center gap-2">
                    <i class="bi bi-robot text-success fs-4"></i>
                    <div>
                        <h5 class="mb-0">"AI Therapist"</h5>
                        <small class="text-muted">"A safe space to talk about how you feel"</small>
                    </div>
                </div>

                <div
                    id="chatMessages"
                    class="card-body chat-messages overflow-auto"
                    style="height: 60vh;"
                    node_ref=store.messages_ref
                >
                    <For
                        each=move || state.with(|s| s.transcript().messages().to_vec())
                        key=|m| m.id
                        children=|m| view! { <MessageBubble message=m /> }
                    />
                    <TypingIndicator visible=Signal::derive(move || state.with(|s| s.typing_visible())) />
                </div>

                <div class="card-footer bg-white">
                    <ChatActions />
                    <Composer />
                    <small class="text-muted d-block mt-2">
                        "Enter to send, Shift+Enter for a new line, Ctrl+/ to focus, Esc to clear"
                    </small>
                </div>
            </div>

            <CopingModal />
            <Toast
                notifications=Signal::derive(move || state.with(|s| s.notifications().active().to_vec()))
                on_dismiss=Callback::new(move |id| dismiss.dismiss(id))
            />
        </div>
    }
}
