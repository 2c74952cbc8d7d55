//! Message Components
//!
//! Transcript bubbles and the typing indicator.

use aitherapist::chat::{render_message, ChatMessage};
use leptos::*;

/// One transcript entry. The body is sanitised markup from the core
/// renderer, so it is safe to inject as HTML.
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let rendered = render_message(&message);
    let is_user = rendered.is_user;

    let avatar = view! {
        <div class=format!(
            "avatar rounded-circle {} text-white d-flex align-items-center justify-content-center flex-shrink-0",
            rendered.avatar_class
        )>
            <i class=format!("bi {}", rendered.avatar_icon)></i>
        </div>
    };

    let badge = rendered.badge.map(|style| {
        view! {
            <span class=format!("badge bg-white border ms-2 {}", style.class)>
                <i class=format!("bi {} me-1", style.icon)></i>
                {style.label}
            </span>
        }
    });

    let bubble = view! {
        <div class=format!("message-bubble rounded-3 p-3 {}", rendered.bubble_class)>
            <div class="message-text" inner_html=rendered.body_html></div>
            <div class=format!("small mt-1 {}", rendered.timestamp_class)>
                <span inner_html=rendered.timestamp></span>
                {badge}
            </div>
        </div>
    };

    view! {
        <div class=format!("message d-flex mb-3 gap-2 {}", rendered.align_class)>
            {if is_user {
                view! { {bubble} {avatar} }.into_view()
            } else {
                view! { {avatar} {bubble} }.into_view()
            }}
        </div>
    }
}

/// Shown while a reply is pending
#[component]
pub fn TypingIndicator(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="message d-flex mb-3 gap-2" id="typingIndicator">
                <div class="avatar rounded-circle bg-success text-white d-flex align-items-center justify-content-center">
                    <i class="bi bi-robot"></i>
                </div>
                <div class="message-bubble bg-light rounded-3 p-3">
                    <span class="typing-dots">
                        <span></span>
                        <span></span>
                        <span></span>
                    </span>
                </div>
            </div>
        </Show>
    }
}
