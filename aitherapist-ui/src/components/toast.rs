//! Toast Notification Component
//!
//! Shows error, success and info notifications on top of the page.

use aitherapist::notify::{Notification, NotificationId};
use leptos::*;

/// Toast notification container
#[component]
pub fn Toast(
    #[prop(into)]
    notifications: Signal<Vec<Notification>>,
    #[prop(into)]
    on_dismiss: Callback<NotificationId>,
) -> impl IntoView {
    view! {
        <div class="position-fixed top-0 end-0 p-3" style="z-index: 1080; max-width: 420px;">
            <For
                each=move || notifications.get()
                key=|n| n.id
                children=move |n| view! { <ToastMessage notification=n on_dismiss=on_dismiss /> }
            />
        </div>
    }
}

#[component]
fn ToastMessage(notification: Notification, on_dismiss: Callback<NotificationId>) -> impl IntoView {
    let (icon, alert_class) = notification.kind.presentation();
    let id = notification.id;

    view! {
        <div
            class=format!("alert {} alert-dismissible fade show shadow-sm", alert_class)
            role="alert"
        >
            <i class=format!("bi {} me-2", icon)></i>
            {notification.message}
            <button
                type="button"
                class="btn-close"
                aria-label="Close"
                on:click=move |_| on_dismiss.call(id)
            ></button>
        </div>
    }
}
