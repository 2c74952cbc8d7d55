//! Loading Component

use leptos::*;

/// Spinner with a caption
#[component]
pub fn Loading(#[prop(default = "Loading...")] text: &'static str) -> impl IntoView {
    view! {
        <div class="d-flex align-items-center gap-2 text-muted py-2">
            <span class="spinner-border spinner-border-sm" role="status"></span>
            <span>{text}</span>
        </div>
    }
}
