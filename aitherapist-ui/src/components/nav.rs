//! Navigation Component
//!
//! Header navigation bar with brand and page links.

use leptos::*;
use leptos_router::*;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="navbar navbar-expand navbar-dark bg-primary">
            <div class="container">
                <A href="/chat/" class="navbar-brand">
                    <i class="bi bi-heart-pulse me-2"></i>
                    "AI Therapist"
                </A>

                <div class="navbar-nav">
                    <NavLink href="/chat/" label="Chat" icon="bi-chat-dots" />
                    <NavLink href="/dashboard/" label="Dashboard" icon="bi-graph-up" />
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
    icon: &'static str,
) -> impl IntoView {
    view! {
        <A href=href class="nav-link" active_class="active">
            <i class=format!("bi {} me-1", icon)></i>
            {label}
        </A>
    }
}
