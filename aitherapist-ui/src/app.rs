//! App Root Component
//!
//! Routing and the page context shared by every page.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{ChatPage, DashboardPage};
use crate::state::provide_page_context;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_page_context();

    view! {
        <Router>
            <Nav />
            <main>
                <Routes>
                    <Route path="/" view=ChatPage />
                    <Route path="/chat/*any" view=ChatPage />
                    <Route path="/dashboard/" view=DashboardPage />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="container py-5 text-center">
            <i class="bi bi-signpost-split fs-1 text-muted d-block mb-3"></i>
            <h1 class="h3 mb-2">"Page Not Found"</h1>
            <p class="text-muted mb-4">"The page you're looking for doesn't exist."</p>
            <A href="/chat/" class="btn btn-success">"Back to Chat"</A>
        </div>
    }
}
