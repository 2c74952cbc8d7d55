//! Coping Strategy Modal
//!
//! A single modal instance per page. The body switches between the loading
//! placeholder, the rendered strategy and the failure notice.

use aitherapist::chat::modal::{FAILED_TEXT, LOADING_TEXT};
use aitherapist::chat::ModalContent;
use leptos::*;

use crate::components::Loading;
use crate::state::use_chat_store;

#[component]
pub fn CopingModal() -> impl IntoView {
    let store = use_chat_store();
    let state = store.state;

    let visible = move || state.with(|s| s.modal().visible);
    let content = move || state.with(|s| s.modal().content.clone());
    let kind = move || state.with(|s| s.modal().strategy_type.clone());

    let close = {
        let store = store.clone();
        move |_: ev::MouseEvent| store.close_coping()
    };
    let another = move |_: ev::MouseEvent| store.open_coping(None);

    view! {
        <Show when=visible>
            <div class="modal fade show d-block" tabindex="-1" role="dialog" aria-modal="true">
                <div class="modal-dialog modal-dialog-centered">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">
                                <i class="bi bi-lightbulb text-warning me-2"></i>
                                "Coping Strategy"
                                <small class="text-muted ms-2 text-capitalize">{kind}</small>
                            </h5>
                            <button type="button" class="btn-close" aria-label="Close" on:click=close.clone()></button>
                        </div>
                        <div class="modal-body">
                            {move || match content() {
                                ModalContent::Loading => view! { <Loading text=LOADING_TEXT /> }.into_view(),
                                ModalContent::Strategy(html) => view! {
                                    <div class="strategy-text" inner_html=html></div>
                                }.into_view(),
                                ModalContent::Failed => view! {
                                    <p class="text-danger mb-0">
                                        <i class="bi bi-exclamation-triangle me-2"></i>
                                        {FAILED_TEXT}
                                    </p>
                                }.into_view(),
                            }}
                        </div>
                        <div class="modal-footer">
                            <button type="button" class="btn btn-outline-success" on:click=another.clone()>
                                "Get Another"
                            </button>
                            <button type="button" class="btn btn-secondary" on:click=close.clone()>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop fade show" on:click=close.clone()></div>
        </Show>
    }
}
