//! DOM helpers used when applying chat effects

use aitherapist::chat::OverlayHost;
use leptos::*;
use wasm_bindgen::JsCast;

const BACKDROP_SELECTOR: &str = ".modal-backdrop";

/// Modal backdrops currently in the document, oldest first
pub struct DomOverlayHost {
    backdrops: Vec<web_sys::Element>,
}

impl DomOverlayHost {
    pub fn from_document() -> Self {
        let mut backdrops = Vec::new();
        if let Ok(nodes) = document().query_selector_all(BACKDROP_SELECTOR) {
            for i in 0..nodes.length() {
                if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                    backdrops.push(el);
                }
            }
        }
        Self { backdrops }
    }
}

impl OverlayHost for DomOverlayHost {
    fn backdrop_count(&self) -> usize {
        self.backdrops.len()
    }

    fn remove_backdrop(&mut self, index: usize) {
        if index < self.backdrops.len() {
            self.backdrops.remove(index).remove();
        }
    }
}

pub fn focus(el: &web_sys::HtmlElement) {
    let _ = el.focus();
}

pub fn set_height(el: &web_sys::HtmlElement, height_px: u32) {
    let _ = el
        .style()
        .set_property("height", &format!("{}px", height_px));
}

pub fn scroll_to_end(el: &web_sys::Element) {
    el.set_scroll_top(el.scroll_height());
}

/// Whether `el` currently has keyboard focus
pub fn is_focused(el: &web_sys::Element) -> bool {
    document().active_element().as_ref() == Some(el)
}

pub fn navigate(url: &str) {
    if let Err(e) = window().location().set_href(url) {
        web_sys::console::error_1(&format!("Navigation to {} failed: {:?}", url, e).into());
    }
}

pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
