//! AI Therapist Web Client
//!
//! Browser front end for the AI therapist chat, built with Leptos (WASM).
//!
//! # Features
//!
//! - Chat transcript with typing indicator and keyboard shortcuts
//! - Coping strategy modal
//! - Mood dashboard with Chart.js charts
//!
//! # Architecture
//!
//! Client-side rendered Leptos application compiled to WebAssembly. Chat
//! behaviour lives in the `aitherapist` crate; this crate wires it to the
//! DOM and talks to the server through `gloo-net`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
