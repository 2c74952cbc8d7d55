//! Dashboard Cards
//!
//! Stat cards with a count-up animation, insight cards that fade in one
//! after another, and the click ripple.

use std::time::Duration;

use aitherapist::dashboard::effects::{
    hover_transform, stagger_delay, CounterAnimation, HoverTarget, Rect, Ripple, RIPPLE_DURATION,
};
use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::state::{Insight, PageContext};

/// Stat card whose number counts up from zero on mount
#[component]
pub fn StatCard(
    label: &'static str,
    icon: &'static str,
    #[prop(into)]
    value: String,
) -> impl IntoView {
    let config = use_context::<PageContext>().expect("PageContext not found").dashboard;
    let display = create_rw_signal(value.clone());
    let hovered = create_rw_signal(false);

    if let Some(counter) = CounterAnimation::parse(&value) {
        let tick = config.counter_tick_ms as u32;
        for (i, frame) in counter.frames(config.counter_steps).into_iter().enumerate() {
            Timeout::new(tick * (i as u32 + 1), move || display.set(frame)).forget();
        }
    }

    view! {
        <div
            class="card stats-card shadow-sm h-100"
            style:transform=move || hover_transform(HoverTarget::StatsCard, hovered.get())
            style:transition="transform 0.2s ease"
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            <div class="card-body d-flex align-items-center gap-3">
                <i class=format!("bi {} fs-2 text-primary", icon)></i>
                <div>
                    <div class="stat-number fs-3 fw-bold">{move || display.get()}</div>
                    <div class="text-muted small">{label}</div>
                </div>
            </div>
        </div>
    }
}

/// Insight card; `index` orders the fade-in
#[component]
pub fn InsightCard(insight: Insight, index: usize) -> impl IntoView {
    let config = use_context::<PageContext>().expect("PageContext not found").dashboard;
    let shown = create_rw_signal(false);

    let delay = stagger_delay(index, Duration::from_millis(config.insight_stagger_ms));
    let delay = delay.as_millis().min(u128::from(u32::MAX)) as u32;
    Timeout::new(delay, move || shown.set(true)).forget();

    view! {
        <div
            class="card insight-card shadow-sm mb-3"
            style:opacity=move || if shown.get() { "1" } else { "0" }
            style:transform=move || if shown.get() { "translateY(0)" } else { "translateY(20px)" }
            style:transition="all 0.5s ease"
        >
            <div class="card-body d-flex gap-3">
                <i class=format!("bi {} fs-3 text-primary", insight.icon)></i>
                <div>
                    <h6 class="mb-1">{insight.title}</h6>
                    <p class="mb-0 text-muted small">{insight.message}</p>
                </div>
            </div>
        </div>
    }
}

/// Recent conversation row that slides right on hover
#[component]
pub fn RecentChatRow(children: Children) -> impl IntoView {
    let hovered = create_rw_signal(false);

    view! {
        <div
            class="recent-chat list-group-item"
            style:transform=move || hover_transform(HoverTarget::RecentChat, hovered.get())
            style:transition="transform 0.2s ease"
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            {children()}
        </div>
    }
}

/// Add a ripple under the pointer to the clicked element
pub fn ripple(ev: ev::MouseEvent) {
    let Some(target) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };

    let rect = target.get_bounding_client_rect();
    let ripple = Ripple::at(
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
        ev.client_x() as f64,
        ev.client_y() as f64,
    );

    let Ok(span) = document().create_element("span") else {
        return;
    };
    span.set_class_name("ripple");
    let _ = span.set_attribute(
        "style",
        &format!(
            "width: {0}px; height: {0}px; left: {1}px; top: {2}px;",
            ripple.size, ripple.x, ripple.y
        ),
    );

    if target.append_child(&span).is_ok() {
        Timeout::new(RIPPLE_DURATION.as_millis() as u32, move || span.remove()).forget();
    }
}
