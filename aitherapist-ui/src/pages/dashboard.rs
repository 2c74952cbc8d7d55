//! Dashboard Page
//!
//! Mood statistics, charts, insights and recent conversations.

use std::rc::Rc;

use aitherapist::chat::Sentiment;
use aitherapist::dashboard::{Attempt, ChartMount, DashboardController};
use gloo_timers::callback::Timeout;
use leptos::*;

use crate::components::stats::ripple;
use crate::components::{ChartJsSurface, InsightCard, MoodChart, RecentChatRow, StatCard};
use crate::state::{page, PageContext};

fn log_attempt(attempt: &Attempt) {
    match attempt {
        Attempt::Rendered(report) => {
            for mount in ChartMount::ALL {
                web_sys::console::log_1(
                    &format!("{}: {:?}", mount.element_id(), report.outcome(mount)).into(),
                );
            }
        }
        Attempt::Unavailable => {
            web_sys::console::error_1(&"Chart.js failed to load, charts are unavailable".into());
        }
        Attempt::Deferred(_) => {}
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_context::<PageContext>().expect("PageContext not found");
    let controller = Rc::new(DashboardController::new(
        page::dashboard_data(),
        ctx.dashboard.clone(),
    ));

    let data = controller.data();
    let totals = data.totals;
    let positive_pct = format!("{}%", totals.percentages().positive.round() as u64);
    let total_chats = totals.sum().to_string();
    let days_tracked = data.days_tracked().to_string();

    // Charts need the canvases in the document
    let charts = Rc::clone(&controller);
    request_animation_frame(move || {
        let mut surface = ChartJsSurface;
        match charts.first_attempt(&mut surface) {
            Attempt::Deferred(delay) => {
                Timeout::new(delay.as_millis() as u32, move || {
                    let attempt = charts.retry(&mut ChartJsSurface);
                    log_attempt(&attempt);
                })
                .forget();
            }
            attempt => log_attempt(&attempt),
        }
    });

    let insights = page::insights();
    let recent = page::recent_chats();

    view! {
        <div class="container py-4">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h2 class="mb-0">"Your Mood Dashboard"</h2>
                <a
                    href="/chat/"
                    class="btn btn-success position-relative overflow-hidden"
                    on:click=ripple
                >
                    <i class="bi bi-chat-heart me-1"></i>
                    "Start Chatting"
                </a>
            </div>

            <div class="row g-3 mb-4">
                <div class="col-md-4">
                    <StatCard label="Total Conversations" icon="bi-chat-dots" value=total_chats />
                </div>
                <div class="col-md-4">
                    <StatCard label="Positive Mood" icon="bi-emoji-smile" value=positive_pct />
                </div>
                <div class="col-md-4">
                    <StatCard label="Days Tracked" icon="bi-calendar-check" value=days_tracked />
                </div>
            </div>

            <div class="row g-3 mb-4">
                <div class="col-lg-8">
                    <MoodChart mount=ChartMount::MoodTrend />
                </div>
                <div class="col-lg-4">
                    <MoodChart mount=ChartMount::MoodDistribution />
                </div>
            </div>

            <div class="row g-3">
                <div class="col-lg-6">
                    <h5 class="mb-3">"Insights"</h5>
                    {if insights.is_empty() {
                        view! { <p class="text-muted">"Insights appear after a few conversations."</p> }
                            .into_view()
                    } else {
                        insights
                            .into_iter()
                            .enumerate()
                            .map(|(index, insight)| view! { <InsightCard insight=insight index=index /> })
                            .collect_view()
                    }}
                </div>
                <div class="col-lg-6">
                    <h5 class="mb-3">"Recent Conversations"</h5>
                    <div class="list-group">
                        {if recent.is_empty() {
                            view! { <p class="text-muted">"No conversations yet."</p> }.into_view()
                        } else {
                            recent
                                .into_iter()
                                .map(|chat| {
                                    let style = Sentiment::parse(chat.sentiment.as_deref().unwrap_or("neutral"))
                                        .style();
                                    view! {
                                        <RecentChatRow>
                                            <div class="d-flex justify-content-between">
                                                <span class="text-truncate me-2">{chat.message}</span>
                                                <small class="text-muted text-nowrap">{chat.timestamp}</small>
                                            </div>
                                            <small class=style.class>
                                                <i class=format!("bi {} me-1", style.icon)></i>
                                                {style.label}
                                            </small>
                                        </RecentChatRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
