//! Dashboard page
//!
//! Mood trend and distribution charts built from the datasets the page
//! injects, plus the decorative effects around them.

pub mod charts;
pub mod controller;
pub mod dataset;
pub mod effects;

pub use charts::{
    distribution_chart, tooltip_label, trend_chart, ChartError, ChartKind, ChartMount,
    ChartRender, ChartSpec, ChartSurface, EmptyState,
};
pub use controller::{Attempt, ChartOutcome, DashboardController, RenderReport};
pub use dataset::{DailyMood, DashboardData, MoodPercentages, MoodTotals};
