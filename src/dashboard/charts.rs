//! Chart descriptions
//!
//! Charts are described as plain data that serializes straight into a
//! Chart.js configuration object. Drawing is left to a [`ChartSurface`].

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::dataset::{DailyMood, MoodTotals};

pub const POSITIVE_COLOR: &str = "rgb(25, 135, 84)";
pub const NEUTRAL_COLOR: &str = "rgb(108, 117, 125)";
pub const NEGATIVE_COLOR: &str = "rgb(220, 53, 69)";

const POSITIVE_FILL: &str = "rgba(25, 135, 84, 0.1)";
const NEUTRAL_FILL: &str = "rgba(108, 117, 125, 0.1)";
const NEGATIVE_FILL: &str = "rgba(220, 53, 69, 0.1)";

const TREND_EMPTY: &str = "No data available yet.\nStart chatting to see your mood trends!";
const DISTRIBUTION_EMPTY: &str =
    "No data available yet.\nStart chatting to see your mood distribution!";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("Chart library is not loaded")]
    LibraryMissing,

    #[error("Chart mount '{0}' not found")]
    MountMissing(&'static str),

    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// Where a chart goes on the dashboard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartMount {
    MoodTrend,
    MoodDistribution,
}

impl ChartMount {
    pub const ALL: [ChartMount; 2] = [ChartMount::MoodTrend, ChartMount::MoodDistribution];

    /// DOM id of the canvas
    pub fn element_id(self) -> &'static str {
        match self {
            ChartMount::MoodTrend => "moodTrendChart",
            ChartMount::MoodDistribution => "moodDistributionChart",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartMount::MoodTrend => "Mood Trends",
            ChartMount::MoodDistribution => "Mood Distribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
    pub border_color: Colors,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A complete chart, ready to hand to the charting library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

impl ChartSpec {
    /// Chart.js configuration object
    pub fn to_config(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Placeholder shown in place of a chart with no data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub mount: ChartMount,
    pub icon: &'static str,
    pub message: &'static str,
}

impl EmptyState {
    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.message.lines()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartRender {
    Chart(ChartSpec),
    Empty(EmptyState),
}

/// Something that can draw charts, e.g. a canvas or a terminal
pub trait ChartSurface {
    /// Whether the charting capability is loaded yet
    fn library_available(&self) -> bool;

    fn has_mount(&self, mount: ChartMount) -> bool;

    fn draw(&mut self, mount: ChartMount, spec: &ChartSpec) -> Result<(), ChartError>;

    fn show_empty(&mut self, empty: &EmptyState);
}

/// Multi-series line chart of daily sentiment counts
pub fn trend_chart(series: &[DailyMood]) -> ChartRender {
    if series.is_empty() {
        return ChartRender::Empty(EmptyState {
            mount: ChartMount::MoodTrend,
            icon: "bi-graph-up",
            message: TREND_EMPTY,
        });
    }

    let labels = series
        .iter()
        .map(|day| day.date.format("%b %-d").to_string())
        .collect();

    let line = |label: &str, color: &str, fill: &str, data: Vec<u32>| Dataset {
        label: Some(label.to_string()),
        data,
        border_color: Colors::Single(color.to_string()),
        background_color: Colors::Single(fill.to_string()),
        border_width: None,
        tension: Some(0.4),
        fill: Some(true),
    };

    let datasets = vec![
        line(
            "Positive",
            POSITIVE_COLOR,
            POSITIVE_FILL,
            series.iter().map(|d| d.positive).collect(),
        ),
        line(
            "Neutral",
            NEUTRAL_COLOR,
            NEUTRAL_FILL,
            series.iter().map(|d| d.neutral).collect(),
        ),
        line(
            "Negative",
            NEGATIVE_COLOR,
            NEGATIVE_FILL,
            series.iter().map(|d| d.negative).collect(),
        ),
    ];

    ChartRender::Chart(ChartSpec {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "position": "top" },
                "tooltip": { "mode": "index", "intersect": false }
            },
            "scales": {
                "y": { "beginAtZero": true, "ticks": { "stepSize": 1 } }
            },
            "interaction": { "mode": "nearest", "axis": "x", "intersect": false }
        }),
    })
}

/// Doughnut of the overall sentiment split
pub fn distribution_chart(totals: &MoodTotals) -> ChartRender {
    if totals.is_empty() {
        return ChartRender::Empty(EmptyState {
            mount: ChartMount::MoodDistribution,
            icon: "bi-info-circle",
            message: DISTRIBUTION_EMPTY,
        });
    }

    let colors = || {
        Colors::Each(vec![
            POSITIVE_COLOR.to_string(),
            NEUTRAL_COLOR.to_string(),
            NEGATIVE_COLOR.to_string(),
        ])
    };

    ChartRender::Chart(ChartSpec {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec!["Positive".into(), "Neutral".into(), "Negative".into()],
            datasets: vec![Dataset {
                label: None,
                data: vec![totals.positive, totals.neutral, totals.negative],
                border_color: colors(),
                background_color: colors(),
                border_width: Some(2),
                tension: None,
                fill: None,
            }],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "bottom",
                    "labels": { "padding": 20, "usePointStyle": true }
                }
            }
        }),
    })
}

/// Hover text for a doughnut slice, e.g. `Positive: 3 (60.0%)`
pub fn tooltip_label(label: &str, value: u32, total: u64) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        value as f64 / total as f64 * 100.0
    };
    format!("{}: {} ({:.1}%)", label, value, pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, positive: u32, neutral: u32, negative: u32) -> DailyMood {
        DailyMood {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            positive,
            negative,
            neutral,
            total: positive + neutral + negative,
        }
    }

    #[test]
    fn test_trend_chart_series_order_and_labels() {
        let ChartRender::Chart(spec) = trend_chart(&[day(1, 2, 0, 1), day(12, 1, 1, 0)]) else {
            panic!("expected a chart");
        };

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.data.labels, vec!["Mar 1", "Mar 12"]);

        let labels: Vec<_> = spec
            .data
            .datasets
            .iter()
            .map(|d| d.label.clone().unwrap())
            .collect();
        assert_eq!(labels, vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(spec.data.datasets[0].data, vec![2, 1]);
        assert_eq!(spec.data.datasets[2].data, vec![1, 0]);
        assert_eq!(
            spec.data.datasets[0].border_color,
            Colors::Single(POSITIVE_COLOR.into())
        );
    }

    #[test]
    fn test_trend_chart_config_shape() {
        let ChartRender::Chart(spec) = trend_chart(&[day(1, 1, 0, 0)]) else {
            panic!("expected a chart");
        };
        let config = spec.to_config();

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["datasets"][0]["borderColor"], POSITIVE_COLOR);
        assert_eq!(config["data"]["datasets"][0]["tension"], 0.4);
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(config["options"]["scales"]["y"]["ticks"]["stepSize"], 1);
    }

    #[test]
    fn test_empty_series_shows_message() {
        let ChartRender::Empty(empty) = trend_chart(&[]) else {
            panic!("expected empty state");
        };
        assert_eq!(empty.mount, ChartMount::MoodTrend);
        assert!(empty.message.contains("mood trends"));
        assert_eq!(empty.lines().count(), 2);
    }

    #[test]
    fn test_distribution_chart() {
        let totals = MoodTotals {
            positive: 3,
            negative: 1,
            neutral: 1,
            total: 5,
        };
        let ChartRender::Chart(spec) = distribution_chart(&totals) else {
            panic!("expected a chart");
        };
        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.data.datasets[0].data, vec![3, 1, 1]);
        assert_eq!(spec.options["plugins"]["legend"]["position"], "bottom");

        assert!(matches!(
            distribution_chart(&MoodTotals::default()),
            ChartRender::Empty(EmptyState {
                mount: ChartMount::MoodDistribution,
                ..
            })
        ));
    }

    #[test]
    fn test_distribution_chart_with_huge_counts() {
        let totals = MoodTotals {
            positive: u32::MAX,
            negative: 1,
            neutral: 0,
            total: 0,
        };
        let ChartRender::Chart(spec) = distribution_chart(&totals) else {
            panic!("expected a chart");
        };
        assert_eq!(spec.data.datasets[0].data, vec![u32::MAX, 0, 1]);
    }

    #[test]
    fn test_tooltip_label() {
        assert_eq!(tooltip_label("Positive", 3, 5), "Positive: 3 (60.0%)");
        assert_eq!(tooltip_label("Neutral", 1, 3), "Neutral: 1 (33.3%)");
        assert_eq!(tooltip_label("Negative", 0, 0), "Negative: 0 (0.0%)");
        assert_eq!(
            tooltip_label("Positive", u32::MAX, u64::from(u32::MAX) + 1),
            "Positive: 4294967295 (100.0%)"
        );
    }
}
