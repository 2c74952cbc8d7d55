//! Mood datasets injected by the dashboard page
//!
//! The page provides two globals at load time: a per-day series and the
//! aggregate totals. Both are immutable for the lifetime of the page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment counts for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub negative: u32,
    #[serde(default)]
    pub neutral: u32,
    /// Number of chats that day, as counted by the server
    #[serde(default)]
    pub total: u32,
}

/// Aggregate sentiment counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTotals {
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub negative: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub total: u32,
}

/// Share of each sentiment, in percent with one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoodPercentages {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl MoodTotals {
    /// Sum over the three sentiments
    pub fn sum(&self) -> u64 {
        u64::from(self.positive) + u64::from(self.negative) + u64::from(self.neutral)
    }

    /// All-zero totals mean there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.sum() == 0
    }

    pub fn from_series(series: &[DailyMood]) -> Self {
        series.iter().fold(Self::default(), |acc, day| Self {
            positive: acc.positive.saturating_add(day.positive),
            negative: acc.negative.saturating_add(day.negative),
            neutral: acc.neutral.saturating_add(day.neutral),
            total: acc.total.saturating_add(day.total),
        })
    }

    pub fn percentages(&self) -> MoodPercentages {
        let denominator = if self.total > 0 {
            u64::from(self.total)
        } else {
            self.sum()
        };
        if denominator == 0 {
            return MoodPercentages::default();
        }

        let pct = |count: u32| (count as f64 / denominator as f64 * 1000.0).round() / 10.0;
        MoodPercentages {
            positive: pct(self.positive),
            negative: pct(self.negative),
            neutral: pct(self.neutral),
        }
    }
}

/// Everything the dashboard charts are drawn from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub series: Vec<DailyMood>,
    pub totals: MoodTotals,
}

impl DashboardData {
    pub fn new(series: Vec<DailyMood>, totals: MoodTotals) -> Self {
        Self { series, totals }
    }

    /// Build from the page's JSON globals. Missing, blank or malformed
    /// values are logged and treated as empty.
    pub fn from_page_json(chart_data: Option<&str>, total_stats: Option<&str>) -> Self {
        let series = parse_or_default::<Vec<DailyMood>>("chart data", chart_data);
        let totals = parse_or_default::<MoodTotals>("total stats", total_stats);
        Self { series, totals }
    }

    pub fn days_tracked(&self) -> usize {
        self.series.len()
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(what: &str, raw: Option<&str>) -> T {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty() && *s != "null") else {
        tracing::debug!("No {} supplied by the page", what);
        return T::default();
    };

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", what, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES: &str = r#"[
        {"date": "2024-03-01", "positive": 2, "negative": 1, "neutral": 0, "total": 3},
        {"date": "2024-03-02", "positive": 1, "negative": 0, "neutral": 1, "total": 2}
    ]"#;

    #[test]
    fn test_parse_page_globals() {
        let data = DashboardData::from_page_json(
            Some(SERIES),
            Some(r#"{"positive": 3, "negative": 1, "neutral": 1, "total": 5}"#),
        );
        assert_eq!(data.days_tracked(), 2);
        assert_eq!(data.series[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(data.totals.sum(), 5);
    }

    #[test]
    fn test_missing_globals_are_empty() {
        let data = DashboardData::from_page_json(None, Some("null"));
        assert!(data.series.is_empty());
        assert!(data.totals.is_empty());
    }

    #[test]
    fn test_malformed_globals_are_empty() {
        let data = DashboardData::from_page_json(Some("[{\"date\": 5}]"), Some("{oops"));
        assert_eq!(data, DashboardData::default());
    }

    #[test]
    fn test_totals_from_series() {
        let series: Vec<DailyMood> = serde_json::from_str(SERIES).unwrap();
        let totals = MoodTotals::from_series(&series);
        assert_eq!(
            totals,
            MoodTotals {
                positive: 3,
                negative: 1,
                neutral: 1,
                total: 5
            }
        );
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let data = DashboardData::from_page_json(
            None,
            Some(r#"{"positive": 4294967295, "negative": 1, "neutral": 0, "total": 0}"#),
        );
        assert_eq!(data.totals.sum(), u64::from(u32::MAX) + 1);
        assert!(!data.totals.is_empty());
        assert_eq!(data.totals.percentages().positive, 100.0);

        let day = |positive| DailyMood {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            positive,
            negative: 0,
            neutral: 0,
            total: positive,
        };
        let totals = MoodTotals::from_series(&[day(u32::MAX), day(7)]);
        assert_eq!(totals.positive, u32::MAX);
        assert_eq!(totals.total, u32::MAX);
    }

    #[test]
    fn test_percentages() {
        let totals = MoodTotals {
            positive: 2,
            negative: 1,
            neutral: 0,
            total: 3,
        };
        let pct = totals.percentages();
        assert_eq!(pct.positive, 66.7);
        assert_eq!(pct.negative, 33.3);
        assert_eq!(pct.neutral, 0.0);

        assert_eq!(MoodTotals::default().percentages(), MoodPercentages::default());
    }
}
