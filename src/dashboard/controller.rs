//! Dashboard Controller
//!
//! Renders both charts once per page load. If the charting library has not
//! loaded by the first attempt, rendering is deferred once; a second miss
//! is logged and the charts are skipped.

use std::time::Duration;

use super::charts::{
    distribution_chart, trend_chart, ChartMount, ChartRender, ChartSurface,
};
use super::dataset::DashboardData;
use crate::config::DashboardConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Drawn,
    Empty,
    /// The page has no element to draw into
    MountMissing,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub trend: ChartOutcome,
    pub distribution: ChartOutcome,
}

impl RenderReport {
    pub fn outcome(&self, mount: ChartMount) -> &ChartOutcome {
        match mount {
            ChartMount::MoodTrend => &self.trend,
            ChartMount::MoodDistribution => &self.distribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Rendered(RenderReport),
    /// Try again with [`DashboardController::retry`] after this delay
    Deferred(Duration),
    /// Library still missing after the retry
    Unavailable,
}

pub struct DashboardController {
    data: DashboardData,
    config: DashboardConfig,
}

impl DashboardController {
    pub fn new(data: DashboardData, config: DashboardConfig) -> Self {
        Self { data, config }
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn first_attempt(&self, surface: &mut impl ChartSurface) -> Attempt {
        if !surface.library_available() {
            tracing::debug!(
                "Chart library not ready, retrying in {:?}",
                self.config.chart_retry_delay()
            );
            return Attempt::Deferred(self.config.chart_retry_delay());
        }
        Attempt::Rendered(self.render(surface))
    }

    pub fn retry(&self, surface: &mut impl ChartSurface) -> Attempt {
        if !surface.library_available() {
            tracing::error!("Chart library failed to load, skipping dashboard charts");
            return Attempt::Unavailable;
        }
        Attempt::Rendered(self.render(surface))
    }

    fn render(&self, surface: &mut impl ChartSurface) -> RenderReport {
        RenderReport {
            trend: self.render_one(
                surface,
                ChartMount::MoodTrend,
                trend_chart(&self.data.series),
            ),
            distribution: self.render_one(
                surface,
                ChartMount::MoodDistribution,
                distribution_chart(&self.data.totals),
            ),
        }
    }

    fn render_one(
        &self,
        surface: &mut impl ChartSurface,
        mount: ChartMount,
        render: ChartRender,
    ) -> ChartOutcome {
        if !surface.has_mount(mount) {
            tracing::warn!("Chart element '{}' not found", mount.element_id());
            return ChartOutcome::MountMissing;
        }

        match render {
            ChartRender::Empty(empty) => {
                surface.show_empty(&empty);
                ChartOutcome::Empty
            }
            ChartRender::Chart(spec) => match surface.draw(mount, &spec) {
                Ok(()) => {
                    tracing::debug!("Drew {}", mount.title());
                    ChartOutcome::Drawn
                }
                Err(e) => {
                    tracing::error!("Failed to draw {}: {}", mount.title(), e);
                    ChartOutcome::Failed(e.to_string())
                }
            },
        }
    }
}
