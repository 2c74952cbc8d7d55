//! Coping-strategy modal
//!
//! There is exactly one modal per page. Opening it again re-uses the same
//! instance; the overlay backdrop is kept unique by [`reconcile_backdrops`],
//! which the page runs after every show/hide.

use super::render::format_strategy;
use crate::api::{ApiResult, CopingStrategy, DEFAULT_STRATEGY_TYPE};

pub const LOADING_TEXT: &str = "Getting a personalized coping strategy for you...";
pub const FAILED_TEXT: &str =
    "Sorry, we couldn't load a coping strategy right now. Please try again later.";

/// What the modal body currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Loading,
    /// Rendered, injection-safe strategy markup
    Strategy(String),
    Failed,
}

/// A strategy fetch started by [`CopingModal::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopingRequest {
    pub kind: String,
    /// Value of [`CopingModal::shown`] when the request was made
    pub ticket: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopingModal {
    pub visible: bool,
    pub content: ModalContent,
    /// Category of the last request, re-used by "get another"
    pub strategy_type: String,
    /// How many times the modal has been shown on this page
    pub shown: u32,
}

impl Default for CopingModal {
    fn default() -> Self {
        Self {
            visible: false,
            content: ModalContent::Loading,
            strategy_type: DEFAULT_STRATEGY_TYPE.to_string(),
            shown: 0,
        }
    }
}

impl CopingModal {
    /// Show the modal in its loading state and return the fetch to make
    pub fn open(&mut self, kind: Option<&str>) -> CopingRequest {
        if let Some(kind) = kind.map(str::trim).filter(|k| !k.is_empty()) {
            self.strategy_type = kind.to_string();
        }
        self.visible = true;
        self.content = ModalContent::Loading;
        self.shown = self.shown.wrapping_add(1);
        CopingRequest {
            kind: self.strategy_type.clone(),
            ticket: self.shown,
        }
    }

    /// Replace the loading placeholder with the outcome.
    ///
    /// Outcomes of superseded requests, or arriving after the modal was
    /// closed, are dropped. Returns whether the outcome was shown.
    pub fn finish(&mut self, ticket: u32, result: ApiResult<CopingStrategy>) -> bool {
        if !self.visible || ticket != self.shown {
            tracing::debug!(ticket, current = self.shown, "Dropping stale coping strategy");
            return false;
        }

        self.content = match result {
            Ok(strategy) => ModalContent::Strategy(format_strategy(&strategy.strategy)),
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching coping strategy");
                ModalContent::Failed
            }
        };
        true
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_loading(&self) -> bool {
        self.content == ModalContent::Loading
    }
}

/// Page surface that may hold modal backdrops
pub trait OverlayHost {
    fn backdrop_count(&self) -> usize;

    /// Remove the backdrop at `index` (0 is the oldest)
    fn remove_backdrop(&mut self, index: usize);
}

/// Make sure at most one backdrop exists. Returns how many were removed.
///
/// Idempotent: with zero or one backdrop nothing changes; with N > 1 the
/// oldest is kept and the rest removed.
pub fn reconcile_backdrops(host: &mut impl OverlayHost) -> usize {
    let count = host.backdrop_count();
    if count <= 1 {
        return 0;
    }

    for index in (1..count).rev() {
        host.remove_backdrop(index);
    }

    let removed = count - host.backdrop_count();
    tracing::debug!(removed, "Removed duplicate modal backdrops");
    removed
}
