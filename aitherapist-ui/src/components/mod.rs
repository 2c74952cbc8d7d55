//! UI Components
//!
//! Reusable Leptos components for the chat page and the dashboard.

pub mod chart;
pub mod composer;
pub mod coping_modal;
pub mod loading;
pub mod message;
pub mod nav;
pub mod stats;
pub mod toast;

pub use chart::{ChartJsSurface, MoodChart};
pub use composer::{ChatActions, Composer};
pub use coping_modal::CopingModal;
pub use loading::Loading;
pub use message::{MessageBubble, TypingIndicator};
pub use nav::Nav;
pub use stats::{InsightCard, RecentChatRow, StatCard};
pub use toast::Toast;
