//! Pages
//!
//! Top-level page components for each route.

pub mod chat;
pub mod dashboard;

pub use chat::ChatPage;
pub use dashboard::DashboardPage;
