//! # AI Therapist client
//!
//! Client-side presentation logic for a mental-health chat service: a chat
//! page that sends messages, renders AI replies with sentiment badges and
//! fetches coping strategies, and a dashboard page that charts mood over
//! time.
//!
//! The crate is independent of any rendering surface. Pages drive the
//! synchronous state machines and carry out the [`chat::Effect`]s they
//! return; network access goes through the [`api::ChatApi`] trait.
//!
//! ## Modules
//!
//! - [`api`]: wire types, errors and the `ChatApi` seam (reqwest client
//!   behind the `native` feature)
//! - [`chat`]: chat page state, rendering and coping modal
//! - [`dashboard`]: mood datasets, chart specs and effects
//! - [`notify`]: transient notifications
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aitherapist::api::HttpChatApi;
//! use aitherapist::chat::ChatController;
//! use aitherapist::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = HttpChatApi::new(config.server.clone())?;
//!     let mut chat = ChatController::new(api, config.chat, None);
//!
//!     chat.input("I had a rough day");
//!     chat.submit().await;
//!
//!     for message in chat.state().transcript().messages() {
//!         println!("{}", message.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod notify;

pub use api::{ApiError, ApiResult, ChatApi};

#[cfg(feature = "native")]
pub use api::HttpChatApi;

pub use chat::{ChatController, ChatState, Effect};

pub use dashboard::{DashboardController, DashboardData};

pub use config::{ChatConfig, Config, ConfigError, DashboardConfig, LoggingConfig, ServerConfig};

pub use notify::{Notification, NotificationKind, Notifications};
