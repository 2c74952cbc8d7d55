//! Chat page
//!
//! Message composition, transcript, sentiment rendering and the coping
//! strategy modal.
//!
//! ## Modules
//!
//! - [`state`]: the synchronous state machine and its effects
//! - [`controller`]: async driver over a [`ChatApi`](crate::api::ChatApi)
//! - [`render`]: injection-safe message rendering
//! - [`modal`]: coping modal and backdrop reconciliation

pub mod controller;
pub mod input;
pub mod message;
pub mod modal;
pub mod render;
pub mod state;
pub mod transcript;

pub use controller::{ChatController, Confirm};
pub use input::{classify_key, InputBox, KeyCommand, KeyPress};
pub use message::{ChatMessage, MessageId, Sender, Sentiment, SentimentStyle};
pub use modal::{reconcile_backdrops, CopingModal, CopingRequest, ModalContent, OverlayHost};
pub use render::{format_message, format_strategy, render_message, RenderedMessage};
pub use state::{ChatPhase, ChatState, ConversationAction, Effect, SendStart};
pub use transcript::Transcript;
