//! Chat Server API
//!
//! The client side of the four endpoints the chat page talks to.
//!
//! # Endpoints
//!
//! - `POST /send-message/` - Send a user message, receive the AI reply
//! - `GET /api/coping-strategy/?type=` - Fetch a coping strategy
//! - `POST /api/conversations/new/` - Start a fresh conversation
//! - `POST /api/conversations/clear/` - Delete the current conversation
//!
//! Paths are configurable through [`ServerConfig`](crate::config::ServerConfig).
//! Every mutating request carries the CSRF token in a dedicated header.
//!
//! The [`ChatApi`] trait is the seam between the controllers and the
//! transport: the native build uses [`HttpChatApi`] (reqwest), the browser
//! front end implements it over `gloo-net`, and tests use in-memory fakes.
//!
//! # Example
//!
//! ```rust,no_run
//! use aitherapist::api::{ChatApi, HttpChatApi, SendMessageRequest};
//! use aitherapist::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpChatApi::new(ServerConfig::default())?;
//!     let reply = api
//!         .send_message(&SendMessageRequest {
//!             message: "Hello".to_string(),
//!             conversation_id: None,
//!         })
//!         .await?;
//!     println!("{:?}", reply.ai_response);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

pub mod dto;
pub mod error;

#[cfg(feature = "native")]
pub mod client;

pub use dto::{
    ClearConversationRequest, ConversationResponse, CopingStrategy, ErrorBody,
    NewConversationRequest, SendMessageRequest, SendMessageResponse,
};
pub use error::{ApiError, ApiResult};

#[cfg(feature = "native")]
pub use client::HttpChatApi;

/// Strategy category requested when the caller does not name one
pub const DEFAULT_STRATEGY_TYPE: &str = "general";

/// Transport for the chat page's server exchanges.
///
/// Implementations report non-2xx statuses as [`ApiError::Status`] but return
/// `success: false` bodies as-is; interpreting the affirmative flag is the
/// controller's job. Futures are not required to be `Send` so the same trait
/// serves the single-threaded browser runtime.
#[async_trait(?Send)]
pub trait ChatApi {
    /// Post a user message and wait for the AI reply
    async fn send_message(&self, request: &SendMessageRequest) -> ApiResult<SendMessageResponse>;

    /// Fetch a coping strategy of the given category
    async fn coping_strategy(&self, kind: &str) -> ApiResult<CopingStrategy>;

    /// Ask the server for a fresh conversation
    async fn new_conversation(&self) -> ApiResult<ConversationResponse>;

    /// Ask the server to delete the given conversation
    async fn clear_conversation(
        &self,
        conversation_id: Option<&str>,
    ) -> ApiResult<ConversationResponse>;
}

/// Build the coping-strategy URL for a category
pub fn coping_strategy_url(base_url: &str, path: &str, kind: &str) -> String {
    format!(
        "{}?type={}",
        join_url(base_url, path),
        urlencoding::encode(kind)
    )
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
