//! Chat Server REST Client
//!
//! HTTP client for the chat server endpoints, used by the native build.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{
    ClearConversationRequest, ConversationResponse, CopingStrategy, ErrorBody,
    NewConversationRequest, SendMessageRequest, SendMessageResponse,
};
use super::error::{ApiError, ApiResult};
use super::{coping_strategy_url, join_url, ChatApi};
use crate::config::ServerConfig;

/// reqwest-backed [`ChatApi`]
pub struct HttpChatApi {
    client: Client,
    config: ServerConfig,
}

impl HttpChatApi {
    /// Create a new client with the given configuration
    pub fn new(config: ServerConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Attach the CSRF header to a mutating request
    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.csrf_token {
            Some(token) => request.header(self.config.csrf_header.as_str(), token.as_str()),
            None => {
                tracing::debug!("No CSRF token configured; sending without header");
                request
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(map_transport)?;
        decode(response).await
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, request: &SendMessageRequest) -> ApiResult<SendMessageResponse> {
        let url = self.url(&self.config.send_message_path);
        tracing::debug!(url = %url, has_conversation = request.conversation_id.is_some(), "Sending message");

        self.execute(self.with_csrf(self.client.post(&url).json(request)))
            .await
    }

    async fn coping_strategy(&self, kind: &str) -> ApiResult<CopingStrategy> {
        let url = coping_strategy_url(
            &self.config.base_url,
            &self.config.coping_strategy_path,
            kind,
        );
        tracing::debug!(url = %url, "Fetching coping strategy");

        self.execute(self.client.get(&url)).await
    }

    async fn new_conversation(&self) -> ApiResult<ConversationResponse> {
        let url = self.url(&self.config.new_chat_path);

        self.execute(
            self.with_csrf(self.client.post(&url).json(&NewConversationRequest::default())),
        )
        .await
    }

    async fn clear_conversation(
        &self,
        conversation_id: Option<&str>,
    ) -> ApiResult<ConversationResponse> {
        let url = self.url(&self.config.clear_chat_path);
        let body = ClearConversationRequest {
            conversation_id: conversation_id.map(str::to_string),
        };

        self.execute(self.with_csrf(self.client.post(&url).json(&body)))
            .await
    }
}

fn map_transport(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::Build(e.to_string())
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let text = response.text().await.map_err(map_transport)?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let api = HttpChatApi::new(ServerConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            api.url(&api.config().send_message_path),
            "http://localhost:8000/send-message/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let api = HttpChatApi::new(ServerConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: Some(2),
            ..Default::default()
        })
        .unwrap();

        let err = api.new_conversation().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err:?}");
    }
}
