//! HTTP API Client
//!
//! [`ChatApi`] over `gloo-net`, talking to the same origin that served the
//! page.

use aitherapist::api::{
    coping_strategy_url, join_url, ApiError, ApiResult, ChatApi, ClearConversationRequest,
    ConversationResponse, CopingStrategy, ErrorBody, NewConversationRequest, SendMessageRequest,
    SendMessageResponse,
};
use aitherapist::config::ServerConfig;
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone)]
pub struct GlooChatApi {
    config: ServerConfig,
}

impl GlooChatApi {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.csrf_token {
            Some(token) => request.header(&self.config.csrf_header, token),
            None => request,
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = join_url(&self.config.base_url, path);
        let request = self
            .with_csrf(Request::post(&url))
            .json(body)
            .map_err(|e| ApiError::Build(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

#[async_trait(?Send)]
impl ChatApi for GlooChatApi {
    async fn send_message(&self, request: &SendMessageRequest) -> ApiResult<SendMessageResponse> {
        self.post(&self.config.send_message_path, request).await
    }

    async fn coping_strategy(&self, kind: &str) -> ApiResult<CopingStrategy> {
        let url = coping_strategy_url(
            &self.config.base_url,
            &self.config.coping_strategy_path,
            kind,
        );

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn new_conversation(&self) -> ApiResult<ConversationResponse> {
        self.post(&self.config.new_chat_path, &NewConversationRequest::default())
            .await
    }

    async fn clear_conversation(
        &self,
        conversation_id: Option<&str>,
    ) -> ApiResult<ConversationResponse> {
        let body = ClearConversationRequest {
            conversation_id: conversation_id.map(str::to_string),
        };
        self.post(&self.config.clear_chat_path, &body).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| response.status_text());
        return Err(ApiError::Status {
            status: response.status(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
