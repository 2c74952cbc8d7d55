//! Data Transfer Objects
//!
//! Request and response bodies for the chat server endpoints.
//! These types define the JSON contract between the client and the server.

use serde::{Deserialize, Serialize};

// ============================================
// Send Message
// ============================================

/// Request body for the message-send endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The user's message, already trimmed
    pub message: String,

    /// Conversation this message belongs to (absent on the first send)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Response body from the message-send endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub ai_response: Option<String>,

    /// Raw sentiment label; unknown values are tolerated and mapped to neutral
    #[serde(default)]
    pub sentiment: Option<String>,

    /// Server-formatted time of the reply (e.g. "10:00 AM")
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub conversation_id: Option<String>,

    /// Classifier confidence, informational only
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub error: Option<String>,
}

impl SendMessageResponse {
    /// Build an affirmative response (used by tests and the mock server)
    pub fn reply(ai_response: &str, sentiment: &str, timestamp: &str) -> Self {
        Self {
            success: true,
            ai_response: Some(ai_response.to_string()),
            sentiment: Some(sentiment.to_string()),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        }
    }
}

// ============================================
// Coping Strategy
// ============================================

/// Response body from the coping-strategy endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopingStrategy {
    /// Strategy text, may contain `**bold**` markers
    pub strategy: String,

    /// Strategy category echoed back by the server
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// ============================================
// Conversation management
// ============================================

/// Request body for the new-conversation endpoint (always `{}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewConversationRequest {}

/// Request body for the clear-conversation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearConversationRequest {
    /// Serialized as `null` when no conversation is held
    pub conversation_id: Option<String>,
}

/// Response body from the new/clear conversation endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub redirect_url: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Error body the server returns alongside non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_omits_missing_conversation() {
        let req = SendMessageRequest {
            message: "Hello".to_string(),
            conversation_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Hello" }));
    }

    #[test]
    fn test_clear_request_serializes_null() {
        let req = ClearConversationRequest {
            conversation_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"conversation_id":null}"#);
    }

    #[test]
    fn test_send_response_tolerates_sparse_body() {
        let resp: SendMessageResponse =
            serde_json::from_str(r#"{"error": "Message cannot be empty"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.ai_response.is_none());
        assert_eq!(resp.error.as_deref(), Some("Message cannot be empty"));
    }

    #[test]
    fn test_coping_strategy_type_field() {
        let strategy: CopingStrategy =
            serde_json::from_str(r#"{"strategy": "**Breathe**", "type": "anxiety"}"#).unwrap();
        assert_eq!(strategy.kind.as_deref(), Some("anxiety"));
    }
}
