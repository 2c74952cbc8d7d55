//! HTTP client and chat controller against an in-process mock chat server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aitherapist::api::{ApiError, ChatApi, HttpChatApi, SendMessageRequest};
use aitherapist::chat::state::{CHAT_CLEARED, SEND_FAILED_ERROR};
use aitherapist::chat::{
    ChatController, ChatPhase, Effect, ModalContent, SendStart, Sender, Sentiment,
};
use aitherapist::config::{ChatConfig, ServerConfig};
use aitherapist::NotificationKind;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const TOKEN: &str = "test-csrf-token";

#[derive(Debug, Clone)]
struct Hit {
    path: &'static str,
    csrf: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Recorder {
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl Recorder {
    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let csrf = headers
            .get("X-CSRFToken")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.hits.lock().unwrap().push(Hit { path, csrf, body });
    }

    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

async fn send_message(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    recorder.record("send", &headers, body.clone());

    match body["message"].as_str().unwrap_or_default() {
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "model offline"})),
        )
            .into_response(),
        "nope" => Json(json!({"success": false, "error": "Message cannot be empty"}))
            .into_response(),
        _ => Json(json!({
            "success": true,
            "ai_response": "I hear you. <b>Tell me more.</b>",
            "sentiment": "positive",
            "timestamp": "10:01",
            "conversation_id": "c-1",
            "confidence": 0.92
        }))
        .into_response(),
    }
}

async fn coping_strategy(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let kind = params
        .get("type")
        .cloned()
        .unwrap_or_else(|| "general".to_string());
    recorder.record("coping", &headers, json!({ "type": kind }));

    Json(json!({
        "strategy": "**Box breathing**\nInhale for four counts.",
        "type": kind
    }))
}

async fn new_conversation(State(recorder): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    recorder.record("new", &headers, Value::Null);
    Json(json!({"success": true, "redirect_url": "/chat/c-2/"}))
}

async fn clear_conversation(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorder.record("clear", &headers, body);
    Json(json!({"success": true}))
}

async fn spawn_server() -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/send-message/", post(send_message))
        .route("/api/coping-strategy/", get(coping_strategy))
        .route("/api/conversations/new/", post(new_conversation))
        .route("/api/conversations/clear/", post(clear_conversation))
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorder)
}

fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        csrf_token: Some(TOKEN.to_string()),
        ..Default::default()
    }
}

async fn controller() -> (ChatController<HttpChatApi>, Recorder) {
    let (url, recorder) = spawn_server().await;
    let api = HttpChatApi::new(server_config(&url)).unwrap();
    (ChatController::new(api, ChatConfig::default(), None), recorder)
}

#[tokio::test]
async fn test_send_message_carries_csrf_header() {
    let (url, recorder) = spawn_server().await;
    let api = HttpChatApi::new(server_config(&url)).unwrap();

    let reply = api
        .send_message(&SendMessageRequest {
            message: "Hello".to_string(),
            conversation_id: None,
        })
        .await
        .unwrap();

    assert!(reply.success);
    assert_eq!(reply.sentiment.as_deref(), Some("positive"));
    assert_eq!(reply.confidence, Some(0.92));

    let hits = recorder.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].csrf.as_deref(), Some(TOKEN));
    assert_eq!(hits[0].body, json!({"message": "Hello"}));
}

#[tokio::test]
async fn test_error_status_maps_to_status_error() {
    let (url, _recorder) = spawn_server().await;
    let api = HttpChatApi::new(server_config(&url)).unwrap();

    let err = api
        .send_message(&SendMessageRequest {
            message: "boom".to_string(),
            conversation_id: None,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "model offline".to_string()
        }
    );
}

#[tokio::test]
async fn test_hello_round_trip_through_controller() {
    let (mut chat, recorder) = controller().await;

    chat.input("Hello");
    let effects = chat.submit().await;

    let messages = chat.state().transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "Hello");
    assert_eq!(messages[2].sender, Sender::Ai);
    assert_eq!(messages[2].sentiment, Some(Sentiment::Positive));
    assert_eq!(messages[2].timestamp, "10:01");

    assert_eq!(chat.state().phase(), ChatPhase::Idle);
    assert!(!chat.state().input().disabled);
    assert!(!chat.state().typing_visible());
    assert_eq!(chat.state().conversation_id(), Some("c-1"));
    assert!(effects.contains(&Effect::FocusInput));

    // Follow-up carries the conversation reference
    chat.input("Still here");
    chat.submit().await;
    let hits = recorder.hits();
    assert_eq!(hits[1].body["conversation_id"], "c-1");
}

#[tokio::test]
async fn test_whitespace_never_reaches_server() {
    let (mut chat, recorder) = controller().await;

    chat.input("   ");
    chat.submit().await;

    assert!(recorder.hits().is_empty());
    assert_eq!(chat.state().transcript().len(), 1);
    assert_eq!(
        chat.state().notifications().latest().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[tokio::test]
async fn test_rejected_and_failed_sends_notify() {
    let (mut chat, _recorder) = controller().await;

    for message in ["nope", "boom"] {
        chat.input(message);
        chat.submit().await;

        let latest = chat.state().notifications().latest().unwrap();
        assert_eq!(latest.message, SEND_FAILED_ERROR);
        assert!(chat.state().transcript().last().unwrap().is_user());
        assert_eq!(chat.state().phase(), ChatPhase::Idle);
        assert!(!chat.state().input().disabled);
    }
}

#[tokio::test]
async fn test_coping_strategy_query_is_encoded_without_csrf() {
    let (mut chat, recorder) = controller().await;

    chat.show_coping_strategy(Some("sleep & rest")).await;

    let ModalContent::Strategy(html) = &chat.state().modal().content else {
        panic!("expected strategy");
    };
    assert!(html.starts_with("<strong>Box breathing</strong><br>"));

    let hits = recorder.hits();
    assert_eq!(hits[0].body["type"], "sleep & rest");
    assert_eq!(hits[0].csrf, None);
}

#[tokio::test]
async fn test_new_chat_navigates_to_redirect() {
    let (mut chat, recorder) = controller().await;
    chat.input("Hello");
    chat.submit().await;

    let effects = chat.new_chat(&|_: &str| true).await;

    assert!(effects.contains(&Effect::Navigate("/chat/c-2/".to_string())));
    assert_eq!(chat.state().transcript().len(), 1);
    assert_eq!(chat.state().conversation_id(), None);
    assert_eq!(recorder.hits().last().unwrap().csrf.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_clear_chat_sends_conversation_and_confirms() {
    let (mut chat, recorder) = controller().await;

    // Declined: nothing sent
    assert!(chat.clear_chat(&|_: &str| false).await.is_empty());
    assert!(recorder.hits().is_empty());

    chat.clear_chat(&|_: &str| true).await;
    let hits = recorder.hits();
    assert_eq!(hits[0].path, "clear");
    assert_eq!(hits[0].body, json!({"conversation_id": null}));
    assert_eq!(
        chat.state().notifications().latest().map(|n| n.message.as_str()),
        Some(CHAT_CLEARED)
    );
}

#[tokio::test]
async fn test_unreachable_server_falls_back_to_local_reset() {
    let api = HttpChatApi::new(server_config("http://127.0.0.1:9")).unwrap();
    let mut chat = ChatController::new(api, ChatConfig::default(), Some("c-9".to_string()));

    chat.new_chat(&|_: &str| true).await;

    assert_eq!(chat.state().conversation_id(), None);
    assert_eq!(
        chat.state().notifications().latest().map(|n| n.kind),
        Some(NotificationKind::Info)
    );
}

#[tokio::test]
async fn test_conversation_actions_wait_for_in_flight_send() {
    let (mut chat, recorder) = controller().await;
    chat.input("Hello");
    assert!(matches!(
        chat.state_mut().begin_send_at("10:00 AM"),
        SendStart::Started { .. }
    ));

    assert!(chat.new_chat(&|_: &str| true).await.is_empty());
    assert!(chat.clear_chat(&|_: &str| true).await.is_empty());
    assert!(recorder.hits().is_empty());
    assert_eq!(chat.state().phase(), ChatPhase::Submitting);
    assert_eq!(chat.state().transcript().len(), 2);
}
