mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use timeweb_chatbot::config::Settings;
use timeweb_chatbot::message::{ChatResponse, ContextMessage, ErrorBody};
use timeweb_chatbot::routes::{build_app, create_router};
use timeweb_chatbot::state::AppState;
use tower::util::ServiceExt;

use common::{RecordingAgent, state_with};

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_chat_endpoint() {
    let agent = Arc::new(RecordingAgent::default());
    let app = create_router().with_state(state_with(agent.clone()));

    let response = app
        .oneshot(chat_request(r#"{"question": "Что нового?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(chat_resp.answer, "Ответ: Что нового?");
    assert_eq!(agent.calls().len(), 1);
}

#[tokio::test]
async fn test_chat_forwards_session_and_context() {
    let agent = Arc::new(RecordingAgent::default());
    let app = create_router().with_state(state_with(agent.clone()));

    let body = r#"{
        "question": "Что нового?",
        "session_id": "session-777",
        "context": [
            {"role": "system", "content": "Ты дружелюбный помощник"},
            {"role": "user", "content": "Привет"}
        ]
    }"#;
    let response = app.oneshot(chat_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = agent.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, "Что нового?");
    assert_eq!(calls[0].session_id.as_deref(), Some("session-777"));
    assert_eq!(
        calls[0].context,
        vec![
            ContextMessage {
                role: "system".to_string(),
                content: "Ты дружелюбный помощник".to_string(),
            },
            ContextMessage {
                role: "user".to_string(),
                content: "Привет".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let agent = Arc::new(RecordingAgent::default());
    let app = create_router().with_state(state_with(agent.clone()));

    let response = app
        .oneshot(chat_request(r#"{"question": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!error.detail.is_empty());
    assert!(agent.calls().is_empty(), "agent must not be called");
}

#[tokio::test]
async fn test_agent_failure_maps_to_bad_gateway() {
    let agent = Arc::new(RecordingAgent::failing());
    let app = create_router().with_state(state_with(agent));

    let response = app
        .oneshot(chat_request(r#"{"question": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(error.detail.contains("500"));
    assert!(error.detail.contains("boom"));
}

#[tokio::test]
async fn test_invalid_bodies_return_detail_json() {
    let app = create_router().with_state(state_with(Arc::new(RecordingAgent::default())));

    for body in [r#"{"session_id": "x"}"#, "not json", r#"{"question": 5}"#] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert!(response.status().is_client_error(), "body: {body}");
        let error: ErrorBody = serde_json::from_slice(&body_bytes(response).await)
            .unwrap_or_else(|e| panic!("body {body}: response is not {{\"detail\"}} JSON: {e}"));
        assert!(!error.detail.is_empty());
    }

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .body(Body::from(r#"{"question": "hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!error.detail.is_empty());
}

#[tokio::test]
async fn test_question_is_trimmed_before_forwarding() {
    let agent = Arc::new(RecordingAgent::default());
    let app = create_router().with_state(state_with(agent.clone()));

    let response = app
        .oneshot(chat_request(r#"{"question": "  Что нового?\n"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(agent.calls()[0].prompt, "Что нового?");
}

#[tokio::test]
async fn test_health_and_root() {
    let app = create_router().with_state(state_with(Arc::new(RecordingAgent::default())));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(health["status"], "ok");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let root: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(root["service"], "timeweb-ai-chatbot");
    assert_eq!(root["env"], "development");
}

#[tokio::test]
async fn test_widget_page_and_script() {
    let app = create_router().with_state(state_with(Arc::new(RecordingAgent::default())));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/widget").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(page.contains(r#"class="twb-chatbot" data-api-endpoint="/chat""#));
    assert!(page.contains(r#"aria-expanded="false""#));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/widget/chatbot.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript; charset=utf-8"
    );
    let script = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(script.contains("data-api-endpoint is missing"));
}

#[tokio::test]
async fn test_static_files_and_cors() {
    let dir = std::env::temp_dir().join(format!("twb-public-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("embed.html"), "<p>embed</p>").unwrap();

    let settings = Settings {
        public_dir: dir.clone(),
        ..Settings::default()
    };
    let state = Arc::new(AppState::new(settings, Arc::new(RecordingAgent::default())));
    let app = build_app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/embed.html")
                .header("origin", "https://shop.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("access-control-allow-origin"));
    assert_eq!(body_bytes(response).await, b"<p>embed</p>");

    let response = app
        .oneshot(Request::builder().uri("/missing.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).ok();
}
