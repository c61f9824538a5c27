use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let question = payload.question.trim();

    if question.is_empty() {
        return Err(AppError::BadRequest("Question cannot be empty".to_string()));
    }

    tracing::info!(
        session_id = payload.session_id.as_deref().unwrap_or("-"),
        context_len = payload.context.len(),
        "chat question received"
    );

    let answer = state
        .agent
        .get_answer(question, &payload.context, payload.session_id.as_deref())
        .await?;

    Ok(Json(ChatResponse { answer }))
}

pub async fn root_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "service": "timeweb-ai-chatbot",
        "env": state.settings.app_env,
    }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
