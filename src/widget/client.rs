// src/widget/client.rs
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::message::ChatRequest;

pub const NO_ANSWER_TEXT: &str = "Извините, ответ не получен.";
pub const CONNECTION_ERROR_TEXT: &str =
    "Произошла ошибка при получении ответа. Пожалуйста, попробуйте позже.";

/// Which request body the backend expects. Older deployments correlate turns
/// through `session_id`; newer ones only read `question`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestSchema {
    #[default]
    QuestionOnly,
    WithSession,
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("server responded with status {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl WidgetError {
    /// Text placed in the transcript's error bubble.
    pub fn user_message(&self) -> String {
        match self {
            WidgetError::Http {
                status,
                detail: Some(detail),
            } => format!("Ошибка сервера: {status}. {detail}"),
            WidgetError::Http { status, detail: None } => format!("Ошибка сервера: {status}"),
            WidgetError::Transport(_) => CONNECTION_ERROR_TEXT.to_string(),
        }
    }
}

/// Sends one question per call. No retries, no timeout, no cancellation.
#[derive(Clone, Debug, Default)]
pub struct WidgetClient {
    http: Client,
}

impl WidgetClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    pub async fn ask(&self, endpoint: &str, request: &ChatRequest) -> Result<String, WidgetError> {
        let response = self.http.post(endpoint).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // An unparseable body is treated as absent.
        let body: Option<Value> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            return Err(WidgetError::Http {
                status: status.as_u16(),
                detail: body.as_ref().and_then(detail_of),
            });
        }

        let answer = body
            .as_ref()
            .and_then(|b| b.get("answer"))
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty());

        Ok(match answer {
            Some(answer) => answer.to_string(),
            None => {
                tracing::warn!(endpoint, "response carried no answer");
                NO_ANSWER_TEXT.to_string()
            }
        })
    }
}

fn detail_of(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Validation errors arrive as structured lists.
        other => Some(other.to_string()),
    }
}
