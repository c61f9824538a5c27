// src/services/agent.rs
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Settings;
use crate::message::ContextMessage;

const RUN_PATH: &str = "/api/v1/ai-agents/run";

/// Failures talking to the upstream AI agent. The display text ends up in the
/// `detail` field of a 502 response and is shown to the widget user as-is.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Timeweb агент вернул ошибку {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Не удалось связаться с Timeweb агентом")]
    Transport(#[source] reqwest::Error),

    #[error("Некорректный JSON от Timeweb агента")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Ответ Timeweb агента не содержит поле output.answer")]
    MissingAnswer,

    #[error("Поле output.answer должно быть строкой")]
    AnswerNotString,

    #[error("API token contains characters not allowed in a header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Something that can answer a user's question.
#[async_trait]
pub trait AnswerAgent: Send + Sync {
    async fn get_answer(
        &self,
        prompt: &str,
        context: &[ContextMessage],
        session_id: Option<&str>,
    ) -> Result<String, AgentError>;
}

#[derive(Serialize)]
struct RunRequest<'a> {
    agent_id: &'a str,
    input: RunInput<'a>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

#[derive(Serialize)]
struct RunInput<'a> {
    prompt: &'a str,
    context: &'a [ContextMessage],
}

#[derive(Serialize, Clone, Copy)]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
}

#[derive(Clone, Debug)]
pub struct TimewebAgentClient {
    client: Client,
    endpoint: String,
    agent_id: String,
    generation: (f64, f64),
}

impl TimewebAgentClient {
    pub fn new(settings: &Settings) -> Result<Self, AgentError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.timeweb_api_token))
            .map_err(|_| AgentError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(AgentError::Build)?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", settings.timeweb_api_base, RUN_PATH),
            agent_id: settings.timeweb_agent_id.clone(),
            generation: (settings.timeweb_temperature, settings.timeweb_top_p),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerAgent for TimewebAgentClient {
    async fn get_answer(
        &self,
        prompt: &str,
        context: &[ContextMessage],
        session_id: Option<&str>,
    ) -> Result<String, AgentError> {
        let (temperature, top_p) = self.generation;
        let payload = RunRequest {
            agent_id: &self.agent_id,
            input: RunInput { prompt, context },
            generation_config: GenerationConfig { temperature, top_p },
            session_id,
        };

        tracing::debug!(endpoint = %self.endpoint, context_len = context.len(), "querying agent");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(AgentError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(AgentError::Transport)?;

        if !status.is_success() {
            return Err(AgentError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let data: Value = serde_json::from_slice(&body).map_err(AgentError::InvalidJson)?;
        extract_answer(&data)
    }
}

fn extract_answer(data: &Value) -> Result<String, AgentError> {
    let answer = data
        .get("output")
        .and_then(|output| output.get("answer"))
        .ok_or(AgentError::MissingAnswer)?;

    answer
        .as_str()
        .map(str::to_string)
        .ok_or(AgentError::AnswerNotString)
}
