#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use timeweb_chatbot::config::Settings;
use timeweb_chatbot::message::ContextMessage;
use timeweb_chatbot::services::agent::{AgentError, AnswerAgent};
use timeweb_chatbot::state::{AppState, SharedState};

/// Serve `app` on an ephemeral local port and return its address.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentCall {
    pub prompt: String,
    pub context: Vec<ContextMessage>,
    pub session_id: Option<String>,
}

/// Agent double that records every call.
#[derive(Default)]
pub struct RecordingAgent {
    pub calls: Mutex<Vec<AgentCall>>,
    pub fail: bool,
}

impl RecordingAgent {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerAgent for RecordingAgent {
    async fn get_answer(
        &self,
        prompt: &str,
        context: &[ContextMessage],
        session_id: Option<&str>,
    ) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push(AgentCall {
            prompt: prompt.to_string(),
            context: context.to_vec(),
            session_id: session_id.map(str::to_string),
        });
        if self.fail {
            return Err(AgentError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(format!("Ответ: {prompt}"))
    }
}

pub fn state_with(agent: Arc<RecordingAgent>) -> SharedState {
    Arc::new(AppState::new(Settings::default(), agent))
}
