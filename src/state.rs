// src/state.rs
use std::sync::Arc;

use crate::config::Settings;
use crate::services::agent::{AgentError, AnswerAgent, TimewebAgentClient};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub settings: Settings,
    pub agent: Arc<dyn AnswerAgent>,
}

impl AppState {
    pub fn new(settings: Settings, agent: Arc<dyn AnswerAgent>) -> Self {
        Self { settings, agent }
    }

    /// State backed by the real Timeweb agent client.
    pub fn from_settings(settings: Settings) -> Result<Self, AgentError> {
        let agent = TimewebAgentClient::new(&settings)?;
        Ok(Self::new(settings, Arc::new(agent)))
    }
}
