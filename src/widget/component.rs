// src/widget/component.rs
use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use super::client::{RequestSchema, WidgetClient, WidgetError};
use super::dialog::{Dialog, FocusRequest, Key};
use super::transcript::{MessageId, Role, Transcript};
use super::view;
use crate::message::ChatRequest;

pub const DEFAULT_TITLE: &str = "AI-помощник";
pub const TYPING_TEXT: &str = "Думаю над ответом...";

/// Dataset key (`data-api-endpoint`) carrying the endpoint URL.
pub const ENDPOINT_ATTRIBUTE: &str = "api-endpoint";
pub const SCHEMA_ATTRIBUTE: &str = "request-schema";
pub const TITLE_ATTRIBUTE: &str = "title";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("widget root has no data-api-endpoint attribute")]
    MissingEndpoint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: String,
    pub schema: RequestSchema,
    pub title: String,
}

impl WidgetConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            schema: RequestSchema::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_schema(mut self, schema: RequestSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Read configuration from a root element's `data-*` attributes.
    pub fn from_dataset(dataset: &HashMap<String, String>) -> Result<Self, MountError> {
        let endpoint = dataset
            .get(ENDPOINT_ATTRIBUTE)
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .ok_or(MountError::MissingEndpoint)?;

        let schema = match dataset.get(SCHEMA_ATTRIBUTE).map(String::as_str) {
            Some("session") => RequestSchema::WithSession,
            _ => RequestSchema::QuestionOnly,
        };

        let mut config = Self::new(endpoint).with_schema(schema);
        if let Some(title) = dataset.get(TITLE_ATTRIBUTE).filter(|t| !t.trim().is_empty()) {
            config.title = title.clone();
        }
        Ok(config)
    }
}

/// Returned by [`ChatWidget::submit`]; ties the outgoing request to the
/// placeholder that its reply must replace.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReply {
    pub placeholder: MessageId,
    pub request: ChatRequest,
}

#[derive(Clone, Debug)]
pub struct ChatWidget {
    config: WidgetConfig,
    dialog: Dialog,
    transcript: Transcript,
    input: String,
    session_id: Option<String>,
    /// Distinguishes this instance's element ids from other widgets on the page.
    key: String,
}

impl ChatWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let session_id = match config.schema {
            RequestSchema::WithSession => Some(Uuid::new_v4().to_string()),
            RequestSchema::QuestionOnly => None,
        };
        Self {
            config,
            dialog: Dialog::new(),
            transcript: Transcript::new(),
            input: String::new(),
            session_id,
            key: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn open(&mut self) -> Option<FocusRequest> {
        self.dialog.open()
    }

    pub fn close(&mut self) -> Option<FocusRequest> {
        self.dialog.close()
    }

    pub fn toggle_key(&mut self, key: Key) -> Option<FocusRequest> {
        self.dialog.activate_toggle(key)
    }

    pub fn close_key(&mut self, key: Key) -> Option<FocusRequest> {
        self.dialog.activate_close(key)
    }

    /// Move the current input into the transcript and prepare its request.
    /// Blank input is ignored.
    pub fn submit(&mut self) -> Option<PendingReply> {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.transcript.push(Role::User, question.clone());
        self.input.clear();
        let placeholder = self.transcript.push(Role::Typing, TYPING_TEXT);

        let mut request = ChatRequest::new(question);
        if let Some(session_id) = &self.session_id {
            request = request.with_session(session_id.clone());
        }

        Some(PendingReply {
            placeholder,
            request,
        })
    }

    /// Replace the pending placeholder with the answer or an error bubble.
    pub fn complete(
        &mut self,
        pending: &PendingReply,
        outcome: Result<String, WidgetError>,
    ) -> MessageId {
        match outcome {
            Ok(answer) => self
                .transcript
                .resolve(pending.placeholder, Role::Agent, answer),
            Err(err) => {
                tracing::error!(endpoint = %self.config.endpoint, error = %err, "chat request failed");
                self.transcript
                    .resolve(pending.placeholder, Role::Error, err.user_message())
            }
        }
    }

    /// Submit, send and complete in one step. Returns the resolved bubble, or
    /// `None` when the input was blank and nothing was sent.
    pub async fn ask(&mut self, client: &WidgetClient) -> Option<MessageId> {
        let pending = self.submit()?;
        let outcome = client.ask(&self.config.endpoint, &pending.request).await;
        Some(self.complete(&pending, outcome))
    }

    pub fn render(&self) -> String {
        view::render_widget(self)
    }
}
