// src/widget/host.rs
use std::collections::{HashMap, HashSet};

use super::component::{ChatWidget, ENDPOINT_ATTRIBUTE, WidgetConfig};
use super::view::{ROOT_CLASS, STYLE_ID};

/// Minimal description of an element on the embedding page.
#[derive(Clone, Debug, Default)]
pub struct HostElement {
    pub classes: Vec<String>,
    /// `data-*` attributes with the prefix stripped, e.g. `api-endpoint`.
    pub dataset: HashMap<String, String>,
}

impl HostElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// A `.twb-chatbot` root pointing at `endpoint`.
    pub fn widget_root(endpoint: impl Into<String>) -> Self {
        Self::new()
            .with_class(ROOT_CLASS)
            .with_data(ENDPOINT_ATTRIBUTE, endpoint)
    }

    pub fn is_widget_root(&self) -> bool {
        self.classes.iter().any(|c| c == ROOT_CLASS)
    }
}

/// The page a widget is embedded into.
#[derive(Clone, Debug, Default)]
pub struct HostPage {
    elements: Vec<HostElement>,
    style_ids: HashSet<String>,
}

impl HostPage {
    pub fn new(elements: Vec<HostElement>) -> Self {
        Self {
            elements,
            style_ids: HashSet::new(),
        }
    }

    pub fn has_style(&self, id: &str) -> bool {
        self.style_ids.contains(id)
    }

    /// Insert a stylesheet unless one with the same id exists. Returns whether
    /// it was inserted.
    pub fn inject_style(&mut self, id: &str) -> bool {
        self.style_ids.insert(id.to_string())
    }

    /// Mount a widget on the first root. No root means no widget, silently.
    pub fn mount(&mut self) -> Option<ChatWidget> {
        let root = self.elements.iter().find(|e| e.is_widget_root())?.clone();
        self.mount_root(&root)
    }

    /// Mount one independent widget per root on the page.
    pub fn mount_all(&mut self) -> Vec<ChatWidget> {
        let roots: Vec<HostElement> = self
            .elements
            .iter()
            .filter(|e| e.is_widget_root())
            .cloned()
            .collect();
        roots.iter().filter_map(|root| self.mount_root(root)).collect()
    }

    fn mount_root(&mut self, root: &HostElement) -> Option<ChatWidget> {
        let config = match WidgetConfig::from_dataset(&root.dataset) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(error = %err, "chat widget not mounted");
                return None;
            }
        };

        if self.inject_style(STYLE_ID) {
            tracing::debug!(id = STYLE_ID, "injected widget stylesheet");
        }
        Some(ChatWidget::new(config))
    }
}
