// src/widget/dialog.rs
use std::time::Duration;

/// Delay before focusing the input, so the open animation finishes first.
pub const INPUT_FOCUS_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// Element that should receive keyboard focus after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    ToggleButton,
    Input,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusRequest {
    pub target: FocusTarget,
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }

    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dialog {
    state: DialogState,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn open(&mut self) -> Option<FocusRequest> {
        if self.is_open() {
            return None;
        }
        self.state = DialogState::Open;
        Some(FocusRequest {
            target: FocusTarget::Input,
            delay: INPUT_FOCUS_DELAY,
        })
    }

    pub fn close(&mut self) -> Option<FocusRequest> {
        if !self.is_open() {
            return None;
        }
        self.state = DialogState::Closed;
        Some(FocusRequest {
            target: FocusTarget::ToggleButton,
            delay: Duration::ZERO,
        })
    }

    /// Key pressed while the toggle button has focus.
    pub fn activate_toggle(&mut self, key: Key) -> Option<FocusRequest> {
        if key.activates() { self.open() } else { None }
    }

    /// Key pressed while the close button has focus.
    pub fn activate_close(&mut self, key: Key) -> Option<FocusRequest> {
        if key.activates() { self.close() } else { None }
    }

    pub fn toggle_hidden(&self) -> bool {
        self.is_open()
    }

    pub fn panel_hidden(&self) -> bool {
        !self.is_open()
    }

    pub fn aria_expanded(&self) -> bool {
        self.is_open()
    }
}
