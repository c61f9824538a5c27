//! Headless core of the embeddable chat widget: transcript, dialog state,
//! the network call, and a pure markup projection of all three.

pub mod client;
pub mod component;
pub mod dialog;
pub mod escape;
pub mod host;
pub mod transcript;
pub mod view;

pub use client::{RequestSchema, WidgetClient, WidgetError};
pub use component::{ChatWidget, MountError, PendingReply, WidgetConfig};
pub use dialog::{Dialog, DialogState, FocusRequest, FocusTarget, Key};
pub use host::{HostElement, HostPage};
pub use transcript::{Message, MessageId, Role, Transcript};
