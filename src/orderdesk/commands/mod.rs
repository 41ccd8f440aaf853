//! # Command Layer
//!
//! One module per user operation. Commands take the store (and whatever session state
//! they need) explicitly, do their work, and report back through a [`CmdResult`]:
//! affected records, listed rows and leveled [`CmdMessage`]s. The messages are the
//! notification channel; UIs decide how to show them (toast, stderr line, ...).
//!
//! Commands never print.

use crate::model::OrderRecord;
use crate::view::OrderView;

pub mod delete;
pub mod load;
pub mod search;
pub mod submit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_orders: Vec<OrderRecord>,
    pub view: Option<OrderView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_orders(mut self, orders: Vec<OrderRecord>) -> Self {
        self.affected_orders = orders;
        self
    }

    pub fn with_view(mut self, view: OrderView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
