//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ViewSnapshot;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    ViewUpdated(Box<ViewSnapshot>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Settings,
    Dispatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("settings")
            || message_lower.contains("endpoint")
            || message_lower.contains("invalid value")
            || message_lower.contains("parse")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Whether relaunching with different settings is the only way forward.
    pub fn requires_restart(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
            || self.category == UiErrorCategory::Configuration
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Configuration => "Settings",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Unknown => "Error",
    }
}
