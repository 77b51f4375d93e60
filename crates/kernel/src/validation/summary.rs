//! Summarizing a component's validation messages for display.
//!
//! Given the raw messages of one component, derives the summary line and its
//! severity, the detail lines to render, and a CSS class hint for the
//! container.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::i18n::{PassThrough, Translator};

use super::types::{MessageType, SummaryMessage, ValidationMessage};

/// Fallback summary text when none is supplied.
pub const DEFAULT_SUMMARY_TEXT: &str = "This component has validation issues.";

/// Class added to a root container that has nothing to show but a
/// not-configured summary.
pub const NO_CONTENT_CLASS: &str = "no-container-content";

/// Raw validation results of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    #[serde(default)]
    pub summary: SummaryMessage,

    #[serde(default, alias = "detailed_messages")]
    pub messages: Vec<ValidationMessage>,

    #[serde(default)]
    pub show_summary_only: bool,

    #[serde(default)]
    pub is_root: bool,
}

/// Severity of a message list: `error` if any message is an error, otherwise
/// `warning`.
///
/// An empty list is also `warning`; it does not mean "no issues".
pub fn summary_type(messages: &[ValidationMessage]) -> MessageType {
    if messages.iter().any(ValidationMessage::is_error) {
        MessageType::Error
    } else {
        MessageType::Warning
    }
}

/// Display-side view over a [`ValidationState`].
#[derive(Clone)]
pub struct ValidationMessages {
    state: ValidationState,
    translator: Arc<dyn Translator>,
}

impl std::fmt::Debug for ValidationMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationMessages")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ValidationMessages {
    pub fn new(state: ValidationState, translator: Arc<dyn Translator>) -> Self {
        Self { state, translator }
    }

    /// Build from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str, translator: Arc<dyn Translator>) -> serde_json::Result<Self> {
        let state = serde_json::from_str(json)?;
        Ok(Self::new(state, translator))
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// The summary to display, with its type always resolved.
    pub fn get_summary_message(&self) -> SummaryMessage {
        let mut summary = if self.state.summary.has_text() {
            self.state.summary.clone()
        } else {
            SummaryMessage::text(self.translator.translate(DEFAULT_SUMMARY_TEXT))
        };

        if summary.message_type.is_none() {
            summary.message_type = Some(self.get_summary_type());
        }
        summary
    }

    /// Severity derived from the detailed messages.
    pub fn get_summary_type(&self) -> MessageType {
        summary_type(&self.state.messages)
    }

    /// Prefix label for a message type, or `None` when no prefix is shown.
    pub fn get_display_name(&self, message_type: Option<&MessageType>) -> Option<String> {
        match message_type {
            // Prefix for warnings, e.g. "Warning: this component has not been configured yet".
            Some(MessageType::Warning) => Some(self.translator.translate("Warning")),
            // Prefix for errors, e.g. "Error: required field is missing".
            Some(MessageType::Error) => Some(self.translator.translate("Error")),
            _ => None,
        }
    }

    /// Detail lines to render.
    pub fn get_detailed_messages(&self) -> &[ValidationMessage] {
        if self.state.show_summary_only {
            return &[];
        }
        &self.state.messages
    }

    /// Extra CSS classes for the enclosing container.
    pub fn get_additional_classes(&self) -> &'static str {
        let summary = self.get_summary_message();
        if self.state.is_root
            && summary.message_type == Some(MessageType::NotConfigured)
            && self.get_detailed_messages().is_empty()
        {
            return NO_CONTENT_CLASS;
        }
        ""
    }

    /// Summary line with its display prefix, e.g. `"Warning: text"`.
    pub fn summary_line(&self) -> String {
        let summary = self.get_summary_message();
        let text = summary.text.unwrap_or_default();
        match self.get_display_name(summary.message_type.as_ref()) {
            Some(prefix) => format!("{prefix}: {text}"),
            None => text,
        }
    }
}

impl From<ValidationState> for ValidationMessages {
    fn from(state: ValidationState) -> Self {
        Self::new(state, Arc::new(PassThrough))
    }
}
