//! Validation results for a single Studio component.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::i18n::Translator;

use super::summary::{ValidationMessages, ValidationState};
use super::types::{MessageAction, MessageType, ValidationMessage};

/// Validation results of one component: its messages and an optional summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudioValidation {
    pub xblock_id: String,

    #[serde(default)]
    pub messages: Vec<ValidationMessage>,

    #[serde(default)]
    pub summary: Option<ValidationMessage>,
}

impl StudioValidation {
    pub fn new(xblock_id: impl Into<String>) -> Self {
        Self {
            xblock_id: xblock_id.into(),
            messages: Vec::new(),
            summary: None,
        }
    }

    /// Copy the id and messages of another validation. The summary is not
    /// carried over.
    pub fn copy(validation: &StudioValidation) -> Self {
        Self {
            xblock_id: validation.xblock_id.clone(),
            messages: validation.messages.clone(),
            summary: None,
        }
    }

    /// Build a message, rejecting empty text and unsupported types.
    pub fn create_message(
        message_type: MessageType,
        text: impl Into<String>,
        action: MessageAction,
    ) -> Result<ValidationMessage, ValidationError> {
        if !message_type.is_known() {
            return Err(ValidationError::UnsupportedType(message_type.to_string()));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(ValidationMessage::new(message_type, text).with_action(action))
    }

    /// Append a message.
    pub fn add(
        &mut self,
        message_type: MessageType,
        text: impl Into<String>,
        action: MessageAction,
    ) -> Result<(), ValidationError> {
        self.messages
            .push(Self::create_message(message_type, text, action)?);
        Ok(())
    }

    /// Replace the summary.
    pub fn set_summary(
        &mut self,
        message_type: MessageType,
        text: impl Into<String>,
        action: MessageAction,
    ) -> Result<(), ValidationError> {
        self.summary = Some(Self::create_message(message_type, text, action)?);
        Ok(())
    }

    /// True when there are no messages and no summary.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.summary.is_none()
    }

    /// Append the messages of `other`. Id and summary of `self` are kept.
    pub fn merge(mut self, other: StudioValidation) -> Self {
        self.messages.extend(other.messages);
        self
    }

    /// JSON form: `xblock_id`, `messages`, `summary` when set, and `is_empty`.
    pub fn to_json(&self) -> Value {
        let mut json = serde_json::json!({
            "xblock_id": self.xblock_id,
            "messages": self.messages,
            "is_empty": self.is_empty(),
        });
        if let (Some(summary), Some(obj)) = (&self.summary, json.as_object_mut()) {
            obj.insert("summary".to_string(), serde_json::json!(summary));
        }
        json
    }

    /// Display view of these results.
    pub fn summarize(
        &self,
        translator: Arc<dyn Translator>,
        is_root: bool,
        show_summary_only: bool,
    ) -> ValidationMessages {
        let state = ValidationState {
            summary: self.summary.clone().map(Into::into).unwrap_or_default(),
            messages: self.messages.clone(),
            show_summary_only,
            is_root,
        };
        ValidationMessages::new(state, translator)
    }
}

impl std::ops::Add for StudioValidation {
    type Output = StudioValidation;

    fn add(self, rhs: StudioValidation) -> StudioValidation {
        self.merge(rhs)
    }
}
