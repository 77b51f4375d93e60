//! Validation message types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Severity of a validation message.
///
/// Serialized as its bare string. Deserialization keeps unrecognized strings
/// as [`MessageType::Other`] so a summary can still be computed over them;
/// [`FromStr`] rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    Error,
    Warning,
    /// The component has not been set up yet. Ranks as a warning.
    NotConfigured,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::NotConfigured => "not-configured",
            MessageType::Other(s) => s,
        }
    }

    /// Whether this is one of the three types the Studio knows about.
    pub fn is_known(&self) -> bool {
        !matches!(self, MessageType::Other(_))
    }
}

impl Default for MessageType {
    /// An untyped message. Never ranks as an error.
    fn default() -> Self {
        MessageType::Other(String::new())
    }
}

impl From<String> for MessageType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "error" => MessageType::Error,
            "warning" => MessageType::Warning,
            "not-configured" => MessageType::NotConfigured,
            _ => MessageType::Other(s),
        }
    }
}

impl From<MessageType> for String {
    fn from(t: MessageType) -> Self {
        match t {
            MessageType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match MessageType::from(s.to_string()) {
            MessageType::Other(other) => Err(ValidationError::UnknownMessageType(other)),
            known => Ok(known),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional call to action attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageAction {
    pub label: Option<String>,
    pub class: Option<String>,
    pub runtime_event: Option<String>,
}

impl MessageAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button label shown next to the message.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the CSS class of the action button.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the runtime event fired when the action is clicked.
    pub fn runtime_event(mut self, event: impl Into<String>) -> Self {
        self.runtime_event = Some(event.into());
        self
    }
}

/// A single validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    #[serde(rename = "type", default)]
    pub message_type: MessageType,

    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_runtime_event: Option<String>,
}

impl ValidationMessage {
    /// Create a message without an action.
    pub fn new(message_type: MessageType, text: impl Into<String>) -> Self {
        Self {
            message_type,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Attach an action. Empty action fields are dropped.
    pub fn with_action(mut self, action: MessageAction) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        self.action_label = non_empty(action.label);
        self.action_class = non_empty(action.class);
        self.action_runtime_event = non_empty(action.runtime_event);
        self
    }

    pub fn is_error(&self) -> bool {
        self.message_type == MessageType::Error
    }
}

/// Summary record shown above the detail list.
///
/// Both `text` and `type` may be missing in input; `type` is filled in before
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_runtime_event: Option<String>,
}

impl SummaryMessage {
    /// A summary with text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set an explicit type.
    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    /// True when the summary carries usable text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl From<ValidationMessage> for SummaryMessage {
    fn from(m: ValidationMessage) -> Self {
        Self {
            text: Some(m.text),
            message_type: Some(m.message_type),
            action_label: m.action_label,
            action_class: m.action_class,
            action_runtime_event: m.action_runtime_event,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_contains_studio_types() {
        for s in ["error", "warning", "not-configured"] {
            let t: MessageType = s.parse().unwrap();
            assert!(t.is_known());
            assert_eq!(t.as_str(), s);
        }
    }

    #[test]
    fn test_message_type_parse_rejects_unknown() {
        let err = "info".parse::<MessageType>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownMessageType("info".to_string()));
    }

    #[test]
    fn test_message_type_deserialize_keeps_unknown() {
        let t: MessageType = serde_json::from_str(r#""info""#).unwrap();
        assert_eq!(t, MessageType::Other("info".to_string()));
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""info""#);
    }

    #[test]
    fn test_message_serialization_omits_missing_actions() {
        let message = ValidationMessage::new(MessageType::Warning, "Warning message");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({"type": "warning", "text": "Warning message"})
        );
    }

    #[test]
    fn test_message_with_action() {
        let message = ValidationMessage::new(MessageType::Warning, "Warning message").with_action(
            MessageAction::new()
                .label("Action label")
                .runtime_event("create groups")
                .class(""),
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({
                "type": "warning",
                "text": "Warning message",
                "action_label": "Action label",
                "action_runtime_event": "create groups"
            })
        );
    }

    #[test]
    fn test_summary_null_type_deserializes_as_none() {
        let summary: SummaryMessage =
            serde_json::from_str(r#"{"text": "Summary", "type": null}"#).unwrap();
        assert_eq!(summary.message_type, None);
        assert!(summary.has_text());

        let empty: SummaryMessage = serde_json::from_str("{}").unwrap();
        assert!(!empty.has_text());
    }
}
