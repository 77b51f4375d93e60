//! Error types for validation, submission, and markup.

use thiserror::Error;

/// Errors raised while building validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Message text was empty or whitespace only.
    #[error("message text must not be empty")]
    EmptyText,

    /// A message was built with a type the Studio does not support.
    #[error("unsupported message type '{0}'. Valid types: error, warning, not-configured")]
    UnsupportedType(String),

    /// A message type string could not be parsed.
    #[error("unknown message type '{0}'. Valid types: error, warning, not-configured")]
    UnknownMessageType(String),
}

/// Failure reaching the reset endpoint at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or its response could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Request(error_chain(&e))
    }
}

/// Join an error and its sources, outermost first.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Password reset submission failure.
///
/// Network failures and non-success statuses are not interpreted further;
/// both are handed to listeners as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The address was rejected before anything was sent.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("endpoint responded with status {status}")]
    Status { status: u16, body: String },
}

impl SubmissionError {
    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Status { status, .. } => Some(*status),
            SubmissionError::InvalidEmail(_) | SubmissionError::Transport(_) => None,
        }
    }
}

/// Errors from [`crate::markup::format_html`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("no value supplied for placeholder '{{{0}}}'")]
    MissingArgument(String),

    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}
