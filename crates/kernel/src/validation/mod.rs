//! Studio component validation.
//!
//! - [`StudioValidation`] collects the messages and optional summary of one
//!   component and serializes them for the authoring UI.
//! - [`ValidationMessages`] turns those results into what is displayed: a
//!   summary line with a resolved severity, detail lines, and a CSS hint.

mod studio;
mod summary;
mod types;

pub use studio::StudioValidation;
pub use summary::{
    DEFAULT_SUMMARY_TEXT, NO_CONTENT_CLASS, ValidationMessages, ValidationState, summary_type,
};
pub use types::{MessageAction, MessageType, SummaryMessage, ValidationMessage};
