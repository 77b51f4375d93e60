//! Courseware Kernel Library
//!
//! Studio component validation summaries and password reset submission.
//! The `courseware` binary wraps these for command-line use.

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod markup;
pub mod password_reset;
pub mod validation;

pub use config::Config;
pub use error::{MarkupError, SubmissionError, TransportError, ValidationError};
