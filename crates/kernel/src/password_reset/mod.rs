//! Password reset request submission.
//!
//! [`PasswordResetFlow`] POSTs an email address to the reset endpoint with the
//! anti-forgery token from the cookie store, and reports the outcome both as
//! a returned `Result` and to registered listeners.

mod cookies;
mod flow;
mod transport;

pub use cookies::{CookieJar, CookieStore};
pub use flow::{
    CSRF_HEADER, DEFAULT_CSRF_COOKIE, PasswordResetConfig, PasswordResetFlow,
    PasswordResetRequest, PayloadMode, ResetEvent, SubmissionState, is_valid_email,
};
pub use transport::{FormRequest, HttpTransport, Transport, TransportResponse};
