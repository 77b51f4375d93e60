//! CLI command implementations.
//!
//! Each command prints its result to stdout and returns an error for the
//! binary to report.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::i18n::PassThrough;
use crate::password_reset::{CookieJar, HttpTransport, PasswordResetFlow};
use crate::validation::{StudioValidation, ValidationMessages};

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Render the lines a validation panel would show.
pub fn render_summary(view: &ValidationMessages) -> Vec<String> {
    let mut lines = vec![view.summary_line()];
    for message in view.get_detailed_messages() {
        let line = match view.get_display_name(Some(&message.message_type)) {
            Some(prefix) => format!("  - {prefix}: {}", message.text),
            None => format!("  - {}", message.text),
        };
        lines.push(line);
    }
    let classes = view.get_additional_classes();
    if !classes.is_empty() {
        lines.push(format!("classes: {classes}"));
    }
    lines
}

/// Summarize a validation state JSON document.
pub fn cmd_summarize(path: &Path) -> Result<()> {
    let input = read_input(path)?;
    let view = ValidationMessages::from_json(&input, Arc::new(PassThrough))
        .context("input is not a validation state")?;

    for line in render_summary(&view) {
        println!("{line}");
    }
    Ok(())
}

/// Normalize a Studio validation JSON document.
pub fn cmd_studio_json(path: &Path) -> Result<()> {
    let input = read_input(path)?;
    let validation: StudioValidation =
        serde_json::from_str(&input).context("input is not a Studio validation")?;

    println!("{}", serde_json::to_string_pretty(&validation.to_json())?);
    Ok(())
}

/// Request a password reset email.
pub async fn cmd_reset_password(
    config: &Config,
    email: &str,
    endpoint: Option<&str>,
    cookie_header: Option<&str>,
) -> Result<()> {
    let reset = config.password_reset_for(endpoint)?;
    let cookies = cookie_header.map(CookieJar::parse).unwrap_or_default();

    let flow = PasswordResetFlow::new(reset, Arc::new(HttpTransport::new()), Arc::new(cookies));
    info!(url = %flow.config().endpoint_url, "submitting password reset request");

    flow.submit(email)
        .await
        .context("password reset request failed")?;

    println!("Password reset requested for {email}.");
    Ok(())
}
