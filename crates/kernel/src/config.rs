//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::password_reset::{DEFAULT_CSRF_COOKIE, PasswordResetConfig, PayloadMode};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Public site URL that relative endpoints resolve against
    /// (default: http://localhost:8000).
    pub site_url: String,

    /// Password reset endpoint as configured (default: /account/password).
    pub reset_endpoint: String,

    /// `reset_endpoint` resolved against `site_url`.
    pub reset_endpoint_url: String,

    /// Name of the anti-forgery cookie (default: csrftoken).
    pub csrf_cookie_name: String,

    /// Request body contents: "email" (default) or "all".
    pub reset_payload: PayloadMode,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let site_url =
            lookup("SITE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let base = Url::parse(&site_url).context("SITE_URL must be an absolute URL")?;

        let reset_endpoint =
            lookup("RESET_ENDPOINT_URL").unwrap_or_else(|| "/account/password".to_string());
        let reset_endpoint_url = join_endpoint(&base, &reset_endpoint)
            .context("RESET_ENDPOINT_URL must be a valid URL or path")?;

        let csrf_cookie_name =
            lookup("CSRF_COOKIE_NAME").unwrap_or_else(|| DEFAULT_CSRF_COOKIE.to_string());

        let reset_payload = match lookup("RESET_PAYLOAD")
            .unwrap_or_else(|| "email".to_string())
            .to_lowercase()
            .as_str()
        {
            "email" => PayloadMode::EmailOnly,
            "all" => PayloadMode::AllAttributes,
            other => bail!("RESET_PAYLOAD must be 'email' or 'all', got '{other}'"),
        };

        Ok(Self {
            site_url,
            reset_endpoint,
            reset_endpoint_url,
            csrf_cookie_name,
            reset_payload,
        })
    }

    /// Resolve an endpoint URL or path against `site_url`. Absolute URLs are
    /// returned unchanged.
    pub fn resolve_endpoint(&self, endpoint: &str) -> Result<String> {
        let base = Url::parse(&self.site_url).context("SITE_URL must be an absolute URL")?;
        join_endpoint(&base, endpoint)
            .with_context(|| format!("'{endpoint}' is not a valid endpoint URL or path"))
    }

    /// Settings for a [`crate::password_reset::PasswordResetFlow`].
    pub fn password_reset(&self) -> PasswordResetConfig {
        PasswordResetConfig::new(&self.reset_endpoint_url)
            .form_url(&self.reset_endpoint)
            .csrf_cookie_name(&self.csrf_cookie_name)
            .payload(self.reset_payload)
    }

    /// Like [`password_reset`](Self::password_reset), posting to `endpoint`
    /// instead of the configured endpoint when one is given.
    pub fn password_reset_for(&self, endpoint: Option<&str>) -> Result<PasswordResetConfig> {
        let Some(endpoint) = endpoint else {
            return Ok(self.password_reset());
        };
        Ok(PasswordResetConfig::new(self.resolve_endpoint(endpoint)?)
            .form_url(endpoint)
            .csrf_cookie_name(&self.csrf_cookie_name)
            .payload(self.reset_payload))
    }
}

fn join_endpoint(base: &Url, endpoint: &str) -> Result<String, url::ParseError> {
    Ok(base.join(endpoint)?.to_string())
}
