//! Read-only cookie lookup for the anti-forgery token.

use std::collections::HashMap;

/// Source of cookie values.
pub trait CookieStore: Send + Sync {
    /// Value of the named cookie, if set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Cookies parsed from a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: HashMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header value such as `sessionid=abc; csrftoken=xyz`.
    ///
    /// Pairs without `=` are skipped. Values are percent-decoded when they
    /// decode cleanly; a later duplicate name wins.
    pub fn parse(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let value = value.trim().trim_matches('"');
                let value = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                Some((name.to_string(), value))
            })
            .collect();
        Self { cookies }
    }

    /// Add or replace a cookie.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}
