//! Password reset request submission.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SubmissionError;

use super::cookies::CookieStore;
use super::transport::{FormRequest, Transport};

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Default name of the anti-forgery cookie.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Which attributes go into the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadMode {
    /// `email` only.
    #[default]
    EmailOnly,
    /// `email` and `url`, for endpoints expecting the full legacy attribute set.
    AllAttributes,
}

/// Submission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetConfig {
    /// Absolute URL the request is sent to.
    pub endpoint_url: String,
    /// Value of the `url` body field under [`PayloadMode::AllAttributes`].
    /// Falls back to `endpoint_url`.
    pub form_url: Option<String>,
    pub csrf_cookie_name: String,
    pub payload: PayloadMode,
}

impl PasswordResetConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            form_url: None,
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            payload: PayloadMode::default(),
        }
    }

    /// Send `url` in the body as given here, e.g. the unresolved path the
    /// endpoint was configured with.
    pub fn form_url(mut self, url: impl Into<String>) -> Self {
        self.form_url = Some(url.into());
        self
    }

    pub fn csrf_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie_name = name.into();
        self
    }

    pub fn payload(mut self, payload: PayloadMode) -> Self {
        self.payload = payload;
        self
    }
}

/// One submission attempt. Dropped once the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRequest {
    pub email: String,
    pub endpoint_url: String,
}

impl PasswordResetRequest {
    fn into_form(self, config: &PasswordResetConfig, csrf_token: String) -> FormRequest {
        let mut fields = vec![("email".to_string(), self.email)];
        if config.payload == PayloadMode::AllAttributes {
            let url = config.form_url.as_ref().unwrap_or(&self.endpoint_url);
            fields.push(("url".to_string(), url.clone()));
        }
        FormRequest {
            url: self.endpoint_url,
            fields,
            headers: vec![(CSRF_HEADER.to_string(), csrf_token)],
        }
    }
}

/// Where the flow is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Outcome notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetEvent {
    Success,
    Error(SubmissionError),
}

type Listener = Arc<dyn Fn(&ResetEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct Status {
    state: SubmissionState,
    last_error: Option<SubmissionError>,
}

/// Submits password reset requests and reports the outcome.
///
/// Each call to [`submit`](Self::submit) is independent. Concurrent calls are
/// not coalesced; whichever finishes last determines [`state`](Self::state).
pub struct PasswordResetFlow {
    config: PasswordResetConfig,
    transport: Arc<dyn Transport>,
    cookies: Arc<dyn CookieStore>,
    status: RwLock<Status>,
    listeners: RwLock<Vec<Listener>>,
}

impl std::fmt::Debug for PasswordResetFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetFlow")
            .field("config", &self.config)
            .field("status", &*self.status.read())
            .field("listeners", &self.listeners.read().len())
            .finish_non_exhaustive()
    }
}

impl PasswordResetFlow {
    pub fn new(
        config: PasswordResetConfig,
        transport: Arc<dyn Transport>,
        cookies: Arc<dyn CookieStore>,
    ) -> Self {
        Self {
            config,
            transport,
            cookies,
            status: RwLock::new(Status::default()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &PasswordResetConfig {
        &self.config
    }

    /// Register a listener for every event.
    pub fn subscribe(&self, listener: impl Fn(&ResetEvent) + Send + Sync + 'static) {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Register a listener for successful submissions.
    pub fn on_success(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.subscribe(move |event| {
            if matches!(event, ResetEvent::Success) {
                listener();
            }
        });
    }

    /// Register a listener for failed submissions.
    pub fn on_error(&self, listener: impl Fn(&SubmissionError) + Send + Sync + 'static) {
        self.subscribe(move |event| {
            if let ResetEvent::Error(e) = event {
                listener(e);
            }
        });
    }

    pub fn state(&self) -> SubmissionState {
        self.status.read().state
    }

    /// Error of the most recent finished submission, cleared when a new one
    /// starts.
    pub fn last_error(&self) -> Option<SubmissionError> {
        self.status.read().last_error.clone()
    }

    /// POST `email` to the configured endpoint.
    ///
    /// Addresses that fail [`is_valid_email`] are rejected with
    /// [`SubmissionError::InvalidEmail`] without contacting the endpoint.
    pub async fn submit(&self, email: &str) -> Result<(), SubmissionError> {
        if !is_valid_email(email.trim()) {
            let err = SubmissionError::InvalidEmail(email.to_string());
            {
                let mut status = self.status.write();
                status.state = SubmissionState::Failed;
                status.last_error = Some(err.clone());
            }
            warn!(email = %email, "password reset not sent, invalid email address");
            self.emit(&ResetEvent::Error(err.clone()));
            return Err(err);
        }

        {
            let mut status = self.status.write();
            status.state = SubmissionState::Submitting;
            status.last_error = None;
        }

        let token = self
            .cookies
            .get(&self.config.csrf_cookie_name)
            .unwrap_or_else(|| {
                warn!(
                    cookie = %self.config.csrf_cookie_name,
                    "anti-forgery cookie not set, sending empty token"
                );
                String::new()
            });

        let request = PasswordResetRequest {
            email: email.trim().to_string(),
            endpoint_url: self.config.endpoint_url.clone(),
        };
        let form = request.into_form(&self.config, token);

        let result = match self.transport.post_form(&form).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(SubmissionError::Status {
                status: response.status,
                body: response.body,
            }),
            Err(e) => Err(SubmissionError::Transport(e)),
        };

        let event = {
            let mut status = self.status.write();
            match &result {
                Ok(()) => {
                    status.state = SubmissionState::Succeeded;
                    status.last_error = None;
                    info!(email = %email, url = %form.url, "password reset requested");
                    ResetEvent::Success
                }
                Err(e) => {
                    status.state = SubmissionState::Failed;
                    status.last_error = Some(e.clone());
                    warn!(email = %email, url = %form.url, error = %e, "password reset request failed");
                    ResetEvent::Error(e.clone())
                }
            }
        };

        self.emit(&event);
        result
    }

    fn emit(&self, event: &ResetEvent) {
        let listeners: Vec<Listener> = self.listeners.read().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

/// Basic email check: exactly one `@` with non-empty local and domain parts,
/// and a dot in the domain.
pub fn is_valid_email(s: &str) -> bool {
    let parts: Vec<&str> = s.splitn(3, '@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::error::TransportError;
    use crate::password_reset::cookies::CookieJar;
    use crate::password_reset::transport::TransportResponse;

    /// Answers with a fixed status and records what it was sent.
    struct FixedStatus {
        status: u16,
        sent: Mutex<Vec<FormRequest>>,
    }

    impl FixedStatus {
        fn new(status: u16) -> Arc<Self> {
            Arc::new(Self {
                status,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for FixedStatus {
        async fn post_form(
            &self,
            request: &FormRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.sent.lock().push(request.clone());
            Ok(TransportResponse {
                status: self.status,
                body: String::new(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn post_form(&self, _: &FormRequest) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Request("connection refused".to_string()))
        }
    }

    fn cookies() -> Arc<CookieJar> {
        Arc::new(CookieJar::new().with("csrftoken", "secret-token"))
    }

    #[tokio::test]
    async fn test_submit_email_only() {
        let transport = FixedStatus::new(200);
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/account/password"),
            transport.clone(),
            cookies(),
        );
        assert_eq!(flow.state(), SubmissionState::Idle);

        flow.submit("a@b.com").await.unwrap();
        assert_eq!(flow.state(), SubmissionState::Succeeded);

        let sent = transport.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "/account/password");
        assert_eq!(
            sent[0].fields,
            vec![("email".to_string(), "a@b.com".to_string())]
        );
        assert_eq!(sent[0].header(CSRF_HEADER), Some("secret-token"));
    }

    #[tokio::test]
    async fn test_submit_all_attributes() {
        let transport = FixedStatus::new(200);
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/account/password").payload(PayloadMode::AllAttributes),
            transport.clone(),
            cookies(),
        );
        flow.submit("xsy@edx.org").await.unwrap();

        let sent = transport.sent.lock();
        assert_eq!(sent[0].field("email"), Some("xsy@edx.org"));
        assert_eq!(sent[0].field("url"), Some("/account/password"));
    }

    #[tokio::test]
    async fn test_custom_cookie_name_and_missing_cookie() {
        let transport = FixedStatus::new(200);
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/reset").csrf_cookie_name("XSRF-TOKEN"),
            transport.clone(),
            cookies(),
        );
        flow.submit("a@b.com").await.unwrap();
        assert_eq!(transport.sent.lock()[0].header(CSRF_HEADER), Some(""));
    }

    #[tokio::test]
    async fn test_error_status_emits_error() {
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/account/password"),
            FixedStatus::new(500),
            cookies(),
        );
        let successes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));
        {
            let successes = successes.clone();
            flow.on_success(move || {
                successes.fetch_add(1, Ordering::SeqCst);
            });
            let errors = errors.clone();
            flow.on_error(move |e| errors.lock().push(e.clone()));
        }

        let err = flow.submit("a@b.com").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(successes.load(Ordering::SeqCst), 0);
        assert_eq!(errors.lock().as_slice(), &[err.clone()]);
        assert_eq!(flow.state(), SubmissionState::Failed);
        assert_eq!(flow.last_error(), Some(err));
    }

    #[tokio::test]
    async fn test_transport_failure_emits_error() {
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/account/password"),
            Arc::new(Unreachable),
            cookies(),
        );
        let events = Arc::new(Mutex::new(Vec::new()));
        {
            let events = events.clone();
            flow.subscribe(move |e| events.lock().push(e.clone()));
        }

        let err = flow.submit("a@b.com").await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
        assert_eq!(events.lock().as_slice(), &[ResetEvent::Error(err)]);
    }

    #[test]
    fn test_email_rejects_trivially_invalid() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("@@@@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("just a string"));
    }

    #[test]
    fn test_email_accepts_valid() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("xsy@edx.org"));
    }

    #[tokio::test]
    async fn test_invalid_email_is_not_sent() {
        let transport = FixedStatus::new(200);
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("/account/password"),
            transport.clone(),
            cookies(),
        );
        let events = Arc::new(Mutex::new(Vec::new()));
        {
            let events = events.clone();
            flow.subscribe(move |e| events.lock().push(e.clone()));
        }

        let err = flow.submit("not-an-address").await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::InvalidEmail("not-an-address".to_string())
        );
        assert!(transport.sent.lock().is_empty());
        assert_eq!(flow.state(), SubmissionState::Failed);
        assert_eq!(flow.last_error(), Some(err.clone()));
        assert_eq!(events.lock().as_slice(), &[ResetEvent::Error(err)]);

        // A valid retry clears the error and goes out.
        flow.submit(" a@b.com ").await.unwrap();
        assert_eq!(flow.last_error(), None);
        assert_eq!(transport.sent.lock()[0].field("email"), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_all_attributes_sends_configured_form_url() {
        let transport = FixedStatus::new(200);
        let flow = PasswordResetFlow::new(
            PasswordResetConfig::new("http://localhost:8000/account/password")
                .form_url("/account/password")
                .payload(PayloadMode::AllAttributes),
            transport.clone(),
            cookies(),
        );
        flow.submit("a@b.com").await.unwrap();

        let sent = transport.sent.lock();
        assert_eq!(sent[0].url, "http://localhost:8000/account/password");
        assert_eq!(sent[0].field("url"), Some("/account/password"));
    }
}
