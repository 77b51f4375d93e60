//! Courseware test utilities.
//!
//! A stub HTTP endpoint for integration tests: it records every request it
//! receives and answers with scripted status codes.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// A request received by a [`StubEndpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Form-decoded body fields, in order.
    pub fields: Vec<(String, String)>,
    /// Headers with lowercase names.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a body field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a header (name compared case-insensitively).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Inner {
    statuses: Mutex<VecDeque<u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Local HTTP server answering every path.
///
/// Responds with the scripted statuses in order, then 200 once the script is
/// exhausted. The server stops when the endpoint is dropped.
pub struct StubEndpoint {
    addr: SocketAddr,
    inner: Arc<Inner>,
    handle: JoinHandle<()>,
}

impl StubEndpoint {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn spawn(statuses: impl IntoIterator<Item = u16>) -> std::io::Result<Self> {
        let inner = Arc::new(Inner {
            statuses: Mutex::new(statuses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(record).with_state(inner.clone());
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            inner,
            handle,
        })
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Queue more statuses.
    pub fn respond_with(&self, status: u16) {
        self.inner.statuses.lock().push_back(status);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().clone()
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let fields = url::form_urlencoded::parse(&body).into_owned().collect();
    let headers = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    inner.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        fields,
        headers,
    });

    let status = inner.statuses.lock().pop_front().unwrap_or(200);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = if status.is_success() { "{}" } else { "error" };
    (status, body)
}
