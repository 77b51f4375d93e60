#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`ScriptedTransport`] stands in for the network: it answers submissions
//! with a scripted sequence of outcomes and records every request.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use courseware_kernel::TransportError;
use courseware_kernel::password_reset::{FormRequest, Transport, TransportResponse};

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16),
    Unreachable,
}

/// In-memory transport with scripted replies. Defaults to 200 when the
/// script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<FormRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn statuses(statuses: impl IntoIterator<Item = u16>) -> Arc<Self> {
        Self::new(statuses.into_iter().map(Reply::Status))
    }

    pub fn sent(&self) -> Vec<FormRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(&self, request: &FormRequest) -> Result<TransportResponse, TransportError> {
        self.sent.lock().push(request.clone());
        match self.replies.lock().pop_front().unwrap_or(Reply::Status(200)) {
            Reply::Status(status) => Ok(TransportResponse {
                status,
                body: String::new(),
            }),
            Reply::Unreachable => Err(TransportError::Request("connection refused".to_string())),
        }
    }
}
