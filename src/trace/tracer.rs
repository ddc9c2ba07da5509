//! Request lifecycle tracing and downstream dispatch.
//!
//! # Responsibilities
//! - Allocate a correlation id per inbound request
//! - Emit lifecycle events (start, dispatch result, completion)
//! - Forward the correlated payload to the downstream endpoint

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::trace::context::{ContextState, RequestContext};
use crate::trace::event::{Severity, TraceEvent, TraceSink};

/// Placeholder used in the dispatch payload when the caller gave no name.
pub const NO_NAME_PLACEHOLDER: &str = "No name provided";

/// Errors from the dispatch leg of a traced request.
///
/// Dispatch failures are non-fatal by contract: the inbound handler logs
/// them and still produces its own response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Timeout, connection refused, or protocol error on the outbound call.
    #[error("downstream call failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A second dispatch was attempted on the same request context.
    #[error("dispatch already attempted for this request")]
    AlreadyDispatched,
}

/// JSON body sent to the downstream endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchPayload {
    /// ISO-8601 wall-clock timestamp of the dispatch.
    pub timestamp: String,
    /// Requested display name, or [`NO_NAME_PLACEHOLDER`].
    pub name: String,
}

impl DispatchPayload {
    pub fn new(requested_name: Option<&str>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            name: requested_name
                .filter(|n| !n.is_empty())
                .unwrap_or(NO_NAME_PLACEHOLDER)
                .to_string(),
        }
    }
}

/// Emits correlated lifecycle events and performs the outbound dispatch.
pub struct RequestTracer {
    sink: Arc<dyn TraceSink>,
    client: reqwest::Client,
    dispatch_timeout: Duration,
    suffix_correlation_token: bool,
}

impl RequestTracer {
    /// Create a tracer emitting into `sink`.
    ///
    /// `dispatch_timeout` bounds every outbound call; when
    /// `suffix_correlation_token` is set, each dispatch appends a freshly
    /// generated token to the target path.
    pub fn new(
        sink: Arc<dyn TraceSink>,
        dispatch_timeout: Duration,
        suffix_correlation_token: bool,
    ) -> Self {
        Self {
            sink,
            client: reqwest::Client::new(),
            dispatch_timeout,
            suffix_correlation_token,
        }
    }

    /// Start tracing an inbound request.
    ///
    /// Allocates a fresh correlation id and emits the start event.
    pub fn begin(&self, requested_name: Option<String>) -> RequestContext {
        let correlation_id = Uuid::new_v4().to_string();
        self.sink.emit(TraceEvent {
            severity: Severity::Info,
            message: "request started".to_string(),
            correlation_id: correlation_id.clone(),
        });
        RequestContext::new(correlation_id, requested_name)
    }

    /// POST `payload` as JSON to `target_url` with the bounded timeout.
    ///
    /// At most one attempt per context; no retries. A transport failure is
    /// emitted as an Error event and returned, never raised past the caller.
    pub async fn dispatch<T: Serialize>(
        &self,
        ctx: &mut RequestContext,
        target_url: &str,
        payload: &T,
    ) -> Result<StatusCode, DispatchError> {
        if ctx.state() != ContextState::Created {
            self.sink.emit(TraceEvent {
                severity: Severity::Warning,
                message: "dispatch refused: already attempted".to_string(),
                correlation_id: ctx.correlation_id().to_string(),
            });
            return Err(DispatchError::AlreadyDispatched);
        }

        let url = if self.suffix_correlation_token {
            // Fresh token per hop, matching a new correlation id being
            // minted at each stage of the call chain.
            format!("{}/{}", target_url.trim_end_matches('/'), Uuid::new_v4())
        } else {
            target_url.to_string()
        };

        ctx.mark_dispatch_sent();
        let result = self
            .client
            .post(&url)
            .timeout(self.dispatch_timeout)
            .json(payload)
            .send()
            .await;
        ctx.mark_dispatch_received();

        match result {
            Ok(response) => {
                let status = response.status();
                self.sink.emit(TraceEvent {
                    severity: Severity::Info,
                    message: format!("downstream responded with status {}", status.as_u16()),
                    correlation_id: ctx.correlation_id().to_string(),
                });
                Ok(status)
            }
            Err(e) => {
                self.sink.emit(TraceEvent {
                    severity: Severity::Error,
                    message: format!("downstream call failed: {}", e),
                    correlation_id: ctx.correlation_id().to_string(),
                });
                Err(DispatchError::Transport(e))
            }
        }
    }

    /// Finish tracing; emits the completion event under the same id.
    pub fn complete(&self, ctx: &mut RequestContext) {
        ctx.mark_completed();
        self.sink.emit(TraceEvent {
            severity: Severity::Info,
            message: "request completed".to_string(),
            correlation_id: ctx.correlation_id().to_string(),
        });
    }
}
