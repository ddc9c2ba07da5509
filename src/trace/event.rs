//! Trace events and the sinks that consume them.

use std::sync::Mutex;

/// Severity of an emitted trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single emitted trace record, immutable once emitted.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub severity: Severity,
    pub message: String,
    pub correlation_id: String,
}

/// Destination for trace events.
///
/// Request lifecycle events (start, dispatch result, completion) go through
/// the tracer into a sink, so tests can substitute [`CapturingSink`] and
/// assert on the event stream. Host-level logging outside the request
/// lifecycle stays on `tracing` directly.
pub trait TraceSink: Send + Sync {
    fn emit(&self, event: TraceEvent);
}

/// Sink that forwards events to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, event: TraceEvent) {
        match event.severity {
            Severity::Info => {
                tracing::info!(correlation_id = %event.correlation_id, "{}", event.message)
            }
            Severity::Warning => {
                tracing::warn!(correlation_id = %event.correlation_id, "{}", event.message)
            }
            Severity::Error => {
                tracing::error!(correlation_id = %event.correlation_id, "{}", event.message)
            }
        }
    }
}

/// Sink that records events in memory for later inspection.
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far, in emission order.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TraceSink for CapturingSink {
    fn emit(&self, event: TraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
