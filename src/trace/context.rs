//! Per-request tracing context.

use std::time::Instant;

/// Lifecycle position of a request context.
///
/// A context moves `Created → Dispatching → Completed`; the dispatch step
/// happens zero or one times and is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Created,
    Dispatching,
    Completed,
}

/// Correlation state for one inbound request.
///
/// Created at request entry and discarded once the response is produced;
/// never shared across requests. Timestamps are monotonic (`Instant`), not
/// wall-clock.
#[derive(Debug)]
pub struct RequestContext {
    correlation_id: String,
    requested_name: Option<String>,
    state: ContextState,
    started: Instant,
    dispatch_sent: Option<Instant>,
    dispatch_received: Option<Instant>,
    completed: Option<Instant>,
}

impl RequestContext {
    pub(crate) fn new(correlation_id: String, requested_name: Option<String>) -> Self {
        Self {
            correlation_id,
            requested_name,
            state: ContextState::Created,
            started: Instant::now(),
            dispatch_sent: None,
            dispatch_received: None,
            completed: None,
        }
    }

    /// The correlation identifier threaded through this request's events.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// The display name the caller asked for, if any.
    pub fn requested_name(&self) -> Option<&str> {
        self.requested_name.as_deref()
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// When the request entered the tracer.
    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn dispatch_sent(&self) -> Option<Instant> {
        self.dispatch_sent
    }

    pub fn dispatch_received(&self) -> Option<Instant> {
        self.dispatch_received
    }

    pub fn completed(&self) -> Option<Instant> {
        self.completed
    }

    pub(crate) fn mark_dispatch_sent(&mut self) {
        self.state = ContextState::Dispatching;
        self.dispatch_sent = Some(Instant::now());
    }

    pub(crate) fn mark_dispatch_received(&mut self) {
        self.dispatch_received = Some(Instant::now());
    }

    pub(crate) fn mark_completed(&mut self) {
        self.state = ContextState::Completed;
        self.completed = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_marks_are_monotonic() {
        let mut ctx = RequestContext::new("id".into(), Some("Ada".into()));
        assert_eq!(ctx.state(), ContextState::Created);

        ctx.mark_dispatch_sent();
        assert_eq!(ctx.state(), ContextState::Dispatching);
        ctx.mark_dispatch_received();
        ctx.mark_completed();
        assert_eq!(ctx.state(), ContextState::Completed);

        let sent = ctx.dispatch_sent().unwrap();
        let received = ctx.dispatch_received().unwrap();
        let completed = ctx.completed().unwrap();
        assert!(ctx.started() <= sent);
        assert!(sent <= received);
        assert!(received <= completed);
    }
}
