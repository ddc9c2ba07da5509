//! Request tracing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → RequestTracer::begin (fresh correlation id, start event)
//!     → RequestTracer::dispatch (outbound POST, status or error event)
//!     → RequestTracer::complete (completion event)
//!
//! All events
//!     → TraceSink (tracing subscriber in production,
//!                  capturing sink in tests)
//! ```
//!
//! # Design Decisions
//! - One correlation id per inbound request, UUID v4
//! - Sinks are a trait seam so tests can observe the event stream
//! - Dispatch makes at most one attempt; its timeout is the only abort

pub mod context;
pub mod event;
pub mod tracer;

pub use context::{ContextState, RequestContext};
pub use event::{CapturingSink, Severity, TraceEvent, TraceSink, TracingSink};
pub use tracer::{DispatchError, DispatchPayload, RequestTracer};
