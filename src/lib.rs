//! Function host demo service.
//!
//! A small HTTP service reproducing two cloud-function-host patterns:
//!
//! ```text
//!     Inbound request             ┌──────────────────────────────────────┐
//!     ────────────────────────────┼─▶ http (server + trigger handlers)   │
//!                                 │        │                             │
//!                                 │        ├─▶ store (grow 1 MiB/request)│
//!                                 │        │                             │
//!                                 │        └─▶ trace (begin → dispatch ──┼──▶ Downstream
//!     Response (always 200)       │                 → complete)          │    endpoint
//!     ◀───────────────────────────┼── greeting / generic message         │
//!                                 │                                      │
//!                                 │  Once per interval:                  │
//!                                 │    tasks::reclaim → store.reset()    │
//!                                 └──────────────────────────────────────┘
//! ```
//!
//! - **store**: a process-wide byte buffer grown by request handlers and
//!   wiped (with real deallocation) by the scheduled reclaim task.
//! - **trace**: a correlation id per inbound request, threaded through
//!   lifecycle events and the outbound dispatch.

// Core subsystems
pub mod config;
pub mod http;
pub mod store;
pub mod trace;

// Background work
pub mod tasks;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::HostConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::AccumulatorStore;
pub use trace::{RequestTracer, TracingSink};
