//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Resolve telemetry → Spawn reclaim task → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast signal → server drains, reclaim task exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
