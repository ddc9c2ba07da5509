//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, shared state)
//!     → handlers.rs (name resolution, buffer growth, trace sequence)
//!     → 200 response (greeting or generic message)
//! ```

pub mod handlers;
pub mod server;

pub use handlers::GENERIC_MESSAGE;
pub use server::{AppState, HttpServer};
