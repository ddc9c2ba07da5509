//! Accumulation buffer subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP trigger handler
//!     → AccumulatorStore::grow (append pseudo-random bytes)
//!
//! Scheduled reclaim task (once per interval)
//!     → AccumulatorStore::reset (release backing memory)
//! ```
//!
//! # Design Decisions
//! - Single store instance owned by the application, shared via Arc
//! - grow and reset are mutually exclusive; size reads are informational
//! - reset deallocates rather than truncating in place

pub mod accumulator;

pub use accumulator::{AccumulatorStore, StoreError};
