//! Scheduled background tasks.

pub mod reclaim;

pub use reclaim::ReclaimTask;
