//! Process-wide accumulation buffer.
//!
//! # Responsibilities
//! - Append pseudo-random bytes on behalf of request handlers
//! - Release the backing allocation on scheduled reclaim
//! - Keep growth and reclaim mutually exclusive

use std::sync::Mutex;

use rand::RngCore;
use thiserror::Error;

/// Errors that can occur during buffer operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The allocator refused to extend the buffer.
    #[error("failed to allocate {requested} additional bytes at size {current}")]
    ResourceExhausted { requested: usize, current: usize },
}

/// A shared byte buffer that grows per request and is wiped on a schedule.
///
/// `grow` and `reset` take the same lock, so a reset never interleaves with
/// an in-progress append. Concurrent grows serialize in arbitrary order;
/// each completes atomically. `size` is informational only and may be stale
/// under concurrent access.
pub struct AccumulatorStore {
    buffer: Mutex<Vec<u8>>,
}

impl AccumulatorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Append `size_bytes` of pseudo-random data.
    ///
    /// Returns the new total size. On allocation failure the existing
    /// contents are left untouched.
    pub fn grow(&self, size_bytes: usize) -> Result<usize, StoreError> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        let current = buffer.len();

        buffer
            .try_reserve(size_bytes)
            .map_err(|_| StoreError::ResourceExhausted {
                requested: size_bytes,
                current,
            })?;

        buffer.resize(current + size_bytes, 0);
        rand::thread_rng().fill_bytes(&mut buffer[current..]);

        Ok(buffer.len())
    }

    /// Clear the buffer and release its backing memory.
    ///
    /// Returns the number of bytes released. A no-op on an empty store.
    pub fn reset(&self) -> usize {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        let released = buffer.len();

        // Swapping in a fresh Vec returns the old allocation to the
        // allocator; clear() would keep the capacity alive.
        *buffer = Vec::new();

        released
    }

    /// Current buffer length in bytes.
    pub fn size(&self) -> usize {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for AccumulatorStore {
    fn default() -> Self {
        Self::new()
    }
}
