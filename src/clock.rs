//! Monotonic elapsed-time collaborators
//!
//! The playback controller consumes elapsed-time queries to bound the
//! foreground busy-wait and to track the end of a background note. The
//! time source is external to the core: hosts use [`StdClock`], tests use
//! the manually advanced [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Wall-clock backed time source
///
/// Counts milliseconds from the moment of construction using
/// [`std::time::Instant`], so it is monotonic and unaffected by system
/// clock adjustments.
#[derive(Debug, Clone)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    /// Create a clock with its origin at the current instant
    pub fn new() -> Self {
        StdClock {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually advanced time source for deterministic tests
///
/// Cloning yields a handle onto the same underlying counter, so a test can
/// hand one clone to the driver and advance time through the other.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at 0 ms
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
