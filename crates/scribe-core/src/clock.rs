//! # Clock Module
//!
//! Time source for store-assigned timestamps.
//!
//! Stores never read wall time directly; they hold a [`Clock`] and ask it
//! for the current [`Timestamp`] when a post is created. Tests inject a
//! [`FixedClock`] so timestamps stay deterministic.

use crate::post::Timestamp;

/// Source of creation timestamps for store backends.
pub trait Clock: std::fmt::Debug {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock in whole seconds since the Unix epoch.
///
/// A system time before the epoch reads as zero rather than failing;
/// timestamps are bookkeeping, not a correctness input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Timestamp(secs)
    }
}

/// Deterministic clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// A clock pinned to the given epoch second.
    #[must_use]
    pub fn at(secs: u64) -> Self {
        Self(Timestamp(secs))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
