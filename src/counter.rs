//! # SharedCounter
//!
//! The single piece of shared mutable state every benchmark run contends
//! over: one unsigned 32-bit counter, starting at zero.
//!
//! The increment path is a *split* read-modify-write: an atomic load
//! followed by an atomic store of the incremented value. Splitting the
//! operation is the point of the whole exercise. Two workers may both load
//! the same value, both store `value + 1`, and one increment vanishes (a
//! lost update); each strategy decides whether that can happen by choosing
//! what, if anything, serializes the two halves. Backing the cell with an
//! [`AtomicU32`] keeps the race observable without ever making the program
//! undefined: torn values are impossible, lost updates are not.
//!
//! The counter wraps on overflow past `u32::MAX`; overflow is not an error.

use core::sync::atomic::{
    AtomicU32,
    Ordering::{Acquire, Relaxed},
};

/// A shared `u32` counter with an intentionally unserialized increment.
pub struct SharedCounter {
    value: AtomicU32,
}

impl SharedCounter {
    /// Creates a counter starting at zero.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            value: AtomicU32::new(0),
        }
    }

    /// Adds one via a split load/store with no serialization of its own.
    ///
    /// Exact if and only if the caller serializes concurrent calls (every
    /// strategy except `none` does); otherwise concurrent increments may
    /// overlap and undercount. Wraps on overflow.
    #[inline(always)]
    pub fn increment_racy(&self) {
        let current = self.value.load(Relaxed);
        self.value.store(current.wrapping_add(1), Relaxed);
    }

    /// Reads the current value.
    #[inline(always)]
    pub fn read(&self) -> u32 {
        self.value.load(Acquire)
    }
}

impl Default for SharedCounter {
    fn default() -> Self {
        Self::new()
    }
}
