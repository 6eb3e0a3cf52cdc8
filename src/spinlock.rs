//! # SpinLock
//!
//! The busy-wait exclusive lock behind the `spinlock` benchmark strategy.
//!
//! The [`SpinLock`] type provides mutual exclusion by repeatedly attempting
//! an atomic test-and-set, spacing retries with an exponential [`BackOff`].
//! Unlike the OS-backed locks in the other strategies it never parks the
//! calling thread: a contended acquisition stays on-core until the word
//! clears. That makes it the cheapest lock in the suite when critical
//! sections are a handful of instructions (one counter increment, here) and
//! the most expensive one when they are not.
//!
//! ## Safety
//! - The lock is **not fair** — starvation is possible under heavy
//!   contention.
//! - It must not be held across blocking or long-running operations.
//! - It is **not reentrant**.
//!
//! ## Example
//! ```rust
//! use contend::SpinLock;
//!
//! let counter = SpinLock::new(0u32);
//! {
//!     let mut guard = counter.lock();
//!     *guard += 1;
//! } // automatically unlocked when the guard is dropped
//! assert_eq!(*counter.lock(), 1);
//! ```

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{
    AtomicBool,
    Ordering::{Acquire, Release},
};

use crate::BackOff;

/// A spin-based mutual exclusion primitive.
///
/// Acquisition busy-waits with an exponential [`BackOff`]; release is a
/// single atomic store performed when the [`SpinGuard`] drops.
pub struct SpinLock<T> {
    data: UnsafeCell<T>,
    locked: AtomicBool,
}

/// A guard that releases the [`SpinLock`] when dropped.
///
/// Returned from [`SpinLock::lock`]; implements [`Deref`] and [`DerefMut`]
/// to access the protected data.
pub struct SpinGuard<'a, T> {
    guard: &'a SpinLock<T>,
}

impl<T> Drop for SpinGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        self.guard.locked.store(false, Release)
    }
}

impl<T> SpinLock<T> {
    /// Creates a new [`SpinLock`] wrapping the given data.
    #[inline(always)]
    pub const fn new(data: T) -> Self {
        SpinLock {
            data: UnsafeCell::new(data),
            locked: AtomicBool::new(false),
        }
    }

    /// Acquires the lock, spinning until it becomes available.
    ///
    /// Returns a [`SpinGuard`] which releases the lock on drop.
    #[inline]
    pub fn lock(&self) -> SpinGuard<'_, T> {
        let backoff = BackOff::new();
        while self.locked.swap(true, Acquire) {
            // Acquire is sufficient here since swap ensures visibility of writes
            backoff.wait();
        }

        SpinGuard { guard: self }
    }

    /// Attempts to acquire the lock without spinning.
    ///
    /// Returns `Some(SpinGuard)` if the lock was free, or `None` otherwise.
    #[inline]
    pub fn try_lock(&self) -> Option<SpinGuard<'_, T>> {
        if !self.locked.swap(true, Acquire) {
            Some(SpinGuard { guard: self })
        } else {
            None
        }
    }

    /// Checks whether the lock is currently held.
    #[inline(always)]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Acquire)
    }
}

impl<T> Deref for SpinGuard<'_, T> {
    type Target = T;
    #[inline(always)]
    fn deref(&self) -> &T {
        unsafe { &*(self.guard.data.get()) }
    }
}

impl<T> DerefMut for SpinGuard<'_, T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.guard.data.get() }
    }
}

// Safety: SpinLock enforces mutual exclusion via atomic operations.
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}
