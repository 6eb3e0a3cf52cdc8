//! # Semaphore
//!
//! A counting semaphore built from a permit counter and a condition
//! variable, backing the `semaphore` benchmark strategy.
//!
//! [`acquire`](Semaphore::acquire) blocks while no permits are available
//! and takes one when it can; [`release`](Semaphore::release) returns a
//! permit and wakes one waiter. Initialized with a single permit it behaves
//! exactly like a mutex, which is how the benchmark uses it: the
//! interesting comparison is what the extra generality of a counting
//! primitive costs on the same workload.
//!
//! The permit counter lives inside the [`Mutex`] the [`Condvar`] waits on,
//! so a release can never slip between a waiter's check and its wait.
//!
//! ## Example
//! ```rust
//! use contend::Semaphore;
//!
//! let sem = Semaphore::new(1);
//! sem.acquire();
//! assert!(!sem.try_acquire());
//! sem.release();
//! assert!(sem.try_acquire());
//! ```

use parking_lot::{Condvar, Mutex};

/// A counting semaphore: `acquire` takes a permit (blocking while none are
/// available), `release` returns one.
pub struct Semaphore {
    permits: Mutex<u32>,
    available: Condvar,
}

impl Semaphore {
    /// Creates a semaphore holding `permits` initial permits.
    pub fn new(permits: u32) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Takes one permit, blocking until one is available.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Takes one permit if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Returns one permit and wakes a single waiter, if any.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        drop(permits);
        self.available.notify_one();
    }

    /// Returns the number of permits currently available.
    pub fn permits(&self) -> u32 {
        *self.permits.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_semaphore_excludes() {
        let sem = Semaphore::new(1);

        sem.acquire();
        assert!(!sem.try_acquire(), "No permit should remain while held");

        sem.release();
        assert!(sem.try_acquire(), "Released permit should be takable again");
        sem.release();
        assert_eq!(sem.permits(), 1);
    }

    #[test]
    fn test_counting_allows_up_to_initial_permits() {
        let sem = Semaphore::new(2);

        sem.acquire();
        sem.acquire();
        assert_eq!(sem.permits(), 0);
        assert!(!sem.try_acquire(), "Third acquire must not succeed");

        sem.release();
        sem.release();
        assert_eq!(sem.permits(), 2);
    }

    #[test]
    fn test_serializes_concurrent_increments() {
        use std::sync::Arc;
        use std::thread;

        let sem = Arc::new(Semaphore::new(1));
        let counter = Arc::new(crate::SharedCounter::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let sem = sem.clone();
            let counter = counter.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..10_000 {
                    sem.acquire();
                    counter.increment_racy();
                    sem.release();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(
            counter.read(),
            4 * 10_000,
            "Semaphore-guarded increments must not be lost"
        );
    }

    #[test]
    fn test_release_wakes_blocked_waiter() {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let sem = Arc::new(Semaphore::new(0));
        let waiter = {
            let sem = sem.clone();
            thread::spawn(move || sem.acquire())
        };

        // Give the waiter time to block on the empty semaphore.
        thread::sleep(Duration::from_millis(50));
        sem.release();

        waiter.join().unwrap();
        assert_eq!(sem.permits(), 0, "Woken waiter should have consumed the permit");
    }
}
