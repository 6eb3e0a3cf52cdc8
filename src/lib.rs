//! # contend 🔩
//!
//! A multithreaded benchmark comparing **six strategies for synchronizing
//! increments of a single shared counter**: no synchronization at all, a
//! mutex, a spinlock, a read/write lock, a condition-variable hand-off, and
//! a counting semaphore.
//!
//! Every run spawns N worker threads, each of which increments one shared
//! `u32` counter L times under the chosen strategy's discipline. The
//! harness then joins them all and reports the final counter value together
//! with two wall-clock intervals: how long it took to spawn every worker,
//! and how long the whole run took. Under every strategy except `none` the
//! counter ends at exactly `N * L`. Under `none` the missing increments are
//! the output: a direct measurement of lost updates.
//!
//! ## 🚀 Quick Example
//!
//! ```rust
//! use contend::{run, RunConfig, StrategyKind};
//!
//! let config = RunConfig::new(1_000, 4, StrategyKind::Mutex)?;
//! let report = run(&config)?;
//!
//! assert_eq!(report.counter, 4_000);
//! assert!(report.total >= report.create);
//! # Ok::<(), contend::BenchError>(())
//! ```
//!
//! ## 🧠 Design
//!
//! The six policies are one closed sum type ([`Strategy`]) selected by a
//! token ([`StrategyKind`]) at configuration time; each variant owns its
//! fully constructed primitive for the lifetime of the run. The counter
//! itself ([`SharedCounter`]) has exactly one mutation path, a split atomic
//! load/store, and the active strategy decides what serializes it. The
//! harness owns the spawn/time/join sequence and treats every failure past
//! configuration as fatal.
//!
//! The OS-backed locks come from `parking_lot`; the spinlock
//! ([`SpinLock`] + [`BackOff`]) and the counting semaphore
//! ([`Semaphore`]) are implemented in this crate.
//!
//! ## 📦 Modules
//!
//! - [`strategy`]: the six synchronization policies and their selector.
//! - [`harness`]: configuration, the run loop, and the timing report.
//! - [`counter`]: the shared counter with its intentionally racy path.
//! - [`spinlock`]: busy-wait exclusive lock with RAII guard.
//! - [`backoff`]: exponential spin backoff for the spinlock.
//! - [`semaphore`]: counting semaphore over a permit counter and condvar.
//! - [`error`]: the crate's error type; nothing in here is recoverable.

pub mod backoff;
pub mod counter;
pub mod error;
pub mod harness;
pub mod semaphore;
pub mod spinlock;
pub mod strategy;

pub use backoff::BackOff;
pub use counter::SharedCounter;
pub use error::{BenchError, BenchResult};
pub use harness::{run, RunConfig, RunReport};
pub use semaphore::Semaphore;
pub use spinlock::SpinLock;
pub use strategy::{Strategy, StrategyKind};
