//! # Strategy
//!
//! The six synchronization policies the benchmark compares, as one closed
//! sum type. Every variant answers the same question (what, if anything,
//! serializes one increment of the [`SharedCounter`]?) and each owns
//! whatever primitive it needs to answer it:
//!
//! | Token           | Primitive                         | Discipline |
//! |-----------------|-----------------------------------|------------|
//! | `none`          | —                                 | unserialized read-modify-write (the racy baseline) |
//! | `mutex`         | [`parking_lot::Mutex`]            | lock, increment, unlock |
//! | `spinlock`      | [`SpinLock`]                      | busy-wait lock, increment, unlock |
//! | `readwritelock` | [`parking_lot::RwLock`]           | write-lock (every access mutates), increment, unlock |
//! | `signalwait`    | [`parking_lot::Mutex`] + [`Condvar`] | wait until the turn flag clears, take the turn, increment, hand off |
//! | `semaphore`     | [`Semaphore`] with one permit     | acquire, increment, release |
//!
//! Selection happens once, at configuration time: a [`StrategyKind`] parsed
//! from the command line is turned into a [`Strategy`] holding a fully
//! constructed primitive before the first worker exists, and the variant
//! never changes for the lifetime of the run.

use std::fmt;
use std::str::FromStr;

use parking_lot::{Condvar, Mutex, RwLock};

use crate::counter::SharedCounter;
use crate::error::BenchError;
use crate::semaphore::Semaphore;
use crate::spinlock::SpinLock;

/// Selector for the six strategies; the fixed string tokens the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// No serialization at all; the lost-update baseline.
    Unsynchronized,
    /// OS-backed exclusive lock.
    Mutex,
    /// Busy-wait exclusive lock.
    Spinlock,
    /// Read/write lock, always taken for writing.
    ReadWriteLock,
    /// Condition-variable hand-off over a turn flag.
    SignalWait,
    /// Counting semaphore holding a single permit.
    Semaphore,
}

impl StrategyKind {
    /// All six kinds, in the order the usage text lists them.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Unsynchronized,
        StrategyKind::Mutex,
        StrategyKind::Spinlock,
        StrategyKind::ReadWriteLock,
        StrategyKind::SignalWait,
        StrategyKind::Semaphore,
    ];

    /// The command-line token selecting this kind.
    pub fn token(&self) -> &'static str {
        match self {
            StrategyKind::Unsynchronized => "none",
            StrategyKind::Mutex => "mutex",
            StrategyKind::Spinlock => "spinlock",
            StrategyKind::ReadWriteLock => "readwritelock",
            StrategyKind::SignalWait => "signalwait",
            StrategyKind::Semaphore => "semaphore",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for StrategyKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(StrategyKind::Unsynchronized),
            "mutex" => Ok(StrategyKind::Mutex),
            "spinlock" => Ok(StrategyKind::Spinlock),
            "readwritelock" => Ok(StrategyKind::ReadWriteLock),
            "signalwait" => Ok(StrategyKind::SignalWait),
            "semaphore" => Ok(StrategyKind::Semaphore),
            other => Err(BenchError::UnknownStrategy(other.to_string())),
        }
    }
}

/// The turn flag and its condition variable for the `signalwait` strategy.
///
/// The flag lives inside the mutex the condition variable waits on, so
/// checking it and going to sleep are one atomic step and a hand-off can
/// never be missed.
pub struct SignalGate {
    busy: Mutex<bool>,
    freed: Condvar,
}

/// One fully constructed synchronization policy.
///
/// Built once per run via [`Strategy::init`]; the contained primitive stays
/// valid for the lifetime of every worker and is never rebuilt.
pub enum Strategy {
    /// No primitive; increments go straight to the counter.
    Unsynchronized,
    /// Exclusive lock taken around each increment.
    Mutex(Mutex<()>),
    /// Busy-wait lock taken around each increment.
    Spinlock(SpinLock<()>),
    /// Read/write lock, write-acquired around each increment.
    ReadWriteLock(RwLock<()>),
    /// Condvar hand-off: each worker takes the turn, increments, hands off.
    SignalWait(SignalGate),
    /// Counting semaphore used as a mutual-exclusion device.
    Semaphore(Semaphore),
}

impl Strategy {
    /// Constructs the primitive for `kind`.
    ///
    /// Runs exactly once per benchmark, before any worker is spawned; the
    /// semaphore starts with its single permit and the signal-wait turn
    /// flag starts clear, so the first acquisition always succeeds.
    pub fn init(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Unsynchronized => Strategy::Unsynchronized,
            StrategyKind::Mutex => Strategy::Mutex(Mutex::new(())),
            StrategyKind::Spinlock => Strategy::Spinlock(SpinLock::new(())),
            StrategyKind::ReadWriteLock => Strategy::ReadWriteLock(RwLock::new(())),
            StrategyKind::SignalWait => Strategy::SignalWait(SignalGate {
                busy: Mutex::new(false),
                freed: Condvar::new(),
            }),
            StrategyKind::Semaphore => Strategy::Semaphore(Semaphore::new(1)),
        }
    }

    /// The selector this strategy was built from.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Unsynchronized => StrategyKind::Unsynchronized,
            Strategy::Mutex(_) => StrategyKind::Mutex,
            Strategy::Spinlock(_) => StrategyKind::Spinlock,
            Strategy::ReadWriteLock(_) => StrategyKind::ReadWriteLock,
            Strategy::SignalWait(_) => StrategyKind::SignalWait,
            Strategy::Semaphore(_) => StrategyKind::Semaphore,
        }
    }

    /// Performs `loops` increments of `counter`, acquiring and releasing
    /// this strategy's primitive once per increment.
    ///
    /// This is the entry point every worker runs. For all variants except
    /// [`Strategy::Unsynchronized`] the increments are mutually exclusive
    /// across workers, so the counter ends at exactly
    /// `loops * worker_count`.
    pub fn increment(&self, counter: &SharedCounter, loops: u32) {
        match self {
            Strategy::Unsynchronized => {
                for _ in 0..loops {
                    counter.increment_racy();
                }
            }
            Strategy::Mutex(lock) => {
                for _ in 0..loops {
                    let _guard = lock.lock();
                    counter.increment_racy();
                }
            }
            Strategy::Spinlock(lock) => {
                for _ in 0..loops {
                    let _guard = lock.lock();
                    counter.increment_racy();
                }
            }
            Strategy::ReadWriteLock(lock) => {
                for _ in 0..loops {
                    let _guard = lock.write();
                    counter.increment_racy();
                }
            }
            Strategy::SignalWait(gate) => {
                for _ in 0..loops {
                    let mut busy = gate.busy.lock();
                    while *busy {
                        gate.freed.wait(&mut busy);
                    }
                    *busy = true;
                    counter.increment_racy();
                    // Hand the turn off before sleeping waiters are woken.
                    *busy = false;
                    gate.freed.notify_one();
                }
            }
            Strategy::Semaphore(sem) => {
                for _ in 0..loops {
                    sem.acquire();
                    counter.increment_racy();
                    sem.release();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_token_parses_to_its_kind() {
        for kind in StrategyKind::ALL {
            let parsed: StrategyKind = kind.token().parse().expect("known token must parse");
            assert_eq!(parsed, kind, "Token {} parsed to a different kind", kind);
        }
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first: StrategyKind = "mutex".parse().unwrap();
        let second: StrategyKind = "mutex".parse().unwrap();
        assert_eq!(first, second, "Same token must always select the same kind");
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = "foobar".parse::<StrategyKind>().unwrap_err();
        assert!(
            matches!(err, BenchError::UnknownStrategy(ref token) if token == "foobar"),
            "Unknown token should surface as a configuration error"
        );
    }

    #[test]
    fn test_init_builds_matching_variant() {
        for kind in StrategyKind::ALL {
            assert_eq!(
                Strategy::init(kind).kind(),
                kind,
                "init({kind}) built the wrong variant"
            );
        }
    }

    #[test]
    fn test_each_protected_strategy_serializes() {
        use std::thread;

        for kind in StrategyKind::ALL {
            if kind == StrategyKind::Unsynchronized {
                continue;
            }

            let strategy = Strategy::init(kind);
            let counter = SharedCounter::new();
            thread::scope(|s| {
                for _ in 0..4 {
                    s.spawn(|| strategy.increment(&counter, 5_000));
                }
            });

            assert_eq!(
                counter.read(),
                4 * 5_000,
                "Strategy {kind} lost updates under contention"
            );
        }
    }

    #[test]
    fn test_unsynchronized_single_worker_is_exact() {
        let strategy = Strategy::init(StrategyKind::Unsynchronized);
        let counter = SharedCounter::new();
        strategy.increment(&counter, 1_000);
        assert_eq!(counter.read(), 1_000, "No contention means no lost updates");
    }
}
