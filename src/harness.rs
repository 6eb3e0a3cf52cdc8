//! # Harness
//!
//! Drives one benchmark run: build the chosen [`Strategy`], spawn the
//! workers, time them, join them, read the counter.
//!
//! A run moves through a fixed sequence (validate the configuration,
//! construct the strategy's primitive, spawn every worker in one tight
//! loop, wait for all of them, report) and three timestamps bracket it:
//! run start, all workers spawned, all workers joined. Spawning and joining
//! are deliberately separate passes: joining each worker as it is created
//! would serialize the run, and the point of the first interval is to
//! isolate pure creation cost while every worker runs concurrently.
//!
//! Nothing here is recoverable. A worker that cannot be spawned or joined
//! ends the run with an error; there is no partial report.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::counter::SharedCounter;
use crate::error::{BenchError, BenchResult};
use crate::strategy::{Strategy, StrategyKind};

/// Validated benchmark parameters, immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    loops: u32,
    workers: u32,
    strategy: StrategyKind,
}

impl RunConfig {
    /// Validates and captures a run configuration.
    ///
    /// Both counts must be at least one; zero is rejected here, before any
    /// strategy primitive is constructed or worker spawned.
    pub fn new(loops: u32, workers: u32, strategy: StrategyKind) -> BenchResult<Self> {
        if loops == 0 {
            return Err(BenchError::InvalidCount { name: "num-loops" });
        }
        if workers == 0 {
            return Err(BenchError::InvalidCount { name: "num-threads" });
        }
        Ok(Self {
            loops,
            workers,
            strategy,
        })
    }

    /// Increments each worker performs.
    pub fn loops(&self) -> u32 {
        self.loops
    }

    /// Number of concurrent workers.
    pub fn workers(&self) -> u32 {
        self.workers
    }

    /// The strategy this run exercises.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }
}

/// What a completed run measured.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Final counter value after every worker joined.
    pub counter: u32,
    /// Elapsed time from run start until the last worker was spawned.
    pub create: Duration,
    /// Elapsed time from run start until the last worker was joined.
    pub total: Duration,
}

/// Runs one benchmark to completion and reports the result.
///
/// The strategy primitive is fully constructed before the first worker is
/// spawned; workers are joined in creation order; the counter is read only
/// after the last join. See the module docs for the timing discipline.
///
/// # Errors
///
/// [`BenchError::Spawn`] if the OS refuses a worker thread, and
/// [`BenchError::Join`] if a worker panics. Both are fatal to the run.
pub fn run(config: &RunConfig) -> BenchResult<RunReport> {
    let strategy = Strategy::init(config.strategy);
    let counter = SharedCounter::new();

    debug!(
        strategy = %config.strategy,
        workers = config.workers,
        loops = config.loops,
        "starting run"
    );

    let (create, total) = thread::scope(|scope| -> BenchResult<(Duration, Duration)> {
        let mut handles = Vec::with_capacity(config.workers as usize);
        let start = Instant::now();

        for index in 0..config.workers {
            let handle = thread::Builder::new()
                .name(format!("worker-{index}"))
                .spawn_scoped(scope, || strategy.increment(&counter, config.loops))
                .map_err(|source| BenchError::Spawn { index, source })?;
            handles.push(handle);
        }
        let create = start.elapsed();
        debug!(elapsed_ms = create.as_millis() as u64, "all workers spawned");

        for (index, handle) in handles.into_iter().enumerate() {
            handle.join().map_err(|_| BenchError::Join {
                index: index as u32,
            })?;
        }
        Ok((create, start.elapsed()))
    })?;

    let counter = counter.read();
    debug!(counter, elapsed_ms = total.as_millis() as u64, "run complete");

    Ok(RunReport {
        counter,
        create,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(loops: u32, workers: u32, strategy: StrategyKind) -> RunConfig {
        RunConfig::new(loops, workers, strategy).expect("test config must be valid")
    }

    #[test]
    fn test_zero_loops_rejected() {
        let err = RunConfig::new(0, 4, StrategyKind::Mutex).unwrap_err();
        assert!(
            matches!(err, BenchError::InvalidCount { name: "num-loops" }),
            "Zero loops must be a configuration error"
        );
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = RunConfig::new(100, 0, StrategyKind::Mutex).unwrap_err();
        assert!(
            matches!(err, BenchError::InvalidCount { name: "num-threads" }),
            "Zero workers must be a configuration error"
        );
    }

    #[test]
    fn test_protected_strategies_count_exactly() {
        for kind in StrategyKind::ALL {
            if kind == StrategyKind::Unsynchronized {
                continue;
            }
            let report = run(&config(500, 4, kind)).expect("run must complete");
            assert_eq!(
                report.counter,
                500 * 4,
                "Strategy {kind} lost updates under contention"
            );
        }
    }

    #[test]
    fn test_single_loop_single_worker_counts_one() {
        for kind in StrategyKind::ALL {
            let report = run(&config(1, 1, kind)).expect("run must complete");
            assert_eq!(report.counter, 1, "Strategy {kind} miscounted 1x1");
        }
    }

    #[test]
    fn test_unsynchronized_single_worker_is_exact() {
        let report = run(&config(10_000, 1, StrategyKind::Unsynchronized))
            .expect("run must complete");
        assert_eq!(
            report.counter, 10_000,
            "A single worker cannot lose updates"
        );
    }

    #[test]
    fn test_unsynchronized_never_overcounts() {
        let report = run(&config(10_000, 8, StrategyKind::Unsynchronized))
            .expect("run must complete");
        assert!(
            report.counter <= 10_000 * 8,
            "Racy counter exceeded the number of increments performed"
        );
    }

    #[test]
    fn test_mutex_scenario() {
        let report = run(&config(1_000, 8, StrategyKind::Mutex)).expect("run must complete");
        assert_eq!(report.counter, 8_000);
        assert!(
            report.total >= report.create,
            "Completion time cannot precede creation time"
        );
    }

    #[test]
    fn test_semaphore_scenario() {
        let report = run(&config(100, 4, StrategyKind::Semaphore)).expect("run must complete");
        assert_eq!(report.counter, 400);
    }
}
