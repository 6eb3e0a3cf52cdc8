//! Command-line front end for the counter benchmark.
//!
//! Parses `<num-loops> <num-threads> <concurrency-method>`, hands the
//! validated configuration to the library, and prints the final counter
//! value plus the two measured intervals. Every configuration mistake
//! (wrong arity, non-numeric or zero counts, an unknown method token)
//! exits with status 1 and usage on standard error; `--help` and
//! `--version` exit 0. Log output goes to standard error so the result
//! lines on standard output stay clean.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use contend::{run, BenchResult, RunConfig, StrategyKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "contend",
    version,
    about = "Benchmark six strategies for synchronizing concurrent increments of a shared counter"
)]
struct Cli {
    /// Number of increments each worker performs
    #[arg(value_name = "num-loops")]
    num_loops: u32,

    /// Number of concurrent worker threads
    #[arg(value_name = "num-threads")]
    num_threads: u32,

    /// One of: none, mutex, spinlock, readwritelock, signalwait, semaphore
    #[arg(value_name = "concurrency-method")]
    concurrency_method: String,
}

fn configure(cli: &Cli) -> BenchResult<RunConfig> {
    let strategy: StrategyKind = cli.concurrency_method.parse()?;
    RunConfig::new(cli.num_loops, cli.num_threads, strategy)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes help/version to stdout and errors (with usage) to stderr.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = match configure(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(report) => {
            println!("counter = {}", report.counter);
            println!(
                "Time to create threads: {:>7} ms",
                report.create.as_millis()
            );
            println!("Time to run:            {:>7} ms", report.total.as_millis());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}
