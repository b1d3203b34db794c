//! Exclusive L1/L2 cache hierarchy simulator CLI.
//!
//! This binary reads a cache configuration and a memory trace and writes one
//! `<L1 state> <L2 state> <memory state>` line per trace record. It performs:
//! 1. **Configuration:** Loads the plain-text or JSON configuration and validates it.
//! 2. **Simulation:** Streams the trace through the hierarchy in input order.
//! 3. **Reporting:** Writes the result log and, on request, a statistics summary.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{SimError, TraceErrorKind};
use cachesim_core::config::HierarchyConfig;
use cachesim_core::sim::{RunSummary, SimOptions, Simulator, UnknownOpPolicy, default_output_path};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level exclusive cache hierarchy simulator",
    long_about = "Simulate an exclusive L1/L2 cache hierarchy over a memory trace.\n\nThe configuration file holds `L1: <block> <ways> <size> L2: <block> <ways> <size>`\n(associativity 0 = fully associative), or the same values as JSON.\nEach trace line is `R <hex address>` or `W <hex address>`.\n\nExamples:\n  cachesim cacheconfig.txt trace.txt\n  cachesim cacheconfig.json trace.txt -o results.out --stats"
)]
struct Cli {
    /// Cache configuration file (plain text, or `.json`).
    config: PathBuf,

    /// Memory trace to simulate.
    trace: PathBuf,

    /// Result log path [default: <TRACE>.out].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Service unknown operation tokens as writes instead of halting.
    #[arg(long)]
    unknown_op_as_write: bool,

    /// Print hit/miss statistics after the run.
    #[arg(short, long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            if cli.stats {
                summary.stats.print();
            }
            if let Some(err) = &summary.halted {
                eprintln!("[!] Trace halted at {err}");
                if matches!(err.kind, TraceErrorKind::UnknownOperation(_)) {
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Loads the configuration, runs the trace, and returns the run summary.
fn run(cli: &Cli) -> Result<RunSummary, SimError> {
    let config = HierarchyConfig::from_path(&cli.config)?;
    debug!(?config, path = %cli.config.display(), "loaded configuration");
    let options = SimOptions {
        unknown_op: if cli.unknown_op_as_write {
            UnknownOpPolicy::TreatAsWrite
        } else {
            UnknownOpPolicy::Reject
        },
    };
    let mut sim = Simulator::new(&config, options)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.trace));
    sim.run_files(&cli.trace, &output)
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` wins over `-v` flags.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
