//! Simulator: drives a cache hierarchy with a memory trace.
//!
//! Records are processed strictly in input order, each one completely
//! (including its eviction cascade) before the next is read. The first line
//! that cannot be parsed ends the run; every result produced before it is
//! flushed and kept.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::trace::{ResultWriter, TraceReader, UnknownOpPolicy};
use crate::common::{ConfigError, RESULT_SUFFIX, SimError, TraceError};
use crate::config::HierarchyConfig;
use crate::hierarchy::CacheHierarchy;
use crate::stats::HierarchyStats;

/// Knobs that do not affect the cache geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimOptions {
    /// Treatment of operation tokens other than `R`/`W`.
    pub unknown_op: UnknownOpPolicy,
}

/// Outcome of one trace run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Number of records simulated (equal to the number of result lines).
    pub records: usize,
    /// The line that stopped processing early, if any.
    pub halted: Option<TraceError>,
    /// Hierarchy counters after the run.
    pub stats: HierarchyStats,
}

/// Top-level simulator: a hierarchy plus run options.
#[derive(Debug)]
pub struct Simulator {
    /// The simulated cache hierarchy.
    pub hierarchy: CacheHierarchy,
    options: SimOptions,
}

impl Simulator {
    /// Validates `config` and creates a simulator with empty caches.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] describing the first invalid parameter.
    pub fn new(config: &HierarchyConfig, options: SimOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            hierarchy: CacheHierarchy::from_config(config)?,
            options,
        })
    }

    /// Feeds every record of `trace` through the hierarchy, logging results to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if reading the trace or writing results fails.
    /// A malformed trace line is not an error here: it ends the run and is
    /// reported in [`RunSummary::halted`].
    pub fn run<R: BufRead, W: Write>(&mut self, trace: R, out: W) -> Result<RunSummary, SimError> {
        let mut writer = ResultWriter::new(out);
        let mut halted = None;

        for item in TraceReader::new(trace, self.options.unknown_op) {
            match item {
                Ok(record) => {
                    let result = self.hierarchy.access(record.op, record.addr);
                    writer.write_result(&result)?;
                }
                Err(SimError::Trace(err)) => {
                    warn!(%err, "halting trace");
                    halted = Some(err);
                    break;
                }
                Err(err) => {
                    writer.flush()?;
                    return Err(err);
                }
            }
        }

        let records = writer.written();
        let _out = writer.finish()?;
        info!(records, halted = halted.is_some(), "trace complete");

        Ok(RunSummary {
            records,
            halted,
            stats: self.hierarchy.stats().clone(),
        })
    }

    /// Runs the trace file at `trace` and writes the result log to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if either file cannot be opened or an I/O
    /// operation fails during the run.
    pub fn run_files(&mut self, trace: &Path, output: &Path) -> Result<RunSummary, SimError> {
        let reader = BufReader::new(File::open(trace)?);
        let writer = BufWriter::new(File::create(output)?);
        info!(trace = %trace.display(), output = %output.display(), "starting trace");
        self.run(reader, writer)
    }
}

/// Default result log path for `trace`: the trace path with `.out` appended.
pub fn default_output_path(trace: &Path) -> PathBuf {
    let mut name = trace.as_os_str().to_owned();
    name.push(RESULT_SUFFIX);
    PathBuf::from(name)
}
