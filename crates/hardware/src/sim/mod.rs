//! Trace-driven simulation.
//!
//! Provides the trace reader, the result log writer, and the driver loop
//! that feeds one into the hierarchy and the other out of it.

/// Trace parsing and result logging.
pub mod trace;

/// The simulation driver.
pub mod simulator;

pub use simulator::{RunSummary, SimOptions, Simulator, default_output_path};
pub use trace::{ResultWriter, TraceReader, TraceRecord, UnknownOpPolicy, parse_line};
