//! Global Simulator Constants.
//!
//! This module defines the fixed parameters shared by the decoder, the
//! hierarchy, and the trace driver:
//! 1. **Address Width:** Every trace address is a 32-bit byte address.
//! 2. **Output Naming:** The suffix appended to a trace path to name its result log.

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Suffix appended to the trace file path when no output path is given.
pub const RESULT_SUFFIX: &str = ".out";
