//! Trace Reading and Result Logging.
//!
//! This module moves records in and out of the simulator. It provides:
//! 1. **Parsing:** Turns a trace line `R|W <hex address>` into a [`TraceRecord`].
//! 2. **Reading:** Streams records from any buffered reader, numbering lines.
//! 3. **Logging:** Writes one `<l1> <l2> <mem>` line per access.

use std::io::{BufRead, Lines, Write};

use crate::common::{Addr, Operation, SimError, TraceError, TraceErrorKind};
use crate::hierarchy::AccessResult;

/// How to treat an operation token other than `R` or `W`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownOpPolicy {
    /// Halt the trace at the offending line.
    #[default]
    Reject,
    /// Service the record as a write.
    TreatAsWrite,
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Read or write.
    pub op: Operation,
    /// Byte address accessed.
    pub addr: Addr,
}

/// Parses trace line number `line_no` (1-based).
///
/// The first whitespace-separated token is the operation, the second the
/// address in hexadecimal with an optional `0x` prefix. Anything after the
/// address is ignored.
///
/// # Errors
///
/// Returns a [`TraceError`] if a field is missing, the address is not a
/// 32-bit hexadecimal value, or the operation is unknown under
/// [`UnknownOpPolicy::Reject`].
pub fn parse_line(
    line_no: usize,
    line: &str,
    policy: UnknownOpPolicy,
) -> Result<TraceRecord, TraceError> {
    let err = |kind| TraceError::new(line_no, kind);

    let mut fields = line.split_whitespace();
    let (Some(op_token), Some(addr_token)) = (fields.next(), fields.next()) else {
        return Err(err(TraceErrorKind::Malformed));
    };

    let op = match (op_token, policy) {
        ("R", _) => Operation::Read,
        ("W", _) | (_, UnknownOpPolicy::TreatAsWrite) => Operation::Write,
        (other, UnknownOpPolicy::Reject) => {
            return Err(err(TraceErrorKind::UnknownOperation(other.to_owned())));
        }
    };

    let digits = addr_token
        .strip_prefix("0x")
        .or_else(|| addr_token.strip_prefix("0X"))
        .unwrap_or(addr_token);
    let addr = u32::from_str_radix(digits, 16)
        .map_err(|_| err(TraceErrorKind::BadAddress(addr_token.to_owned())))?;

    Ok(TraceRecord {
        op,
        addr: Addr(addr),
    })
}

/// Streams [`TraceRecord`]s from a buffered reader.
///
/// Yields `Err(SimError::Trace)` for a line that does not parse and
/// `Err(SimError::Io)` if reading fails. The caller decides whether to stop.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    policy: UnknownOpPolicy,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`, parsing operation tokens under `policy`.
    pub fn new(reader: R, policy: UnknownOpPolicy) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            policy,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(SimError::Io(e))),
        };
        self.line_no += 1;
        Some(parse_line(self.line_no, &line, self.policy).map_err(SimError::Trace))
    }
}

/// Writes the result log, one line per access.
#[derive(Debug)]
pub struct ResultWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ResultWriter<W> {
    /// Wraps `out`. Buffering is the caller's choice.
    pub const fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Appends `<l1> <l2> <mem>\n`.
    ///
    /// # Errors
    ///
    /// Propagates any write failure.
    pub fn write_result(&mut self, result: &AccessResult) -> std::io::Result<()> {
        writeln!(self.out, "{result}")?;
        self.written += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates any flush failure.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates any flush failure.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
