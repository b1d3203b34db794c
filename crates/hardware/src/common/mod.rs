//! Common types and constants used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every other module:
//! 1. **Address Types:** A strong 32-bit address type and its per-level decoder.
//! 2. **Constants:** Address width and output naming.
//! 3. **Access Types:** Trace operations and cache level identifiers.
//! 4. **Error Handling:** Configuration, trace, and simulation errors.

/// Address type and tag/set/offset decomposition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Operation and level definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressDecoder, Addr, Decoded};
pub use constants::{ADDRESS_BITS, RESULT_SUFFIX};
pub use data::{Level, Operation};
pub use error::{ConfigError, GeometryError, SimError, TraceError, TraceErrorKind};
