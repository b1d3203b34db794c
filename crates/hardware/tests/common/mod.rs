//! Shared test infrastructure.


pub use harness::{NA, NOWRITE, RH, RM, TestContext, WH, WM, WRITEMEM, codes};
