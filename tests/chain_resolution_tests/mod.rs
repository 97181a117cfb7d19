//! Chain resolution tests
//!
//! ## Structure
//! - `test_utils` - Shared counters and helpers
//! - `scenarios` - End-to-end resolution scenarios
//! - `short_circuit` - Lazy evaluation and evaluation counts
//! - `converters` - Converter table precedence and failures

pub mod test_utils;

pub mod converters;
pub mod scenarios;
pub mod short_circuit;
