/// Resolve Chain
///
/// A fluent builder that picks the first acceptable value out of an ordered
/// list of candidates, converting it to the target type when needed, and
/// falls back to a default when nothing matches.
pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod parse;

pub use engine::{CandidateKind, Chain, Resolution, Source, Value, Via};
pub use error::{ConvertError, ResolveError};
