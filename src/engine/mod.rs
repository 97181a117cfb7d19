pub mod candidate;
pub mod chain;
pub mod converters;
pub mod resolver;
pub mod value;

pub use candidate::{Candidate, CandidateKind};
pub use chain::Chain;
pub use converters::{ConverterTable, Lookup};
pub use resolver::{Resolution, Source, Via};
pub use value::Value;
