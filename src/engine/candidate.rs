use super::Value;
use serde::Serialize;

/// How a candidate was added to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Literal,
    Guarded,
    Converted,
    Deferred,
    DeferredGuarded,
    DeferredConverted,
    Fallback,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Guarded => "guarded",
            Self::Converted => "converted",
            Self::Deferred => "deferred",
            Self::DeferredGuarded => "deferred_guarded",
            Self::DeferredConverted => "deferred_converted",
            Self::Fallback => "fallback",
        }
    }

    /// Whether the producer runs caller code at resolution time
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            Self::Deferred | Self::DeferredGuarded | Self::DeferredConverted
        )
    }
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Producer = Box<dyn Fn() -> Option<Value>>;

/// A lazily evaluated candidate producer.
pub struct Candidate {
    kind: CandidateKind,
    producer: Producer,
}

impl Candidate {
    pub(crate) fn new(kind: CandidateKind, producer: impl Fn() -> Option<Value> + 'static) -> Self {
        Self {
            kind,
            producer: Box::new(producer),
        }
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Run the producer; `None` means the candidate is absent
    pub fn produce(&self) -> Option<Value> {
        (self.producer)()
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate").field("kind", &self.kind).finish()
    }
}
