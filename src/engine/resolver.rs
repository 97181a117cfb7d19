/// Terminal operations of a [`Chain`].
///
/// Candidates are produced in insertion order. The first present value that
/// is assignable to the target type (the type itself, or a declared subtype
/// of it), or that the converter table can turn into it, wins and nothing
/// after it is evaluated. Only when every candidate is absent
/// or unconvertible does the default phase run.
use super::candidate::CandidateKind;
use super::converters::Lookup;
use super::Chain;
use crate::error::ResolveError;
use serde::Serialize;
use std::any::type_name;
use tracing::{debug, debug_span, trace, trace_span};

/// How an accepted candidate reached the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Via {
    Direct,
    Converter,
    Widened { supertype: &'static str },
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    Candidate {
        index: usize,
        kind: CandidateKind,
        via: Via,
    },
    DefaultValue,
    DefaultFactory,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    value: Option<T>,
    source: Source,
}

impl<T> Resolution<T> {
    fn resolved(value: T, source: Source) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }

    fn unresolved() -> Self {
        Self {
            value: None,
            source: Source::Unresolved,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// True when the value came from a candidate rather than a default
    pub fn from_candidate(&self) -> bool {
        matches!(self.source, Source::Candidate { .. })
    }

    /// The value, or the resolution failure naming `T`
    pub fn into_result(self) -> Result<T, ResolveError> {
        self.value
            .ok_or_else(|| ResolveError::unresolved(type_name::<T>()))
    }
}

impl<T: Clone + 'static> Chain<T> {
    /// Resolve to a value, failing when nothing resolves and no default is set
    pub fn resolve(&self) -> Result<T, ResolveError> {
        self.resolve_detailed()?.into_result()
    }

    /// Resolve to a value, returning `None` when nothing resolves and no
    /// default is set.
    ///
    /// Still fails if a fallible converter reports an error.
    pub fn resolve_optional(&self) -> Result<Option<T>, ResolveError> {
        Ok(self.resolve_detailed()?.into_value())
    }

    /// Resolve and report which candidate or default produced the value
    pub fn resolve_detailed(&self) -> Result<Resolution<T>, ResolveError> {
        let _span = debug_span!("resolve", target_type = type_name::<T>()).entered();

        if let Some(resolution) = self.scan_candidates()? {
            return Ok(resolution);
        }

        if let Some(value) = &self.default_value {
            debug!(target_type = type_name::<T>(), "using default value");
            return Ok(Resolution::resolved(value.clone(), Source::DefaultValue));
        }

        if let Some(factory) = &self.default_factory {
            debug!(target_type = type_name::<T>(), "using default factory");
            return Ok(Resolution::resolved(factory(), Source::DefaultFactory));
        }

        debug!(
            target_type = type_name::<T>(),
            candidates = self.candidates.len(),
            "nothing resolved"
        );
        Ok(Resolution::unresolved())
    }

    fn scan_candidates(&self) -> Result<Option<Resolution<T>>, ResolveError> {
        for (index, candidate) in self.candidates.iter().enumerate() {
            let kind = candidate.kind();
            let _span = trace_span!("candidate", index, %kind, deferred = kind.is_deferred())
                .entered();

            let Some(value) = candidate.produce() else {
                trace!(index, %kind, "candidate absent");
                continue;
            };

            let from = value.type_name();
            let value = match value.downcast::<T>() {
                Ok(direct) => {
                    debug!(index, %kind, "candidate accepted");
                    return Ok(Some(candidate_resolution(direct, index, kind, Via::Direct)));
                }
                Err(value) => value,
            };

            let value = match self.converters.upcast(value) {
                Ok(widened) => {
                    debug!(index, %kind, input = from, "candidate accepted as subtype");
                    return Ok(Some(candidate_resolution(
                        widened,
                        index,
                        kind,
                        Via::Widened {
                            supertype: type_name::<T>(),
                        },
                    )));
                }
                Err(value) => value,
            };

            let lookup = self
                .converters
                .apply(value)
                .map_err(|e| ResolveError::conversion(from, type_name::<T>(), e))?;

            match lookup {
                Lookup::Exact(converted) => {
                    debug!(index, %kind, input = from, "candidate converted");
                    return Ok(Some(candidate_resolution(
                        converted,
                        index,
                        kind,
                        Via::Converter,
                    )));
                }
                Lookup::Widened { via, value } => {
                    debug!(index, %kind, input = from, supertype = via, "candidate converted");
                    return Ok(Some(candidate_resolution(
                        value,
                        index,
                        kind,
                        Via::Widened { supertype: via },
                    )));
                }
                Lookup::NoMatch(_) => {
                    debug!(index, %kind, input = from, "no converter for candidate");
                }
            }
        }

        Ok(None)
    }
}

fn candidate_resolution<T>(value: T, index: usize, kind: CandidateKind, via: Via) -> Resolution<T> {
    Resolution::resolved(value, Source::Candidate { index, kind, via })
}
