use super::candidate::{Candidate, CandidateKind};
use super::converters::ConverterTable;
use super::Value;
use crate::error::{BoxError, ConvertError};
use std::any::Any;
use std::fmt;

type Factory<T> = Box<dyn Fn() -> T>;

/// Fluent builder for a resolution chain.
///
/// A chain collects candidates in priority order, a converter table and an
/// optional default. Nothing supplied to the builder runs until one of the
/// terminal operations in [`super::resolver`] is called.
///
/// ```
/// use resolve_chain::Chain;
///
/// let port = Chain::<u16>::new()
///     .assign_if(None::<u16>)
///     .assign_if_with(Some(0_u16), |p| *p != 0)
///     .assign_if(Some("8080".to_string()))
///     .try_convert(|s: String| s.parse::<u16>())
///     .default_value(80)
///     .resolve()
///     .unwrap();
///
/// assert_eq!(port, 8080);
/// ```
pub struct Chain<T> {
    pub(super) candidates: Vec<Candidate>,
    pub(super) converters: ConverterTable<T>,
    pub(super) default_value: Option<T>,
    pub(super) default_factory: Option<Factory<T>>,
}

impl<T: 'static> Chain<T> {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            converters: ConverterTable::new(),
            default_value: None,
            default_factory: None,
        }
    }

    fn push(mut self, kind: CandidateKind, producer: impl Fn() -> Option<Value> + 'static) -> Self {
        self.candidates.push(Candidate::new(kind, producer));
        self
    }

    /// Add a literal candidate, captured now
    pub fn assign_if<TIn>(self, value: Option<TIn>) -> Self
    where
        TIn: Any + Clone,
    {
        self.push(CandidateKind::Literal, move || value.clone().map(Value::new))
    }

    /// Add a literal candidate that only counts when `predicate` holds
    pub fn assign_if_with<TIn, P>(self, value: Option<TIn>, predicate: P) -> Self
    where
        TIn: Any + Clone,
        P: Fn(&TIn) -> bool + 'static,
    {
        self.push(CandidateKind::Guarded, move || {
            value
                .as_ref()
                .filter(|&v| predicate(v))
                .cloned()
                .map(Value::new)
        })
    }

    /// Add a guarded literal candidate converted with its own converter
    pub fn assign_if_convert<TIn, P, C>(self, value: Option<TIn>, predicate: P, converter: C) -> Self
    where
        TIn: Any + Clone,
        P: Fn(&TIn) -> bool + 'static,
        C: Fn(TIn) -> T + 'static,
    {
        self.push(CandidateKind::Converted, move || {
            value
                .as_ref()
                .filter(|&v| predicate(v))
                .cloned()
                .map(|v| Value::new(converter(v)))
        })
    }

    /// Add a candidate computed by `factory` when the chain is resolved
    pub fn assign_if_lazy<TIn, F>(self, factory: F) -> Self
    where
        TIn: Any,
        F: Fn() -> Option<TIn> + 'static,
    {
        self.push(CandidateKind::Deferred, move || factory().map(Value::new))
    }

    pub fn assign_if_lazy_with<TIn, F, P>(self, factory: F, predicate: P) -> Self
    where
        TIn: Any,
        F: Fn() -> Option<TIn> + 'static,
        P: Fn(&TIn) -> bool + 'static,
    {
        self.push(CandidateKind::DeferredGuarded, move || {
            factory().filter(|v| predicate(v)).map(Value::new)
        })
    }

    pub fn assign_if_lazy_convert<TIn, F, P, C>(self, factory: F, predicate: P, converter: C) -> Self
    where
        TIn: Any,
        F: Fn() -> Option<TIn> + 'static,
        P: Fn(&TIn) -> bool + 'static,
        C: Fn(TIn) -> T + 'static,
    {
        self.push(CandidateKind::DeferredConverted, move || {
            factory()
                .filter(|v| predicate(v))
                .map(|v| Value::new(converter(v)))
        })
    }

    /// Add a raw terminal candidate.
    ///
    /// This is still a candidate: it goes through type matching and the
    /// converter table, and anything after it (including the default) is
    /// only reached when it is absent or unconvertible.
    pub fn or_else<V>(self, value: Option<V>) -> Self
    where
        V: Any + Clone,
    {
        self.push(CandidateKind::Fallback, move || value.clone().map(Value::new))
    }

    /// Register the converter for candidates whose runtime type is `TIn`.
    ///
    /// Applies to every candidate of that type, including ones added before
    /// this call. A second registration for the same `TIn` replaces the first.
    pub fn convert<TIn, F>(mut self, converter: F) -> Self
    where
        TIn: Any,
        F: Fn(TIn) -> T + 'static,
    {
        self.converters.insert(move |input: TIn| Ok(converter(input)));
        self
    }

    /// Like [`Chain::convert`], but a returned error aborts resolution
    pub fn try_convert<TIn, E, F>(mut self, converter: F) -> Self
    where
        TIn: Any,
        E: Into<BoxError>,
        F: Fn(TIn) -> Result<T, E> + 'static,
    {
        self.converters
            .insert(move |input: TIn| converter(input).map_err(ConvertError::new));
        self
    }

    /// Let converters registered for `Super` accept `Sub` candidates
    pub fn widen<Sub, Super>(mut self) -> Self
    where
        Sub: Any,
        Super: Any + From<Sub>,
    {
        self.converters.widen::<Sub, Super>();
        self
    }

    /// Set the literal default. `None` clears it.
    pub fn default_value(mut self, value: impl Into<Option<T>>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set a default computed only when no candidate resolves and no literal
    /// default is set
    pub fn default_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        self.default_factory = Some(Box::new(factory));
        self
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidate_kinds(&self) -> Vec<CandidateKind> {
        self.candidates.iter().map(|c| c.kind()).collect()
    }

    pub fn converter_count(&self) -> usize {
        self.converters.len()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some() || self.default_factory.is_some()
    }
}

impl<T: 'static> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.candidates.iter().map(|c| c.kind().as_str()).collect();
        f.debug_struct("Chain")
            .field("target", &std::any::type_name::<T>())
            .field("candidates", &kinds)
            .field("converters", &self.converters.type_names())
            .field("default_value", &self.default_value)
            .field("default_factory", &self.default_factory.is_some())
            .finish_non_exhaustive()
    }
}
