/// Converter table keyed by the runtime type of a candidate.
///
/// Lookup runs in two passes:
/// - exact match on the candidate's `TypeId`
/// - a scan in registration order for a converter whose key is reachable
///   from the candidate's type through declared widenings
///
/// Rust has no runtime subtyping, so `widen::<Sub, Super>()` is what makes
/// `Super` count as a supertype of `Sub`. Widenings compose: with `i16 -> i32`
/// and `i32 -> i64` declared, an `i16` is assignable to `i64`.
use super::Value;
use crate::error::ConvertError;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

type ConvertFn<T> = Box<dyn Fn(Value) -> Result<T, ConvertError>>;

struct Entry<T> {
    type_id: TypeId,
    type_name: &'static str,
    convert: ConvertFn<T>,
}

struct Widening {
    from: TypeId,
    to: TypeId,
    widen: fn(Value) -> Value,
}

/// Result of offering a value to the table.
#[derive(Debug)]
pub enum Lookup<T> {
    /// Converted by the converter registered for the exact type
    Exact(T),
    /// Widened to a supertype, then converted by that type's converter
    Widened { via: &'static str, value: T },
    /// No converter applies; the value is handed back untouched
    NoMatch(Value),
}

pub struct ConverterTable<T> {
    entries: Vec<Entry<T>>,
    widenings: Vec<Widening>,
}

impl<T: 'static> ConverterTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            widenings: Vec::new(),
        }
    }

    /// Register a converter for `TIn`, replacing any earlier one in place
    pub fn insert<TIn, F>(&mut self, convert: F)
    where
        TIn: Any,
        F: Fn(TIn) -> Result<T, ConvertError> + 'static,
    {
        let convert: ConvertFn<T> = Box::new(move |value: Value| match value.downcast::<TIn>() {
            Ok(input) => convert(input),
            Err(other) => Err(ConvertError::new(format!(
                "converter for '{}' received '{}'",
                std::any::type_name::<TIn>(),
                other.type_name()
            ))),
        });

        let type_id = TypeId::of::<TIn>();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.type_id == type_id) {
            trace!(input = entry.type_name, "replacing converter");
            entry.convert = convert;
            return;
        }

        self.entries.push(Entry {
            type_id,
            type_name: std::any::type_name::<TIn>(),
            convert,
        });
    }

    /// Declare `Sub` a subtype of `Super`
    pub fn widen<Sub, Super>(&mut self)
    where
        Sub: Any,
        Super: Any + From<Sub>,
    {
        let from = TypeId::of::<Sub>();
        let to = TypeId::of::<Super>();
        if self.widenings.iter().any(|w| w.from == from && w.to == to) {
            return;
        }
        self.widenings.push(Widening {
            from,
            to,
            widen: widen_value::<Sub, Super>,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Input type names in registration order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.type_name).collect()
    }

    /// Widen `value` into `T` itself when `T` is a declared supertype of
    /// its runtime type; otherwise hand it back
    pub fn upcast(&self, value: Value) -> Result<T, Value> {
        match self.widening_path(value.type_id(), TypeId::of::<T>()) {
            Some(path) => {
                trace!(from = value.type_name(), steps = path.len(), "widening to target");
                widen_along(&path, value).downcast::<T>()
            }
            None => Err(value),
        }
    }

    pub fn apply(&self, value: Value) -> Result<Lookup<T>, ConvertError> {
        let type_id = value.type_id();

        if let Some(entry) = self.entries.iter().find(|e| e.type_id == type_id) {
            return (entry.convert)(value).map(Lookup::Exact);
        }

        for entry in &self.entries {
            if let Some(path) = self.widening_path(type_id, entry.type_id) {
                trace!(from = value.type_name(), to = entry.type_name, "widening");
                let widened = widen_along(&path, value);
                return (entry.convert)(widened).map(|value| Lookup::Widened {
                    via: entry.type_name,
                    value,
                });
            }
        }

        Ok(Lookup::NoMatch(value))
    }

    /// Shortest chain of widenings leading from `from` to `to`.
    ///
    /// Ties are broken by registration order. `None` when `to` is unreachable
    /// or equal to `from`.
    fn widening_path(&self, from: TypeId, to: TypeId) -> Option<Vec<fn(Value) -> Value>> {
        if from == to {
            return None;
        }

        let mut reached_by: HashMap<TypeId, usize> = HashMap::new();
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for (index, widening) in self.widenings.iter().enumerate() {
                if widening.from != current || !seen.insert(widening.to) {
                    continue;
                }
                reached_by.insert(widening.to, index);
                if widening.to == to {
                    return Some(self.collect_path(&reached_by, from, to));
                }
                queue.push_back(widening.to);
            }
        }

        None
    }

    fn collect_path(
        &self,
        reached_by: &HashMap<TypeId, usize>,
        from: TypeId,
        to: TypeId,
    ) -> Vec<fn(Value) -> Value> {
        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            let Some(&index) = reached_by.get(&current) else {
                break;
            };
            let widening = &self.widenings[index];
            path.push(widening.widen);
            current = widening.from;
        }
        path.reverse();
        path
    }
}

fn widen_along(path: &[fn(Value) -> Value], value: Value) -> Value {
    path.iter().fold(value, |value, widen| widen(value))
}

impl<T: 'static> Default for ConverterTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn widen_value<Sub: Any, Super: Any + From<Sub>>(value: Value) -> Value {
    match value.downcast::<Sub>() {
        Ok(sub) => Value::new(Super::from(sub)),
        Err(value) => value,
    }
}
