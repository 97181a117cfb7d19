/// Type-erased candidate value.
///
/// Candidates of any input type travel through the chain as a `Value` so the
/// resolver can inspect their runtime type before deciding whether to accept,
/// convert or skip them.
use std::any::{Any, TypeId};
use std::fmt;

pub struct Value {
    /// The boxed payload
    inner: Box<dyn Any>,

    /// Runtime type of the payload
    type_id: TypeId,

    /// Human-readable name of the payload type, used in logs and errors
    type_name: &'static str,
}

impl Value {
    /// Wrap a concrete value
    pub fn new<V: Any>(value: V) -> Self {
        Self {
            inner: Box::new(value),
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check the runtime type without consuming the value
    pub fn is<V: Any>(&self) -> bool {
        self.type_id == TypeId::of::<V>()
    }

    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.inner.downcast_ref::<V>()
    }

    /// Take the payload out as `V`, handing the value back on a type mismatch
    pub fn downcast<V: Any>(self) -> Result<V, Self> {
        if !self.is::<V>() {
            return Err(self);
        }
        let Self {
            inner,
            type_id,
            type_name,
        } = self;
        match inner.downcast::<V>() {
            Ok(boxed) => Ok(*boxed),
            Err(inner) => Err(Self {
                inner,
                type_id,
                type_name,
            }),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
