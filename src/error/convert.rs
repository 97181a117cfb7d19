use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a fallible converter.
///
/// The caller's error is kept as the source so it can be downcast again.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct ConvertError {
    #[source]
    source: BoxError,
}

impl ConvertError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}
