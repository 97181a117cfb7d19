use super::ConvertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no candidate resolved to type '{target}' and no default is configured")]
    Unresolved { target: &'static str },

    #[error("failed to convert '{from}' to '{target}': {source}")]
    Conversion {
        from: &'static str,
        target: &'static str,
        #[source]
        source: ConvertError,
    },
}

impl ResolveError {
    pub fn unresolved(target: &'static str) -> Self {
        Self::Unresolved { target }
    }

    pub fn conversion(from: &'static str, target: &'static str, source: ConvertError) -> Self {
        Self::Conversion {
            from,
            target,
            source,
        }
    }

    /// Target type named by the error
    pub fn target(&self) -> &'static str {
        match self {
            Self::Unresolved { target } | Self::Conversion { target, .. } => target,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }
}
