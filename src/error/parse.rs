use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("cannot parse '{input}' as {kind}: {message}")]
    InvalidValue {
        input: String,
        kind: &'static str,
        message: String,
    },

    #[error("empty environment variable name in candidate '{spec}'")]
    EmptyEnvName { spec: String },
}

impl ParseError {
    pub fn invalid_value(
        input: impl Into<String>,
        kind: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            input: input.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn empty_env_name(spec: impl Into<String>) -> Self {
        Self::EmptyEnvName { spec: spec.into() }
    }
}
