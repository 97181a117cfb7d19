/// Parsing of textual candidates into the target types offered on the
/// command line.
use crate::error::ParseError;

pub trait FromCandidate: Sized {
    /// Name shown in parse errors
    const KIND: &'static str;

    fn from_candidate(input: &str) -> Result<Self, ParseError>;
}

impl FromCandidate for i64 {
    const KIND: &'static str = "int";

    fn from_candidate(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim().replace('_', "");
        let parsed = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            i64::from_str_radix(hex, 16)
        } else {
            trimmed.parse::<i64>()
        };
        parsed.map_err(|e| ParseError::invalid_value(input, Self::KIND, e.to_string()))
    }
}

impl FromCandidate for f64 {
    const KIND: &'static str = "float";

    fn from_candidate(input: &str) -> Result<Self, ParseError> {
        let value = input
            .trim()
            .parse::<f64>()
            .map_err(|e| ParseError::invalid_value(input, Self::KIND, e.to_string()))?;
        if !value.is_finite() {
            return Err(ParseError::invalid_value(
                input,
                Self::KIND,
                "value must be finite",
            ));
        }
        Ok(value)
    }
}

impl FromCandidate for bool {
    const KIND: &'static str = "bool";

    fn from_candidate(input: &str) -> Result<Self, ParseError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ParseError::invalid_value(
                input,
                Self::KIND,
                "expected true/false, yes/no, on/off or 1/0",
            )),
        }
    }
}

impl FromCandidate for String {
    const KIND: &'static str = "string";

    fn from_candidate(input: &str) -> Result<Self, ParseError> {
        Ok(input.to_string())
    }
}
