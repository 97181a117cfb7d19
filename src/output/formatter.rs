use anyhow::Result;

use crate::cli::OutputFormat;

use super::Report;

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Plain => Ok(Self::plain(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Bare value: strings unquoted, everything else as JSON text
    fn plain(report: &Report) -> String {
        match &report.value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
