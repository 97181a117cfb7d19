use crate::engine::Chain;
use crate::error::{ParseError, Result};
use crate::output::Report;
use crate::parse::FromCandidate;
use anyhow::Context as AnyhowContext;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::env::VarError;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    String,
}

/// One `--candidate` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSpec {
    /// Literal text, taken as given
    Literal(String),
    /// Environment variable, read when the chain is resolved
    Env(String),
}

impl FromStr for CandidateSpec {
    type Err = ParseError;

    fn from_str(spec: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(name) = spec.strip_prefix("env:") {
            if name.is_empty() {
                return Err(ParseError::empty_env_name(spec));
            }
            return Ok(Self::Env(name.to_string()));
        }
        let text = spec.strip_prefix("lit:").unwrap_or(spec);
        Ok(Self::Literal(text.to_string()))
    }
}

#[derive(Parser, Debug)]
#[command(name = "resolve-chain")]
#[command(about = "Resolve a value from ordered candidates with conversion and fallback defaults", long_about = None)]
pub struct Args {
    /// Candidate in priority order: env:NAME, lit:TEXT or TEXT. Can be specified multiple times.
    #[arg(short = 'c', long = "candidate", value_name = "SPEC")]
    pub candidates: Vec<CandidateSpec>,

    /// Type the value is converted to
    #[arg(short, long, value_enum, default_value = "string")]
    pub target: ValueKind,

    /// Skip candidates that are present but empty
    #[arg(long)]
    pub non_empty: bool,

    /// Last-resort candidate tried after all --candidate values
    #[arg(long = "else", value_name = "TEXT")]
    pub fallback: Option<String>,

    /// Default used when no candidate resolves
    #[arg(short, long, value_name = "TEXT")]
    pub default: Option<String>,

    /// Print null instead of failing when nothing resolves
    #[arg(long)]
    pub optional: bool,

    /// Output format (plain, json)
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref default) = self.default {
            self.target
                .check(default)
                .with_context(|| format!("Default is not a valid {}", self.target.as_str()))?;
        }
        Ok(())
    }
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int => i64::KIND,
            ValueKind::Float => f64::KIND,
            ValueKind::Bool => bool::KIND,
            ValueKind::String => String::KIND,
        }
    }

    /// Parse `input` as this kind, discarding the value
    pub fn check(&self, input: &str) -> std::result::Result<(), ParseError> {
        match self {
            ValueKind::Int => i64::from_candidate(input).map(drop),
            ValueKind::Float => f64::from_candidate(input).map(drop),
            ValueKind::Bool => bool::from_candidate(input).map(drop),
            ValueKind::String => Ok(()),
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

/// Assemble the chain described by `args` for target type `T`.
///
/// Every textual candidate is converted with `T::from_candidate`; a candidate
/// that fails to parse aborts resolution.
pub fn build_chain<T>(args: &Args) -> std::result::Result<Chain<T>, ParseError>
where
    T: FromCandidate + Clone + 'static,
{
    let mut chain = Chain::<T>::new();

    for spec in &args.candidates {
        chain = match spec {
            CandidateSpec::Literal(text) if args.non_empty => {
                chain.assign_if_with(Some(text.clone()), |s: &String| !s.is_empty())
            }
            CandidateSpec::Literal(text) => chain.assign_if(Some(text.clone())),
            CandidateSpec::Env(name) if args.non_empty => {
                let name = name.clone();
                chain.assign_if_lazy_with(move || read_env(&name), |s: &String| !s.is_empty())
            }
            CandidateSpec::Env(name) => {
                let name = name.clone();
                chain.assign_if_lazy(move || read_env(&name))
            }
        };
    }

    if let Some(ref text) = args.fallback {
        chain = chain.or_else(Some(text.clone()));
    }

    chain = chain.try_convert(|s: String| T::from_candidate(&s));

    if let Some(ref text) = args.default {
        chain = chain.default_value(T::from_candidate(text)?);
    }

    Ok(chain)
}

/// Read an environment variable candidate. Unset is absent; a value that is
/// not valid UTF-8 is kept, with invalid sequences replaced.
pub fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            warn!(name, "environment variable is not valid UTF-8, decoding lossily");
            Some(raw.to_string_lossy().into_owned())
        }
    }
}

/// Resolve the chain described by `args` into a report
pub fn run(args: &Args) -> Result<Report> {
    match args.target {
        ValueKind::Int => run_as::<i64>(args),
        ValueKind::Float => run_as::<f64>(args),
        ValueKind::Bool => run_as::<bool>(args),
        ValueKind::String => run_as::<String>(args),
    }
}

fn run_as<T>(args: &Args) -> Result<Report>
where
    T: FromCandidate + Clone + Serialize + Display + 'static,
{
    let chain = build_chain::<T>(args)?;
    debug!(target_kind = T::KIND, candidates = chain.candidate_count(), "resolving");

    let resolution = chain.resolve_detailed()?;
    let source = resolution.source();
    let value = if args.optional {
        resolution.into_value()
    } else {
        Some(resolution.into_result()?)
    };

    Ok(Report::new(T::KIND, value, source))
}
