use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn to_filter(self) -> String {
        let level = self.to_level();
        format!("resolve_chain={level}")
    }

    /// At trace level each `resolve` and `candidate` span reports when it
    /// closes, so the scan order and timing of every candidate is visible.
    fn span_events(self) -> FmtSpan {
        match self {
            Self::Trace => FmtSpan::CLOSE,
            _ => FmtSpan::NONE,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the flags.
///
/// Logs go to stderr so resolved values on stdout stay machine-readable.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.to_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(verbosity.span_events())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    match verbosity {
        Verbosity::Quiet => {
            subscriber.with_writer(std::io::sink).init();
        }
        Verbosity::Normal => {
            subscriber.with_writer(std::io::stderr).without_time().init();
        }
        _ => {
            subscriber.with_writer(std::io::stderr).init();
        }
    }
}
