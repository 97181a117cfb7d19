use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use resolve_chain::cli;
use resolve_chain::logging::{self, Verbosity};
use resolve_chain::output::OutputFormatter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let report = cli::run(&args).context("Could not resolve a value")?;
    if report.is_resolved() {
        tracing::info!(source = ?report.source, "resolved");
    } else {
        tracing::info!(target_kind = report.target, "nothing resolved, printing null");
    }

    tracing::debug!(format = args.format.as_str(), "rendering report");
    let rendered = OutputFormatter::format(&report, args.format)?;
    println!("{rendered}");

    Ok(())
}
