//! crawlmap CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use crawlmap::CrawlmapError;
use crawlmap_cli::{Args, error_adapter::to_reportable};

/// Parse `--log-level`, falling back to `warn` for unknown names.
fn level_filter(name: &str) -> LevelFilter {
    LevelFilter::from_str(name).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{name}`, falling back to warn");
        LevelFilter::Warn
    })
}

/// Render `err` as a miette report, or its plain message if rendering fails.
fn render_error(err: &CrawlmapError) -> String {
    let mut report = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut report, &to_reportable(err)) {
        Ok(()) => report,
        Err(_) => err.to_string(),
    }
}

fn main() {
    // Panics get the same fancy rendering as errors
    miette::set_panic_hook();

    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level_filter(&args.log_level))
        .init();

    debug!(args:?; "Parsed arguments");

    let Err(err) = crawlmap_cli::run(&args) else {
        info!(output = args.output; "Done");
        return;
    };

    error!("{}", render_error(&err));
    process::exit(1);
}
