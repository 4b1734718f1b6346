//! CLI logic for the crawlmap layout tool.
//!
//! This module reads a crawler graph response from disk, lays it out and
//! writes the projected render records as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use crawlmap::{CrawlmapError, GraphLayouter};

/// Run the crawlmap CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CrawlmapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph responses
/// - Duplicate pages or dangling links
pub fn run(args: &Args) -> Result<(), CrawlmapError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args);

    let body = fs::read_to_string(&args.input)?;

    let layouter = GraphLayouter::new(app_config)?;
    let json = layouter.render_json(&body)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
