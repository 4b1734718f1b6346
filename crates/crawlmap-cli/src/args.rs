//! Command-line argument definitions for the crawlmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select input/output paths and the configuration
//! file, and override individual configuration values for a single run.

use clap::Parser;

use crawlmap::config::GraphMode;

/// Command-line arguments for the crawlmap layout tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the graph response JSON
    #[arg(help = "Path to the input graph JSON file")]
    pub input: String,

    /// Path to the output render records JSON
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Graph granularity (website, domain)
    #[arg(short, long)]
    pub mode: Option<GraphMode>,

    /// Viewport width
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of simulation steps
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Seed for the coincident-node tie-break
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
