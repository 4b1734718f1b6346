//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory)
//! and applying per-run overrides from the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use crawlmap::{CrawlmapError, config::AppConfig};

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for CrawlmapError {
    fn from(err: ConfigError) -> Self {
        CrawlmapError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Local,
    System,
}

/// Implicit configuration locations, in the order they are tried.
fn implicit_candidates() -> Vec<(ConfigSource, PathBuf)> {
    let mut candidates = vec![(ConfigSource::Local, PathBuf::from("crawlmap/config.toml"))];
    match ProjectDirs::from("com", "crawlmap", "crawlmap") {
        Some(dirs) => candidates.push((ConfigSource::System, dirs.config_dir().join("config.toml"))),
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

/// Find and load the configuration for a run.
///
/// An explicit path always wins and must exist. Otherwise the first of
/// `crawlmap/config.toml` and the platform config directory that exists is
/// loaded, falling back to [`AppConfig::default`].
///
/// # Errors
///
/// Returns [`CrawlmapError::Config`] if the explicit file is missing or the
/// chosen file is not valid TOML for [`AppConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CrawlmapError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let found = implicit_candidates()
        .into_iter()
        .find(|(_, path)| path.exists());

    match found {
        Some((source, path)) => {
            info!(source:? = source, path = path.display().to_string(); "Loading configuration");
            load_config_file(path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CrawlmapError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse TOML configuration text
pub fn parse_config(content: &str) -> Result<AppConfig, CrawlmapError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

/// Apply command-line overrides on top of a loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(mode) = args.mode {
        config.graph_mut().set_mode(mode);
    }
    if let Some(width) = args.width {
        config.viewport_mut().set_width(width);
    }
    if let Some(height) = args.height {
        config.viewport_mut().set_height(height);
    }
    if let Some(iterations) = args.iterations {
        config.layout_mut().set_iterations(iterations);
    }
    if args.seed.is_some() {
        config.layout_mut().set_seed(args.seed);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crawlmap::config::{GraphMode, LayoutMode};

    use super::*;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [layout]
            iterations = 120
            seed = 7

            [graph]
            mode = "domain"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().iterations(), 120);
        assert_eq!(config.layout().seed(), Some(7));
        assert_eq!(config.layout().ideal_edge_length(), 2.0);
        assert_eq!(config.layout().mode(), LayoutMode::Full);
        assert_eq!(config.graph().mode(), GraphMode::Domain);
        assert_eq!(config.viewport().size().width(), 800.0);
    }

    #[test]
    fn test_parse_full_layout_section() {
        let config = parse_config(
            r#"
            [layout]
            ideal_edge_length = 3.5
            max_repulsive_distance = 9.0
            time_step = 0.02
            max_step_displacement = 0.25
            mode = "incremental"

            [viewport]
            width = 1024.0
            height = 768.0
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().ideal_edge_length(), 3.5);
        assert_eq!(config.layout().max_repulsive_distance(), 9.0);
        assert_eq!(config.layout().time_step(), 0.02);
        assert_eq!(config.layout().max_step_displacement(), 0.25);
        assert_eq!(config.layout().mode(), LayoutMode::Incremental);
        assert_eq!(config.viewport().size().height(), 768.0);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = parse_config("[graph]\nmode = \"pages\"\n").unwrap_err();
        assert!(matches!(err, CrawlmapError::Config(_)));
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_load_explicit_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\niterations = 42").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().iterations(), 42);
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_local_config_is_tried_before_system() {
        let candidates = implicit_candidates();
        assert_eq!(candidates[0], (ConfigSource::Local, PathBuf::from("crawlmap/config.toml")));
        assert!(
            candidates[1..]
                .iter()
                .all(|(source, path)| *source == ConfigSource::System && path.ends_with("config.toml"))
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = parse_config("[layout]\niterations = 42\nseed = 1\n").unwrap();
        let args = Args {
            mode: Some(GraphMode::Domain),
            width: Some(320.0),
            iterations: Some(7),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.graph().mode(), GraphMode::Domain);
        assert_eq!(config.viewport().size().width(), 320.0);
        assert_eq!(config.viewport().size().height(), 600.0);
        assert_eq!(config.layout().iterations(), 7);
        assert_eq!(config.layout().seed(), Some(1));
    }
}
