//! Configuration types for crawlmap layouts.
//!
//! This module provides configuration structures that control how a graph
//! is built, simulated and projected. All types implement
//! [`serde::Deserialize`] with per-field defaults, so a partial TOML file is
//! enough to override a single parameter.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Simulation parameters for the force-directed engine.
//! - [`ViewportConfig`] - Size of the area the layout is projected into.
//! - [`GraphConfig`] - How crawled pages are turned into a graph.
//!
//! # Example
//!
//! ```
//! # use crawlmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 500);
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crawlmap_core::geometry::Size;

use crate::error::CrawlmapError;

/// Top-level configuration combining layout, viewport and graph settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Simulation parameters.
    #[serde(default)]
    layout: LayoutConfig,

    /// Projection target.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Graph construction settings.
    #[serde(default)]
    graph: GraphConfig,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportConfig {
        &mut self.viewport
    }

    /// Returns the graph configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphConfig {
        &mut self.graph
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlmapError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CrawlmapError> {
        self.layout.validate()?;
        self.viewport.validate()
    }
}

/// Whether a layout run restarts from the origin or continues from the
/// current node positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Reset every node to the origin, then simulate.
    #[default]
    Full,
    /// Keep the current positions and simulate further.
    Incremental,
}

/// Parameters of the force-directed simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    iterations: usize,
    ideal_edge_length: f32,
    max_repulsive_distance: f32,
    time_step: f32,
    max_step_displacement: f32,
    seed: Option<u64>,
    mode: LayoutMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            ideal_edge_length: 2.0,
            max_repulsive_distance: 6.0,
            time_step: 0.01,
            max_step_displacement: 0.5,
            seed: None,
            mode: LayoutMode::Full,
        }
    }
}

impl LayoutConfig {
    /// Number of simulation steps per layout run
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Resting length `k` that edges pull their endpoints toward
    pub fn ideal_edge_length(&self) -> f32 {
        self.ideal_edge_length
    }

    /// Separation beyond which node pairs stop repelling
    pub fn max_repulsive_distance(&self) -> f32 {
        self.max_repulsive_distance
    }

    /// Scale `c` from accumulated force to displacement
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Per-axis limit on a single step's displacement
    pub fn max_step_displacement(&self) -> f32 {
        self.max_step_displacement
    }

    /// Seed for the coincidence tie-break, `None` for a fresh seed per run
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Set the number of iterations for the force simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the ideal edge length
    pub fn set_ideal_edge_length(&mut self, length: f32) -> &mut Self {
        self.ideal_edge_length = length;
        self
    }

    /// Set the repulsion cutoff radius
    pub fn set_max_repulsive_distance(&mut self, distance: f32) -> &mut Self {
        self.max_repulsive_distance = distance;
        self
    }

    pub fn set_time_step(&mut self, time_step: f32) -> &mut Self {
        self.time_step = time_step;
        self
    }

    pub fn set_max_step_displacement(&mut self, displacement: f32) -> &mut Self {
        self.max_step_displacement = displacement;
        self
    }

    /// Set the jitter seed
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn set_mode(&mut self, mode: LayoutMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Rejects parameters that would make the simulation diverge or stall.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlmapError::Config`] if a length, time step or
    /// displacement limit is not a positive finite number.
    pub fn validate(&self) -> Result<(), CrawlmapError> {
        let fields = [
            ("ideal_edge_length", self.ideal_edge_length),
            ("max_repulsive_distance", self.max_repulsive_distance),
            ("time_step", self.time_step),
            ("max_step_displacement", self.max_step_displacement),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CrawlmapError::Config(format!(
                    "layout.{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Size of the viewport a finished layout is projected into.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    width: f32,
    height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ViewportConfig {
    /// Returns the viewport as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    fn validate(&self) -> Result<(), CrawlmapError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CrawlmapError::Config(format!(
                    "viewport.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Granularity of the graph built from crawled pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// One node per crawled page.
    #[default]
    Website,
    /// One node per URL host; page links between hosts become weighted edges.
    ///
    /// The host key is the `host[:port]` part of the URL, lowercased. A URL
    /// without a `scheme://` prefix is read as starting with the host, so
    /// `Example.com/about` groups under `example.com`. Links between pages on
    /// the same host are dropped.
    Domain,
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphMode::Website => write!(f, "website"),
            GraphMode::Domain => write!(f, "domain"),
        }
    }
}

impl FromStr for GraphMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "website" => Ok(GraphMode::Website),
            "domain" => Ok(GraphMode::Domain),
            other => Err(format!(
                "unknown graph mode `{other}`, expected `website` or `domain`"
            )),
        }
    }
}

/// Graph construction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    mode: GraphMode,
}

impl GraphConfig {
    /// Returns the graph mode
    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GraphMode) -> &mut Self {
        self.mode = mode;
        self
    }
}
