//! Crawlmap - force-directed layout for a crawler's discovered-site graph.
//!
//! The crate turns the crawler's graph endpoint response into a directed
//! graph of pages (or hosts), runs a spring-embedder simulation over it and
//! projects the result into a viewport as render-ready node and edge
//! records. It never draws; a rendering surface consumes the records.

pub mod config;
pub mod graph;
pub mod layout;
pub mod source;

mod error;

pub use crawlmap_core::geometry;

pub use error::{CrawlmapError, GraphError};

use log::{debug, info, trace};

use config::AppConfig;
use graph::Graph;
use layout::{LayoutEngine, Projection};
use source::{GraphResponse, PagePayload};

/// Runs the whole pipeline from a graph response to render records.
///
/// # Examples
///
/// ```rust
/// use crawlmap::{GraphLayouter, config::AppConfig};
///
/// let body = r#"{
///     "nodes": [
///         {"pk": 1, "fields": {"url": "https://example.com/", "owner": 5}},
///         {"pk": 2, "fields": {"url": "https://example.com/about", "owner": 5}}
///     ],
///     "edges": [{"fields": {"source": 1, "target": 2}}]
/// }"#;
///
/// let layouter = GraphLayouter::new(AppConfig::default()).expect("valid config");
/// let mut graph = layouter.parse(body).expect("Failed to parse");
/// layouter.layout(&mut graph);
///
/// let projection = layouter.project(&graph);
/// assert_eq!(projection.nodes().len(), 2);
/// assert_eq!(projection.edges()[0].id(), "e1-2");
/// ```
#[derive(Debug, Default)]
pub struct GraphLayouter {
    config: AppConfig,
}

impl GraphLayouter {
    /// Create a new layouter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlmapError::Config`] if the configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self, CrawlmapError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a graph response body into a graph in the configured mode.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlmapError::Json`] for a malformed body and
    /// [`CrawlmapError::Graph`] for duplicate pages or dangling links.
    pub fn parse(&self, body: &str) -> Result<Graph<PagePayload>, CrawlmapError> {
        let mode = self.config.graph().mode();
        info!(mode:% = mode; "Building graph from response");

        let response = GraphResponse::from_json(body)?;
        let graph = response.build_graph(mode)?;

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count();
            "Graph built successfully"
        );
        Ok(graph)
    }

    /// Lay out `graph` according to the configured [`LayoutMode`](config::LayoutMode).
    pub fn layout<P>(&self, graph: &mut Graph<P>) {
        let mut engine = LayoutEngine::new(self.config.layout());
        engine.run(graph);
        trace!(bounds:? = graph.bounds(); "Layout finished");
    }

    /// Project a laid out graph into the configured viewport.
    pub fn project<'a, P>(&self, graph: &'a Graph<P>) -> Projection<'a, P> {
        layout::project(graph, self.config.viewport().size())
    }

    /// Parse, lay out and project `body`, returning the render records as
    /// pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns any error from [`parse`](Self::parse) or from serializing the
    /// records.
    pub fn render_json(&self, body: &str) -> Result<String, CrawlmapError> {
        let mut graph = self.parse(body)?;
        self.layout(&mut graph);

        let projection = self.project(&graph);
        info!(
            node_count = projection.nodes().len(),
            edge_count = projection.edges().len();
            "Projected layout"
        );
        Ok(serde_json::to_string_pretty(&projection)?)
    }
}
