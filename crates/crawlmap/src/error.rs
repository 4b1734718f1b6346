//! Error types for crawlmap operations.
//!
//! [`GraphError`] covers precondition violations detected while a graph is
//! being assembled. [`CrawlmapError`] is the library boundary error that
//! wraps it together with I/O, JSON and configuration failures.
//!
//! Degenerate geometry (coincident nodes, zero-extent bounds) is never an
//! error; the layout engine recovers from it internally.

use std::io;

use thiserror::Error;

/// A graph that would violate the node/edge invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("edge {source_id} -> {target_id} references unknown node `{missing}`")]
    UnknownNode {
        source_id: String,
        target_id: String,
        missing: String,
    },
}

/// The main error type for crawlmap operations.
#[derive(Debug, Error)]
pub enum CrawlmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),
}
