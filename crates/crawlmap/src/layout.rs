//! Force-directed layout and viewport projection.
//!
//! - [`LayoutEngine`] runs the spring-embedder simulation on a [`Graph`](crate::graph::Graph).
//! - [`Jitter`] / [`SeededJitter`] break ties between coincident nodes.
//! - [`project`] turns the result into render records for a given viewport.

mod engine;
mod jitter;
mod projection;

pub use engine::LayoutEngine;
pub use jitter::{Jitter, SeededJitter};
pub use projection::{Projection, RenderEdge, RenderNode, project};
