//! Projection of a finished layout into viewport space.
//!
//! The simulation works in unitless coordinates centred loosely around the
//! origin. [`project`] maps the graph's bounding box onto `[0, width] ×
//! [0, height]` and emits render-ready [`RenderNode`] and [`RenderEdge`]
//! records for a drawing surface to consume.

use serde::Serialize;

use crawlmap_core::geometry::{Point, Size};

use crate::graph::Graph;

/// A node placed in viewport coordinates, carrying its payload through.
#[derive(Debug, Clone, Serialize)]
pub struct RenderNode<'a, P> {
    id: &'a str,
    position: Point,
    payload: &'a P,
}

impl<'a, P> RenderNode<'a, P> {
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Returns the projected position
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn payload(&self) -> &'a P {
        self.payload
    }
}

/// An edge between two projected nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge<'a> {
    id: String,
    source: &'a str,
    target: &'a str,
    weight: u32,
}

impl<'a> RenderEdge<'a> {
    /// Returns the edge id, `e{source}-{target}`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn target(&self) -> &'a str {
        self.target
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// Render records for every node and edge of a projected graph.
#[derive(Debug, Clone, Serialize)]
pub struct Projection<'a, P> {
    nodes: Vec<RenderNode<'a, P>>,
    edges: Vec<RenderEdge<'a>>,
}

impl<'a, P> Projection<'a, P> {
    pub fn nodes(&self) -> &[RenderNode<'a, P>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge<'a>] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Linear map of one axis from simulation space to viewport space.
#[derive(Debug, Clone, Copy)]
enum AxisMap {
    Scaled { min: f32, factor: f32 },
    /// Zero or undefined extent: every node sits in the middle of the axis.
    Centered(f32),
}

impl AxisMap {
    fn new(min: f32, max: f32, extent: f32) -> Self {
        let span = max - min;
        if span.is_finite() && span > 0.0 {
            AxisMap::Scaled {
                min,
                factor: extent / span,
            }
        } else {
            AxisMap::Centered(extent / 2.0)
        }
    }

    fn apply(self, value: f32) -> f32 {
        match self {
            AxisMap::Scaled { min, factor } => (value - min) * factor,
            AxisMap::Centered(offset) => offset,
        }
    }
}

/// Maps every node of `graph` into `[0, viewport.width] × [0, viewport.height]`.
///
/// Uses the bounds recorded by the last layout run. The minimum corner lands
/// on `(0, 0)` and the maximum corner on `(width, height)`. An axis with no
/// extent (a single node, or nodes aligned on that axis) is centred instead
/// of dividing by zero; an empty graph yields an empty projection.
///
/// # Examples
///
/// ```
/// use crawlmap::{graph::GraphBuilder, layout::{LayoutEngine, project}};
/// use crawlmap_core::geometry::Size;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node("home", ()).unwrap();
/// let mut graph = builder.build();
///
/// LayoutEngine::default().layout(&mut graph);
/// let projection = project(&graph, Size::new(800.0, 600.0));
///
/// let home = &projection.nodes()[0];
/// assert_eq!(home.position().x(), 400.0);
/// assert_eq!(home.position().y(), 300.0);
/// ```
pub fn project<'a, P>(graph: &'a Graph<P>, viewport: Size) -> Projection<'a, P> {
    let bounds = graph.bounds();
    let x_map = AxisMap::new(bounds.min_x(), bounds.max_x(), viewport.width());
    let y_map = AxisMap::new(bounds.min_y(), bounds.max_y(), viewport.height());

    let nodes: Vec<RenderNode<'a, P>> = graph
        .nodes()
        .map(|node| RenderNode {
            id: node.id(),
            position: Point::new(
                x_map.apply(node.position().x()),
                y_map.apply(node.position().y()),
            ),
            payload: node.payload(),
        })
        .collect();

    // Edge endpoints index into the node order the builder validated.
    let edges = graph
        .edges()
        .iter()
        .map(|edge| {
            let source = nodes[edge.source().index()].id;
            let target = nodes[edge.target().index()].id;
            RenderEdge {
                id: format!("e{source}-{target}"),
                source,
                target,
                weight: edge.weight(),
            }
        })
        .collect();

    Projection { nodes, edges }
}
