//! Directed graph model consumed by the layout engine.
//!
//! A [`Graph`] owns an insertion-ordered set of [`Node`]s keyed by their
//! string id and an insertion-ordered list of [`Edge`]s that refer to nodes
//! by [`NodeIndex`]. Graphs are assembled through a [`GraphBuilder`], which
//! rejects duplicate ids and edges naming absent nodes, so every `Graph`
//! value upholds the edge-membership invariant.
//!
//! Node positions belong to the layout engine. The only other piece of
//! geometry stored here is the derived [`Bounds`], recomputed at the end of
//! every layout run.

use indexmap::{IndexMap, map::Entry};
use log::trace;

use crawlmap_core::geometry::{Bounds, Point};

use crate::error::GraphError;

/// Position of a node within its graph's insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the raw index into the graph's node order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A graph node: identity, simulated position and an opaque payload.
#[derive(Debug, Clone)]
pub struct Node<P> {
    id: String,
    position: Point,
    payload: P,
}

impl<P> Node<P> {
    /// Returns the node id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current simulated position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the caller-supplied payload
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// A directed, weighted edge between two nodes of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    source: NodeIndex,
    target: NodeIndex,
    weight: u32,
}

impl Edge {
    fn new(source: NodeIndex, target: NodeIndex, weight: u32) -> Self {
        Self {
            source,
            target,
            weight: weight.max(1),
        }
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Edge multiplicity, always at least 1.
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// A directed graph with simulation state for the layout engine.
#[derive(Debug, Clone)]
pub struct Graph<P> {
    nodes: IndexMap<String, Node<P>>,
    edges: Vec<Edge>,
    bounds: Bounds,
}

impl<P> Graph<P> {
    /// Returns the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P>> {
        self.nodes.values()
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the node stored at `index`, if any.
    pub fn node(&self, index: NodeIndex) -> Option<&Node<P>> {
        self.nodes.get_index(index.0).map(|(_, node)| node)
    }

    /// Looks up a node index by id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.get_index_of(id).map(NodeIndex)
    }

    /// Looks up a node by id.
    pub fn node_by_id(&self, id: &str) -> Option<&Node<P>> {
        self.nodes.get(id)
    }

    /// Returns the bounding box computed by the most recent layout run.
    ///
    /// Before any layout, and for an empty graph, this is [`Bounds::empty`].
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current position of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this graph.
    pub(crate) fn position(&self, index: usize) -> Point {
        self.nodes[index].position
    }

    pub(crate) fn set_position(&mut self, index: usize, position: Point) {
        self.nodes[index].position = position;
    }

    pub(crate) fn positions_mut(&mut self) -> impl Iterator<Item = &mut Point> {
        self.nodes.values_mut().map(|node| &mut node.position)
    }

    /// Recomputes the derived bounds from the current node positions.
    pub(crate) fn recompute_bounds(&mut self) -> Bounds {
        self.bounds = Bounds::from_points(self.nodes.values().map(|node| node.position));
        self.bounds
    }
}

/// Incremental, validating constructor for [`Graph`].
///
/// # Examples
///
/// ```
/// use crawlmap::graph::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node("a", ()).unwrap();
/// builder.add_node("b", ()).unwrap();
/// builder.add_edge("a", "b", 1).unwrap();
///
/// // Edges never create nodes.
/// assert!(builder.add_edge("a", "missing", 1).is_err());
///
/// let graph = builder.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug)]
pub struct GraphBuilder<P> {
    nodes: IndexMap<String, Node<P>>,
    edges: Vec<Edge>,
}

impl<P> Default for GraphBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> GraphBuilder<P> {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Appends a node at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id was
    /// already added.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        payload: P,
    ) -> Result<NodeIndex, GraphError> {
        let id = id.into();
        let index = self.nodes.len();
        match self.nodes.entry(id) {
            Entry::Occupied(entry) => Err(GraphError::DuplicateNode(entry.key().clone())),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                entry.insert(Node {
                    id,
                    position: Point::default(),
                    payload,
                });
                Ok(NodeIndex(index))
            }
        }
    }

    /// Appends an edge between two previously added nodes.
    ///
    /// A `weight` of zero is clamped to 1.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is absent.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: u32) -> Result<(), GraphError> {
        let unknown = |missing: &str| GraphError::UnknownNode {
            source_id: source.to_string(),
            target_id: target.to_string(),
            missing: missing.to_string(),
        };
        let source_index = self.nodes.get_index_of(source).ok_or_else(|| unknown(source))?;
        let target_index = self.nodes.get_index_of(target).ok_or_else(|| unknown(target))?;

        self.edges.push(Edge::new(
            NodeIndex(source_index),
            NodeIndex(target_index),
            weight,
        ));
        Ok(())
    }

    /// Finishes construction.
    pub fn build(self) -> Graph<P> {
        trace!(
            node_count = self.nodes.len(),
            edge_count = self.edges.len();
            "Graph built"
        );
        Graph {
            nodes: self.nodes,
            edges: self.edges,
            bounds: Bounds::empty(),
        }
    }
}
