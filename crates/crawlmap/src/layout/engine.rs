//! Force-directed layout engine
//!
//! This module implements the spring-embedder simulation that places the
//! nodes of a [`Graph`]. Every step accumulates two kinds of force into a
//! scratch buffer and then moves each node by a bounded amount:
//!
//! - pairwise repulsion of magnitude `k²/d`, cut off at
//!   `max_repulsive_distance`;
//! - a spring force along every edge of magnitude `(d² − k²)/k`, scaled by
//!   `ln(weight)·0.5 + 1`, which pulls endpoints together beyond the ideal
//!   length `k` and pushes them apart below it.
//!
//! Repulsion decides its cutoff on the real distance and never clamps it,
//! while the spring caps the distance it feeds into the magnitude at the
//! same radius.

use log::{debug, trace};

use crawlmap_core::geometry::{Point, Size};

use crate::{
    config::{LayoutConfig, LayoutMode},
    graph::Graph,
    layout::{
        jitter::{Jitter, SeededJitter},
        projection::{self, Projection},
    },
};

/// Squared separation below which two nodes count as coincident.
const MIN_SEPARATION_SQUARED: f32 = 0.01;

/// Force layout engine for crawl graphs
///
/// The engine keeps no state between runs apart from its parameters, the
/// jitter source and a per-step force buffer that is zeroed at the end of
/// every step. The graph passed in owns all positions.
pub struct LayoutEngine<J = SeededJitter> {
    iterations: usize,
    ideal_edge_length: f32,
    max_repulsive_distance: f32,
    time_step: f32,
    max_step_displacement: f32,
    mode: LayoutMode,
    jitter: J,
    forces: Vec<Point>,
}

impl LayoutEngine<SeededJitter> {
    /// Create an engine from the given configuration, seeding the tie-break
    /// jitter from `config.seed()`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self::with_jitter(config, SeededJitter::new(config.seed()))
    }
}

impl Default for LayoutEngine<SeededJitter> {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl<J: Jitter> LayoutEngine<J> {
    /// Create an engine with a caller-supplied jitter source.
    pub fn with_jitter(config: &LayoutConfig, jitter: J) -> Self {
        Self {
            iterations: config.iterations(),
            ideal_edge_length: config.ideal_edge_length(),
            max_repulsive_distance: config.max_repulsive_distance(),
            time_step: config.time_step(),
            max_step_displacement: config.max_step_displacement(),
            mode: config.mode(),
            jitter,
            forces: Vec::new(),
        }
    }

    /// Set the number of iterations for the force simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Returns the accumulated force per node.
    ///
    /// Outside of a step this is all zeros; it is exposed so callers can
    /// check that no force leaks out of a step.
    pub fn forces(&self) -> &[Point] {
        &self.forces
    }

    /// Reset every node position and every force accumulator to the origin,
    /// and rewind the jitter source.
    pub fn prepare<P>(&mut self, graph: &mut Graph<P>) {
        for position in graph.positions_mut() {
            *position = Point::default();
        }
        self.reset_forces(graph.node_count());
        self.jitter.reset();
    }

    /// Run one simulation iteration: repulsion, attraction, integration.
    pub fn step<P>(&mut self, graph: &mut Graph<P>) {
        let node_count = graph.node_count();
        self.reset_forces(node_count);

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                self.repulse(graph, i, j);
            }
        }

        for edge in graph.edges() {
            self.attract(
                graph,
                edge.source().index(),
                edge.target().index(),
                edge.weight(),
            );
        }

        self.integrate(graph);
    }

    /// Full relayout: reset, run the configured number of steps and
    /// recompute the graph bounds.
    pub fn layout<P>(&mut self, graph: &mut Graph<P>) {
        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            iterations = self.iterations;
            "Running full force layout"
        );
        self.prepare(graph);
        self.run_steps(graph, self.iterations);
        let bounds = graph.recompute_bounds();
        trace!(bounds:? = bounds; "Layout bounds");
    }

    /// Incremental refresh: run the configured number of steps from the
    /// current positions, then recompute the graph bounds.
    pub fn refresh<P>(&mut self, graph: &mut Graph<P>) {
        debug!(
            node_count = graph.node_count(),
            iterations = self.iterations;
            "Refreshing force layout from current positions"
        );
        self.run_steps(graph, self.iterations);
        let bounds = graph.recompute_bounds();
        trace!(bounds:? = bounds; "Layout bounds");
    }

    /// Run whichever of [`layout`](Self::layout) or
    /// [`refresh`](Self::refresh) the configured [`LayoutMode`] selects.
    pub fn run<P>(&mut self, graph: &mut Graph<P>) {
        match self.mode {
            LayoutMode::Full => self.layout(graph),
            LayoutMode::Incremental => self.refresh(graph),
        }
    }

    /// Run `steps` iterations without resetting positions and without
    /// touching the bounds. Lets callers split a long simulation into chunks.
    pub fn run_steps<P>(&mut self, graph: &mut Graph<P>, steps: usize) {
        for _ in 0..steps {
            self.step(graph);
        }
    }

    /// Map the laid out graph into a `viewport`-sized box.
    pub fn project<'a, P>(&self, graph: &'a Graph<P>, viewport: Size) -> Projection<'a, P> {
        projection::project(graph, viewport)
    }

    fn reset_forces(&mut self, node_count: usize) {
        self.forces.clear();
        self.forces.resize(node_count, Point::default());
    }

    /// Vector from `from` to `to` and its length, replacing a near-zero
    /// vector by a jitter offset.
    fn separation(&mut self, from: Point, to: Point) -> (Point, f32) {
        let mut delta = to.sub_point(from);
        if delta.length_squared() < MIN_SEPARATION_SQUARED {
            delta = self.jitter.next_offset();
        }
        (delta, delta.hypot())
    }

    fn repulse<P>(&mut self, graph: &Graph<P>, i: usize, j: usize) {
        let (delta, distance) = self.separation(graph.position(i), graph.position(j));
        if distance >= self.max_repulsive_distance {
            return;
        }

        let magnitude = self.ideal_edge_length * self.ideal_edge_length / distance;
        let push = delta.scale(magnitude / distance);
        self.forces[j] = self.forces[j].add_point(push);
        self.forces[i] = self.forces[i].sub_point(push);
    }

    fn attract<P>(&mut self, graph: &Graph<P>, source: usize, target: usize, weight: u32) {
        let (delta, distance) = self.separation(graph.position(source), graph.position(target));
        let distance = distance.min(self.max_repulsive_distance);

        let k = self.ideal_edge_length;
        let weight_factor = (weight as f32).ln() * 0.5 + 1.0;
        let magnitude = (distance * distance - k * k) / k * weight_factor;
        let pull = delta.scale(magnitude / distance);
        self.forces[target] = self.forces[target].sub_point(pull);
        self.forces[source] = self.forces[source].add_point(pull);
    }

    fn integrate<P>(&mut self, graph: &mut Graph<P>) {
        for (index, force) in self.forces.iter_mut().enumerate() {
            let displacement = force
                .scale(self.time_step)
                .clamp_axes(self.max_step_displacement);
            let position = graph.position(index).add_point(displacement);
            graph.set_position(index, position);
            *force = Point::default();
        }
    }
}
