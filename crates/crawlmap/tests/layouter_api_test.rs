//! Integration tests for the GraphLayouter API
//!
//! These tests drive the public pipeline end to end: response parsing,
//! layout and projection.

use float_cmp::approx_eq;
use proptest::prelude::*;

use crawlmap::{
    CrawlmapError, GraphError, GraphLayouter,
    config::{AppConfig, GraphMode, LayoutMode},
    graph::{Graph, GraphBuilder},
    layout::{LayoutEngine, project},
};
use crawlmap_core::geometry::{Point, Size};

const RESPONSE: &str = r#"{
    "nodes": [
        {"pk": 1, "fields": {"title": "Home", "crawl_time": "1", "url": "https://example.com/", "owner": 5}},
        {"pk": 2, "fields": {"title": "Blog", "crawl_time": "2", "url": "https://example.com/blog", "owner": 5}},
        {"pk": 3, "fields": {"title": "Post", "crawl_time": "3", "url": "https://example.com/blog/1", "owner": 5}},
        {"pk": 4, "fields": {"title": "Docs", "crawl_time": "4", "url": "https://docs.example.org/", "owner": 5}}
    ],
    "edges": [
        {"fields": {"source": 1, "target": 2}},
        {"fields": {"source": 2, "target": 3}},
        {"fields": {"source": 3, "target": 1}},
        {"fields": {"source": 1, "target": 4}}
    ]
}"#;

fn seeded_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.layout_mut().set_seed(Some(seed));
    config
}

#[test]
fn test_layouter_default_exists() {
    let layouter = GraphLayouter::default();
    assert_eq!(layouter.config().layout().iterations(), 500);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.layout_mut().set_max_repulsive_distance(-1.0);
    let result = GraphLayouter::new(config);
    assert!(matches!(result, Err(CrawlmapError::Config(_))));
}

#[test]
fn test_full_pipeline_fits_viewport() {
    let layouter = GraphLayouter::new(seeded_config(1)).expect("valid config");
    let mut graph = layouter.parse(RESPONSE).expect("Failed to parse");
    layouter.layout(&mut graph);

    let projection = layouter.project(&graph);
    assert_eq!(projection.nodes().len(), 4);
    assert_eq!(projection.edges().len(), 4);

    for node in projection.nodes() {
        let p = node.position();
        assert!(p.x() >= 0.0 && p.x() <= 800.0 + 1e-3, "{p:?}");
        assert!(p.y() >= 0.0 && p.y() <= 600.0 + 1e-3, "{p:?}");
    }
    assert_eq!(projection.nodes()[3].payload().title.as_deref(), Some("Docs"));
}

#[test]
fn test_render_json_is_deterministic_with_seed() {
    let layouter = GraphLayouter::new(seeded_config(9)).expect("valid config");
    let first = layouter.render_json(RESPONSE).expect("Failed to render");
    let second = layouter.render_json(RESPONSE).expect("Failed to render");
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["edges"][0]["id"], "e1-2");
    assert_eq!(value["nodes"][0]["payload"]["url"], "https://example.com/");
}

#[test]
fn test_domain_mode_pipeline() {
    let mut config = seeded_config(2);
    config.graph_mut().set_mode(GraphMode::Domain);
    let layouter = GraphLayouter::new(config).expect("valid config");

    let mut graph = layouter.parse(RESPONSE).expect("Failed to parse");
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);

    layouter.layout(&mut graph);
    let projection = layouter.project(&graph);
    assert_eq!(projection.edges()[0].id(), "eexample.com-docs.example.org");
}

#[test]
fn test_dangling_link_surfaces_graph_error() {
    let body = r#"{"nodes": [], "edges": [{"fields": {"source": 1, "target": 2}}]}"#;
    let err = GraphLayouter::default().parse(body).unwrap_err();
    assert!(matches!(
        err,
        CrawlmapError::Graph(GraphError::UnknownNode { .. })
    ));
}

#[test]
fn test_empty_graph_renders_empty_records() {
    let json = GraphLayouter::default()
        .render_json(r#"{"nodes": [], "edges": []}"#)
        .expect("Failed to render");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["nodes"].as_array().unwrap().is_empty());
    assert!(value["edges"].as_array().unwrap().is_empty());
}

#[test]
fn test_incremental_mode_keeps_previous_layout() {
    let mut config = seeded_config(4);
    config.layout_mut().set_iterations(50);
    let full = GraphLayouter::new(config.clone()).expect("valid config");
    let mut graph = full.parse(RESPONSE).expect("Failed to parse");
    full.layout(&mut graph);
    let before = graph.bounds();

    config.layout_mut().set_mode(LayoutMode::Incremental);
    let incremental = GraphLayouter::new(config).expect("valid config");
    incremental.layout(&mut graph);

    // Continuing from a spread-out layout never collapses back to the origin.
    let after = graph.bounds();
    assert!(after.width() > 0.0 && after.height() > 0.0);
    assert_ne!(before, after);
}

// ===================
// Property tests
// ===================

fn random_graph(node_count: usize, edges: &[(usize, usize, u32)]) -> Graph<()> {
    let mut builder = GraphBuilder::new();
    for i in 0..node_count {
        builder.add_node(i.to_string(), ()).unwrap();
    }
    for (source, target, weight) in edges {
        builder
            .add_edge(
                &(source % node_count).to_string(),
                &(target % node_count).to_string(),
                *weight,
            )
            .unwrap();
    }
    builder.build()
}

fn graph_strategy() -> impl Strategy<Value = Graph<()>> {
    (1usize..12).prop_flat_map(|node_count| {
        prop::collection::vec((0usize..64, 0usize..64, 0u32..6), 0..20)
            .prop_map(move |edges| random_graph(node_count, &edges))
    })
}

fn engine(seed: u64) -> LayoutEngine {
    let mut config = AppConfig::default();
    config.layout_mut().set_seed(Some(seed)).set_iterations(60);
    LayoutEngine::new(config.layout())
}

/// Every node lies inside the bounds recorded by the layout.
fn check_bounds_contain_nodes(mut graph: Graph<()>, seed: u64) -> Result<(), TestCaseError> {
    engine(seed).layout(&mut graph);
    let bounds = graph.bounds();
    for node in graph.nodes() {
        prop_assert!(node.position().is_finite());
        prop_assert!(bounds.contains(node.position()));
    }
    Ok(())
}

/// Prepare puts every node back on the origin, whatever ran before.
fn check_prepare_resets(mut graph: Graph<()>, seed: u64) -> Result<(), TestCaseError> {
    let mut engine = engine(seed);
    engine.layout(&mut graph);
    engine.prepare(&mut graph);
    prop_assert!(graph.nodes().all(|node| node.position().is_zero()));
    prop_assert!(engine.forces().iter().all(|force| force.is_zero()));
    Ok(())
}

/// Projection is linear in the viewport size.
fn check_projection_scales(mut graph: Graph<()>, seed: u64, factor: f32) -> Result<(), TestCaseError> {
    engine(seed).layout(&mut graph);
    let base = project(&graph, Size::new(800.0, 600.0));
    let scaled = project(&graph, Size::new(800.0 * factor, 600.0 * factor));

    for (a, b) in base.nodes().iter().zip(scaled.nodes()) {
        let expected = Point::new(a.position().x() * factor, a.position().y() * factor);
        prop_assert!(approx_eq!(f32, b.position().x(), expected.x(), epsilon = 0.05));
        prop_assert!(approx_eq!(f32, b.position().y(), expected.y(), epsilon = 0.05));
    }
    Ok(())
}

/// Two runs with the same seed give identical positions.
fn check_same_seed_same_layout(graph: Graph<()>, seed: u64) -> Result<(), TestCaseError> {
    let mut first = graph.clone();
    let mut second = graph;
    engine(seed).layout(&mut first);
    engine(seed).layout(&mut second);

    let a: Vec<Point> = first.nodes().map(|n| n.position()).collect();
    let b: Vec<Point> = second.nodes().map(|n| n.position()).collect();
    prop_assert_eq!(a, b);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bounds_contain_nodes(graph in graph_strategy(), seed in any::<u64>()) {
        check_bounds_contain_nodes(graph, seed)?;
    }

    #[test]
    fn prepare_resets(graph in graph_strategy(), seed in any::<u64>()) {
        check_prepare_resets(graph, seed)?;
    }

    #[test]
    fn projection_scales(graph in graph_strategy(), seed in any::<u64>(), factor in 0.5f32..4.0) {
        check_projection_scales(graph, seed, factor)?;
    }

    #[test]
    fn same_seed_same_layout(graph in graph_strategy(), seed in any::<u64>()) {
        check_same_seed_same_layout(graph, seed)?;
    }
}
