//! End-to-end tests for the force-directed layout engine.

use papergraph::layout::{LayoutConfig, layout};
use papergraph::{Edge, EdgeType, Error, Node, NodeId, NodeType, PaperRecord, builder};

fn sample_graph() -> papergraph::Graph {
    builder::build(&[
        PaperRecord::titled("Paper A")
            .with_authors(["Jane Doe"])
            .with_anode_materials(["graphene", "carbon cloth"])
            .with_keywords(["electrode", "biofilm"]),
        PaperRecord::titled("Paper B")
            .with_authors(["Jane Doe", "John Smith"])
            .with_anode_materials(["graphene"])
            .with_organism_types(["Geobacter"]),
        PaperRecord::titled("Paper C")
            .with_anode_materials(["graphene", "carbon cloth"])
            .with_system_type("MFC"),
    ])
}

// ============================================================================
// 1. Every node comes back positioned, inside the canvas
// ============================================================================

#[test]
fn test_layout_positions_all_nodes_within_bounds() {
    let graph = sample_graph();
    let config = LayoutConfig::default();

    let positioned = layout(&graph, &config).unwrap();

    assert_eq!(positioned.len(), graph.node_count());
    for node in &positioned {
        let p = node.position.expect("layout must set every position");
        assert!(p.x >= 0.0 && p.x <= config.width, "x out of bounds: {}", p.x);
        assert!(p.y >= 0.0 && p.y <= config.height, "y out of bounds: {}", p.y);
        assert_eq!(p.z, None, "2D layout must not emit z");
    }
}

#[test]
fn test_bounds_hold_under_violent_forces() {
    let graph = sample_graph();
    let config = LayoutConfig {
        repulsion: 1e6,
        iterations: 200,
        ..Default::default()
    };

    let positioned = layout(&graph, &config).unwrap();

    for node in &positioned {
        let p = node.position.unwrap();
        assert!(p.x >= 0.0 && p.x <= config.width);
        assert!(p.y >= 0.0 && p.y <= config.height);
    }
}

// ============================================================================
// 2. Determinism: identical input → bit-identical output
// ============================================================================

#[test]
fn test_layout_is_deterministic() {
    let graph = sample_graph();
    let config = LayoutConfig::default();

    let a = layout(&graph, &config).unwrap();
    let b = layout(&graph, &config).unwrap();

    for (na, nb) in a.iter().zip(&b) {
        let pa = na.position.unwrap();
        let pb = nb.position.unwrap();
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
    }
}

// ============================================================================
// 3. Attraction-dominant config pulls connected nodes together
// ============================================================================

#[test]
fn test_connected_pair_converges() {
    let paper = Node::new(NodeType::Paper, "Paper A");
    let material = Node::new(NodeType::Material, "graphene");
    let edge = Edge::new(
        paper.id.clone(),
        material.id.clone(),
        EdgeType::UsesMaterial,
        1.0,
    )
    .unwrap();
    let graph = papergraph::Graph::new(vec![paper, material], vec![edge]);

    let config = LayoutConfig {
        attraction: 0.5,
        repulsion: 0.5,
        iterations: 100,
        ..Default::default()
    };

    let positioned = layout(&graph, &config).unwrap();
    let a = positioned[0].position.unwrap();
    let b = positioned[1].position.unwrap();
    let final_distance = a.distance(&b);

    // Initial circular placement separates the pair by hundreds of units;
    // with attraction dominating they must end up close together.
    assert!(
        final_distance < 100.0,
        "pair did not converge: distance {final_distance}"
    );
    assert!(final_distance > 0.0);
}

// ============================================================================
// 4. 3D layouts populate z, within the depth bounds
// ============================================================================

#[test]
fn test_3d_layout_populates_z() {
    let graph = sample_graph();
    let config = LayoutConfig {
        depth: Some(400.0),
        ..Default::default()
    };

    let positioned = layout(&graph, &config).unwrap();

    for node in &positioned {
        let p = node.position.unwrap();
        let z = p.z.expect("3D layout must emit z");
        assert!(z >= 0.0 && z <= 400.0);
    }
}

// ============================================================================
// 5. Failure semantics
// ============================================================================

#[test]
fn test_dangling_edge_is_rejected() {
    let paper = Node::new(NodeType::Paper, "Paper A");
    let ghost = NodeId::derive(NodeType::Author, "nobody");
    let edge = Edge::new(paper.id.clone(), ghost, EdgeType::Authored, 1.0).unwrap();
    let graph = papergraph::Graph::new(vec![paper], vec![edge]);

    let result = layout(&graph, &LayoutConfig::default());
    assert!(matches!(result, Err(Error::InvalidGraphInput { .. })));
}

#[test]
fn test_invalid_config_rejected_before_graph_checks() {
    // Config validation runs first, even when the graph is also broken.
    let paper = Node::new(NodeType::Paper, "Paper A");
    let ghost = NodeId::derive(NodeType::Author, "nobody");
    let edge = Edge::new(paper.id.clone(), ghost, EdgeType::Authored, 1.0).unwrap();
    let graph = papergraph::Graph::new(vec![paper], vec![edge]);

    let config = LayoutConfig {
        iterations: 0,
        ..Default::default()
    };
    let result = layout(&graph, &config);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

// ============================================================================
// 6. The input graph is treated as immutable
// ============================================================================

#[test]
fn test_layout_does_not_mutate_input() {
    let graph = sample_graph();
    let before = graph.clone();

    let _ = layout(&graph, &LayoutConfig::default()).unwrap();

    assert_eq!(graph, before);
    assert!(graph.nodes.iter().all(|n| n.position.is_none()));
}

// ============================================================================
// 7. Degenerate inputs
// ============================================================================

#[test]
fn test_empty_graph_yields_empty_layout() {
    let graph = papergraph::Graph::default();
    let positioned = layout(&graph, &LayoutConfig::default()).unwrap();
    assert!(positioned.is_empty());
}

#[test]
fn test_single_node_is_positioned() {
    let graph = papergraph::Graph::new(vec![Node::new(NodeType::Paper, "Lonely")], vec![]);
    let positioned = layout(&graph, &LayoutConfig::default()).unwrap();
    assert!(positioned[0].position.is_some());
}
