//! Property tests for the builder invariants and layout guarantees.

use proptest::prelude::*;

use papergraph::layout::{LayoutConfig, layout};
use papergraph::{FieldValue, PaperRecord, builder};

const NAMES: &[&str] = &[
    "Graphene",
    "carbon cloth",
    "Platinum Mesh",
    "Jane Doe",
    "John Smith",
    "Geobacter",
    "Shewanella oneidensis",
    "stainless steel",
];

const TITLES: &[&str] = &[
    "Paper A",
    "Paper B",
    "Electrode Performance",
    "Sediment Cells",
    "Biofilm Kinetics",
];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(str::to_string)
}

fn field() -> impl Strategy<Value = FieldValue> {
    prop::collection::vec(name(), 0..3).prop_map(FieldValue::List)
}

fn record() -> impl Strategy<Value = PaperRecord> {
    (
        prop::option::of(prop::sample::select(TITLES.to_vec()).prop_map(str::to_string)),
        field(),
        field(),
        field(),
        field(),
    )
        .prop_map(|(title, authors, anode, organisms, keywords)| PaperRecord {
            title,
            authors,
            anode_materials: anode,
            organism_types: organisms,
            keywords,
            ..Default::default()
        })
}

fn records() -> impl Strategy<Value = Vec<PaperRecord>> {
    prop::collection::vec(record(), 0..12)
}

/// Uppercase everything and stretch whitespace — must not change the graph.
fn perturb(s: &str) -> String {
    s.to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("   ")
}

fn perturb_field(field: &FieldValue) -> FieldValue {
    match field {
        FieldValue::List(items) => {
            FieldValue::List(items.iter().map(|s| perturb(s)).collect())
        }
        FieldValue::Scalar(s) => FieldValue::Scalar(perturb(s)),
        FieldValue::Absent => FieldValue::Absent,
    }
}

fn id_weight_signature(graph: &papergraph::Graph) -> Vec<(String, u64)> {
    let mut sig: Vec<_> = graph
        .nodes
        .iter()
        .map(|n| (n.id.to_string(), n.weight.to_bits()))
        .collect();
    sig.sort();
    sig
}

proptest! {
    // ========================================================================
    // Builder invariants
    // ========================================================================

    #[test]
    fn built_graphs_have_unique_ids_and_no_dangling_edges(records in records()) {
        let graph = builder::build(&records);

        let mut ids: Vec<_> = graph.nodes.iter().map(|n| &n.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), graph.node_count(), "duplicate node ids");

        prop_assert!(graph.is_consistent(), "dangling edge in builder output");
    }

    #[test]
    fn weights_never_decrease_as_records_accumulate(
        records in records(),
        split in 0usize..12,
    ) {
        let split = split.min(records.len());
        let prefix = builder::build(&records[..split]);
        let full = builder::build(&records);

        for node in &prefix.nodes {
            let after = full.node(&node.id).expect("node vanished");
            prop_assert!(after.weight >= node.weight);
        }
    }

    #[test]
    fn casing_and_whitespace_do_not_change_the_graph(records in records()) {
        let perturbed: Vec<_> = records
            .iter()
            .map(|r| PaperRecord {
                title: r.title.as_deref().map(perturb),
                authors: perturb_field(&r.authors),
                anode_materials: perturb_field(&r.anode_materials),
                organism_types: perturb_field(&r.organism_types),
                keywords: perturb_field(&r.keywords),
                ..r.clone()
            })
            .collect();

        let a = builder::build(&records);
        let b = builder::build(&perturbed);
        prop_assert_eq!(id_weight_signature(&a), id_weight_signature(&b));
    }

    // ========================================================================
    // Layout guarantees
    // ========================================================================

    #[test]
    fn layout_is_bounded_and_deterministic(
        records in records(),
        width in 200.0f64..1200.0,
        height in 200.0f64..900.0,
        iterations in 1usize..60,
    ) {
        let graph = builder::build(&records);
        let config = LayoutConfig { width, height, iterations, ..Default::default() };

        let a = layout(&graph, &config).unwrap();
        let b = layout(&graph, &config).unwrap();

        for (na, nb) in a.iter().zip(&b) {
            let pa = na.position.unwrap();
            let pb = nb.position.unwrap();
            prop_assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            prop_assert_eq!(pa.y.to_bits(), pb.y.to_bits());

            prop_assert!(pa.x >= 0.0 && pa.x <= width);
            prop_assert!(pa.y >= 0.0 && pa.y <= height);
        }
    }
}
