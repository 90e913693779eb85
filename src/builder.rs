//! # Graph Builder
//!
//! Pure transformation: `&[PaperRecord] → Graph`. No side effects, no I/O.
//!
//! Entity extraction walks each record once, interning nodes by derived id so
//! a re-encountered entity bumps the existing node's weight instead of
//! duplicating it. A post-pass synthesizes `RelatedTo` edges between material
//! pairs that co-occur in more than a threshold number of papers, densifying
//! the graph with second-order relationships no single record states.
//!
//! The builder never fails: malformed fields degrade to scalars, empty fields
//! contribute nothing, and a record with no extractable fields still yields
//! its paper node.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::model::{Edge, EdgeType, Graph, Node, NodeId, NodeType, normalize_name};
use crate::record::PaperRecord;

/// Display name for records that arrive without a title. Untitled records
/// collapse into a single paper node by the (type, normalized-name) id rule.
const UNTITLED: &str = "Untitled";

// ============================================================================
// Configuration
// ============================================================================

/// Knobs for the build pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    /// Field values equal to this sentinel (compared on the normalized form)
    /// are skipped entirely.
    pub unspecified_sentinel: String,
    /// Only the leading keywords of each record become concept nodes.
    pub keyword_limit: usize,
    /// Material pairs must share strictly more than this many papers before
    /// a co-occurrence edge is synthesized.
    pub co_occurrence_threshold: usize,
    /// Strength contributed per shared paper, capped at 1.0.
    pub co_occurrence_strength_step: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            unspecified_sentinel: "not specified".to_string(),
            keyword_limit: 3,
            co_occurrence_threshold: 1,
            co_occurrence_strength_step: 0.2,
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Build an entity graph from a batch of records with default configuration.
pub fn build(records: &[PaperRecord]) -> Graph {
    build_with_config(records, &BuilderConfig::default())
}

/// Build an entity graph from a batch of records.
pub fn build_with_config(records: &[PaperRecord], config: &BuilderConfig) -> Graph {
    debug!(records = records.len(), "building entity graph");

    let mut interner = NodeInterner::default();
    let mut edges = EdgeAccumulator::default();
    let sentinel = normalize_name(&config.unspecified_sentinel);

    // Material ids per record, kept aside for the co-occurrence post-pass.
    let mut record_materials: Vec<Vec<NodeId>> = Vec::with_capacity(records.len());

    for record in records {
        let title = record.title.as_deref().unwrap_or(UNTITLED);
        let paper_id = interner.intern(NodeType::Paper, title);

        for author in record.authors.values() {
            if is_unspecified(&author, &sentinel) {
                continue;
            }
            let author_id = interner.intern(NodeType::Author, &author);
            edges.push(author_id, paper_id.clone(), EdgeType::Authored);
        }

        let mut materials = Vec::new();
        let material_values = record
            .anode_materials
            .values()
            .into_iter()
            .chain(record.cathode_materials.values());
        for material in material_values {
            if is_unspecified(&material, &sentinel) {
                continue;
            }
            let material_id = interner.intern(NodeType::Material, &material);
            edges.push(paper_id.clone(), material_id.clone(), EdgeType::UsesMaterial);
            if !materials.contains(&material_id) {
                materials.push(material_id);
            }
        }
        record_materials.push(materials);

        for organism in record.organism_types.values() {
            if is_unspecified(&organism, &sentinel) {
                continue;
            }
            let organism_id = interner.intern(NodeType::Organism, &organism);
            edges.push(paper_id.clone(), organism_id, EdgeType::StudiesOrganism);
        }

        for keyword in record.keywords.values().into_iter().take(config.keyword_limit) {
            if is_unspecified(&keyword, &sentinel) {
                continue;
            }
            let concept_id = interner.intern(NodeType::Concept, &keyword);
            edges.push(paper_id.clone(), concept_id, EdgeType::RelatedTo);
        }

        if let Some(system_type) = record.system_type.as_deref() {
            if !system_type.trim().is_empty() && !is_unspecified(system_type, &sentinel) {
                let method_id = interner.intern(NodeType::Method, system_type);
                edges.push(paper_id.clone(), method_id, EdgeType::RelatedTo);
            }
        }
    }

    link_co_occurring_materials(&record_materials, config, &mut edges);

    let graph = Graph::new(interner.nodes, edges.edges);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "entity graph built"
    );
    graph
}

fn is_unspecified(value: &str, normalized_sentinel: &str) -> bool {
    normalize_name(value) == *normalized_sentinel
}

// ============================================================================
// Node interning
// ============================================================================

/// Dedup map over derived ids. Re-encountering an entity bumps its weight;
/// the first-seen display form of the name is kept.
#[derive(Default)]
struct NodeInterner {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeInterner {
    fn intern(&mut self, node_type: NodeType, name: &str) -> NodeId {
        let id = NodeId::derive(node_type, name);
        match self.index.get(&id) {
            Some(&slot) => self.nodes[slot].bump_weight(),
            None => {
                self.index.insert(id.clone(), self.nodes.len());
                self.nodes.push(Node::new(node_type, name.trim()));
            }
        }
        id
    }
}

// ============================================================================
// Edge accumulation
// ============================================================================

/// Collects edges, dropping exact `(source, target, type)` duplicates.
#[derive(Default)]
struct EdgeAccumulator {
    edges: Vec<Edge>,
    seen: HashSet<(NodeId, NodeId, EdgeType)>,
}

impl EdgeAccumulator {
    fn push(&mut self, source: NodeId, target: NodeId, edge_type: EdgeType) {
        self.push_with_strength(source, target, edge_type, edge_type.base_strength());
    }

    fn push_with_strength(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: EdgeType,
        strength: f64,
    ) {
        let key = (source.clone(), target.clone(), edge_type);
        if self.seen.contains(&key) {
            return;
        }
        match Edge::new(source, target, edge_type, strength) {
            Ok(edge) => {
                self.seen.insert(key);
                self.edges.push(edge);
            }
            Err(err) => debug!(%err, "skipping edge with invalid strength"),
        }
    }
}

// ============================================================================
// Material co-occurrence post-pass
// ============================================================================

/// Synthesize `RelatedTo` edges between material pairs sharing more than
/// `co_occurrence_threshold` papers, with `strength = min(count * step, 1)`.
///
/// Pair keys are ordered and the final pair list is sorted, so edge output
/// order never depends on hash-map iteration.
fn link_co_occurring_materials(
    record_materials: &[Vec<NodeId>],
    config: &BuilderConfig,
    edges: &mut EdgeAccumulator,
) {
    let mut pair_counts: HashMap<(NodeId, NodeId), usize> = HashMap::new();

    for materials in record_materials {
        for (i, a) in materials.iter().enumerate() {
            for b in &materials[i + 1..] {
                let key = if a <= b {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                };
                *pair_counts.entry(key).or_insert(0) += 1;
            }
        }
    }

    let mut pairs: Vec<_> = pair_counts
        .into_iter()
        .filter(|&(_, count)| count > config.co_occurrence_threshold)
        .collect();
    pairs.sort();

    debug!(pairs = pairs.len(), "linking co-occurring materials");

    for ((a, b), count) in pairs {
        let strength = (count as f64 * config.co_occurrence_strength_step).min(1.0);
        edges.push_with_strength(a, b, EdgeType::RelatedTo, strength);
    }
}
