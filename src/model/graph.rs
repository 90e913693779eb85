//! The graph value exchanged between builder, filter, and layout.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Edge, Node, NodeId};

/// A batch-built entity graph: typed nodes plus weighted edges.
///
/// Constructed fresh on every builder invocation; there is no incremental
/// graph state across calls. Builder output upholds two invariants: node ids
/// are unique, and every edge endpoint exists in `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Linear lookup by id. Fine for the graph sizes this crate targets;
    /// the builder and layout keep their own index maps internally.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// True when every edge's endpoints are present in the node set.
    pub fn is_consistent(&self) -> bool {
        let ids: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        self.edges
            .iter()
            .all(|e| ids.contains(&e.source) && ids.contains(&e.target))
    }
}
