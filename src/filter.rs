//! View filtering — restrict a graph to papers plus one entity type.
//!
//! Caller-invoked post-processing between builder and layout. Papers always
//! survive; edges survive only when both endpoints do. Dropped edges are a
//! recovered condition here (the graph gets sparser), unlike the layout
//! engine, which treats a dangling edge as a contract breach.

use hashbrown::HashSet;
use tracing::debug;

use crate::model::{Graph, NodeId, NodeType};

/// Which entity type to keep alongside the papers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFilter {
    /// No-op: the full graph.
    All,
    Materials,
    Organisms,
    Authors,
}

impl ViewFilter {
    /// The node type this filter retains, `None` for [`ViewFilter::All`].
    fn target_type(self) -> Option<NodeType> {
        match self {
            ViewFilter::All => None,
            ViewFilter::Materials => Some(NodeType::Material),
            ViewFilter::Organisms => Some(NodeType::Organism),
            ViewFilter::Authors => Some(NodeType::Author),
        }
    }

    /// Produce the filtered graph. The input is untouched.
    pub fn apply(self, graph: &Graph) -> Graph {
        let Some(target) = self.target_type() else {
            return graph.clone();
        };

        let nodes: Vec<_> = graph
            .nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Paper || n.node_type == target)
            .cloned()
            .collect();

        let surviving: HashSet<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();
        let edges: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| surviving.contains(&e.source) && surviving.contains(&e.target))
            .cloned()
            .collect();

        let dropped = graph.edges.len() - edges.len();
        if dropped > 0 {
            debug!(dropped, filter = ?self, "dropped dangling edges during view filtering");
        }

        Graph::new(nodes, edges)
    }
}

impl std::str::FromStr for ViewFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ViewFilter::All),
            "material" | "materials" => Ok(ViewFilter::Materials),
            "organism" | "organisms" => Ok(ViewFilter::Organisms),
            "author" | "authors" => Ok(ViewFilter::Authors),
            other => Err(format!("unknown view filter: {other}")),
        }
    }
}
