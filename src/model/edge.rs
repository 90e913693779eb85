//! Edge (typed relationship) in the entity graph.

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::{Error, Result};

/// The closed set of relationship types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Author → paper. The only edge type with meaningful direction.
    Authored,
    /// Paper → material.
    UsesMaterial,
    /// Paper → organism.
    StudiesOrganism,
    /// Paper → concept/method, and material ↔ material co-occurrence.
    RelatedTo,
    /// Paper → paper citation.
    Cites,
}

impl EdgeType {
    /// Default attraction strength for edges synthesized from a single
    /// record field. Co-occurrence edges carry a count-derived strength
    /// instead (see the builder's post-pass).
    pub fn base_strength(self) -> f64 {
        match self {
            EdgeType::Authored => 1.0,
            EdgeType::UsesMaterial => 0.8,
            EdgeType::StudiesOrganism => 0.8,
            EdgeType::RelatedTo => 0.5,
            EdgeType::Cites => 0.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Authored => "authored",
            EdgeType::UsesMaterial => "uses_material",
            EdgeType::StudiesOrganism => "studies_organism",
            EdgeType::RelatedTo => "related_to",
            EdgeType::Cites => "cites",
        }
    }
}

/// A typed, weighted relationship between two nodes.
///
/// Direction matters only for directed semantics like authorship; the layout
/// engine treats every edge as undirected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Attraction weight in (0, 1].
    pub strength: f64,
}

impl Edge {
    /// Construct an edge, clamping `strength` into (0, 1].
    ///
    /// Values above 1 clamp to 1. Values ≤ 0 (or non-finite) are rejected:
    /// a zero-strength edge would be invisible to the layout and indicates a
    /// caller bug, not messy data.
    pub fn new(
        source: NodeId,
        target: NodeId,
        edge_type: EdgeType,
        strength: f64,
    ) -> Result<Self> {
        if !strength.is_finite() || strength <= 0.0 {
            return Err(Error::InvalidStrength(strength));
        }
        Ok(Self {
            source,
            target,
            edge_type,
            strength: strength.min(1.0),
        })
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: &NodeId) -> Option<&NodeId> {
        if *from == self.source {
            Some(&self.target)
        } else if *from == self.target {
            Some(&self.source)
        } else {
            None
        }
    }
}
