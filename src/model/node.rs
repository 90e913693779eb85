//! Node in the entity graph.

use serde::{Deserialize, Serialize};

use super::Position;

/// Stable node identifier, derived from `(type, normalized name)`.
///
/// Two differently-cased or differently-spaced mentions of the same entity
/// map to the same id (see [`NodeId::derive`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Derive the id for an entity of the given type.
    ///
    /// Normalization: trim, lowercase, collapse internal whitespace runs to
    /// single underscores. `("graphene", Material)` and `("  GRAPHENE ",
    /// Material)` yield the same id.
    pub fn derive(node_type: NodeType, name: &str) -> Self {
        Self(format!("{}_{}", node_type.id_prefix(), normalize_name(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercase and collapse whitespace runs to single underscores.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// The closed set of entity types.
///
/// Every type-dependent behavior (seed weight, id prefix) is an exhaustive
/// match on this enum, so adding a type is a compile-time-checked decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Paper,
    Author,
    Material,
    Organism,
    Concept,
    Method,
}

impl NodeType {
    /// Initial relevance score for a freshly created node of this type.
    /// Each re-encounter of the same entity adds the seed again.
    pub fn seed_weight(self) -> f64 {
        match self {
            NodeType::Paper => 5.0,
            NodeType::Author => 2.0,
            NodeType::Material => 3.0,
            NodeType::Organism => 3.0,
            NodeType::Concept => 1.0,
            NodeType::Method => 2.0,
        }
    }

    /// Prefix used in derived node ids (`material_graphene`, `author_jane_doe`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeType::Paper => "paper",
            NodeType::Author => "author",
            NodeType::Material => "material",
            NodeType::Organism => "organism",
            NodeType::Concept => "concept",
            NodeType::Method => "method",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.id_prefix()
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paper" => Ok(NodeType::Paper),
            "author" => Ok(NodeType::Author),
            "material" => Ok(NodeType::Material),
            "organism" => Ok(NodeType::Organism),
            "concept" => Ok(NodeType::Concept),
            "method" => Ok(NodeType::Method),
            other => Err(format!("unknown node type: {other}")),
        }
    }
}

/// A typed node in the entity graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Human-readable label — the first-seen display form of the name.
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Accumulated relevance score. Starts at the type seed, grows with each
    /// re-encounter, never decreases within a build pass.
    pub weight: f64,
    /// Set by the layout engine; absent on builder output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// A fresh node carrying its type's seed weight.
    pub fn new(node_type: NodeType, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: NodeId::derive(node_type, &name),
            name,
            node_type,
            weight: node_type.seed_weight(),
            position: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add one seed's worth of relevance for a re-encounter.
    pub fn bump_weight(&mut self) {
        self.weight += self.node_type.seed_weight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize_name("Jane   Doe"), "jane_doe");
        assert_eq!(normalize_name("  GRAPHENE "), "graphene");
        assert_eq!(normalize_name("carbon\tnano tube"), "carbon_nano_tube");
    }

    #[test]
    fn test_id_derivation_is_case_insensitive() {
        let a = NodeId::derive(NodeType::Author, "Jane Doe");
        let b = NodeId::derive(NodeType::Author, "jane   DOE");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "author_jane_doe");
    }

    #[test]
    fn test_seed_weights_cover_all_types() {
        assert_eq!(NodeType::Paper.seed_weight(), 5.0);
        assert_eq!(NodeType::Author.seed_weight(), 2.0);
        assert_eq!(NodeType::Material.seed_weight(), 3.0);
        assert_eq!(NodeType::Organism.seed_weight(), 3.0);
        assert_eq!(NodeType::Concept.seed_weight(), 1.0);
        assert_eq!(NodeType::Method.seed_weight(), 2.0);
    }
}
