//! # papergraph — Entity Graphs for Bibliographic Corpora
//!
//! Turns heterogeneous research-paper records into a deduplicated,
//! typed entity-relationship graph, and computes a stable 2D/3D layout for
//! it with a deterministic force simulation — independent of any rendering
//! framework.
//!
//! ## Design Principles
//!
//! 1. **Pure transformations**: builder and layout are side-effect-free
//!    functions over value types — no I/O, no shared state, no randomness
//! 2. **Clean DTOs**: `Node`, `Edge`, `Graph` cross all boundaries
//! 3. **Closed enums**: node and edge types are sum types; every
//!    type-dependent behavior is an exhaustive match
//! 4. **Lenient in, strict out**: malformed record fields degrade to a
//!    sparser graph; a structurally broken graph handed to the layout
//!    engine is a contract breach and fails fast
//!
//! ## Quick Start
//!
//! ```rust
//! use papergraph::{PaperRecord, LayoutConfig, ViewFilter, builder, layout};
//!
//! # fn example() -> papergraph::Result<()> {
//! let records = vec![
//!     PaperRecord::titled("Electrode performance in sediment cells")
//!         .with_authors(["Jane Doe"])
//!         .with_anode_materials(["graphene"]),
//! ];
//!
//! // Records → typed graph
//! let graph = builder::build(&records);
//!
//! // Optional: focus on one entity type
//! let view = ViewFilter::Materials.apply(&graph);
//!
//! // Graph → positioned nodes, ready for a renderer
//! let positioned = layout::layout(&view, &LayoutConfig::default())?;
//! assert!(positioned.iter().all(|n| n.position.is_some()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | `builder::build` | `&[PaperRecord]` | `Graph` |
//! | `ViewFilter::apply` | `&Graph` | `Graph` (papers + one type) |
//! | `layout::layout` | `&Graph`, `&LayoutConfig` | positioned `Vec<Node>` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod record;
pub mod builder;
pub mod filter;
pub mod layout;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Edge, EdgeType, Graph, Node, NodeId, NodeType, Position};

// ============================================================================
// Re-exports: Records
// ============================================================================

pub use record::{FieldValue, PaperRecord};

// ============================================================================
// Re-exports: Builder, filter, layout
// ============================================================================

pub use builder::{BuilderConfig, build, build_with_config};
pub use filter::ViewFilter;
pub use layout::{LayoutConfig, layout as layout_graph};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Edge constructed with a strength outside (0, 1].
    #[error("Edge strength must be in (0, 1], got {0}")]
    InvalidStrength(f64),

    /// Layout input edge references a node id absent from the node list.
    /// Indicates a builder/caller contract breach, not messy source data.
    #[error("Edge references unknown node id: {id}")]
    InvalidGraphInput { id: String },

    /// Degenerate layout parameters, rejected before any simulation work.
    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
