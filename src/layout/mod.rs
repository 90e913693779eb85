//! # Force-Directed Layout Engine
//!
//! Pure transformation: `(Graph, LayoutConfig) → positioned Node[]`.
//! No side effects, no I/O, no randomness.
//!
//! The engine owns `position`/`velocity` for the duration of the simulation
//! only — working state lives in arrays indexed in parallel with the input
//! node list, never aliasing the caller's nodes. The returned list is fresh;
//! velocities are discarded.
//!
//! Determinism: initialization is index-based circular placement, and force
//! application walks nodes and grid cells in a fixed order, so identical
//! input and config reproduce output positions bit for bit.

mod engine;
mod grid;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Graph, Node};
use crate::{Error, Result};

use engine::Simulation;

// ============================================================================
// Configuration
// ============================================================================

/// Simulation parameters. Field names follow the wire form the consuming
/// layer sends (`repulsionRadius`, `attractionCoefficient`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Canvas width in layout units.
    pub width: f64,
    /// Canvas height in layout units.
    pub height: f64,
    /// Canvas depth; present switches the simulation to 3D.
    pub depth: Option<f64>,
    /// Fixed number of simulation steps.
    pub iterations: usize,
    /// Pairs farther apart than this exert no repulsion.
    pub repulsion_radius: f64,
    /// Repulsion force is `repulsion / distance`.
    #[serde(rename = "repulsionCoefficient")]
    pub repulsion: f64,
    /// Attraction force is `distance * attraction * edge.strength`.
    #[serde(rename = "attractionCoefficient")]
    pub attraction: f64,
    /// Per-step velocity decay; < 1 makes the simulation settle.
    pub damping: f64,
    /// Position advances by `velocity * step_scale` each step.
    pub step_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            depth: None,
            iterations: 50,
            repulsion_radius: 200.0,
            repulsion: 50.0,
            attraction: 0.01,
            damping: 0.8,
            step_scale: 0.1,
        }
    }
}

impl LayoutConfig {
    pub fn is_3d(&self) -> bool {
        self.depth.is_some()
    }

    /// Reject degenerate parameters before any simulation work begins.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be at least 1".into()));
        }
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("repulsionRadius", self.repulsion_radius),
            ("repulsionCoefficient", self.repulsion),
            ("attractionCoefficient", self.attraction),
            ("damping", self.damping),
            ("stepScale", self.step_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if let Some(depth) = self.depth {
            if !depth.is_finite() || depth <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "depth must be positive and finite, got {depth}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Run the force simulation and return the nodes with `position` populated.
///
/// Fails fast on a degenerate config ([`Error::InvalidConfig`]) or an edge
/// referencing an absent node id ([`Error::InvalidGraphInput`]) — by this
/// stage the graph is expected to be internally consistent, so a dangling
/// edge is a builder/caller contract breach, not messy input data.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Result<Vec<Node>> {
    config.validate()?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        iterations = config.iterations,
        three_d = config.is_3d(),
        "starting layout"
    );

    let mut sim = Simulation::new(graph, config)?;
    for _ in 0..config.iterations {
        sim.step();
    }
    debug!(kinetic_energy = sim.kinetic_energy(), "layout settled");
    Ok(sim.into_positioned_nodes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = LayoutConfig { iterations: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_nonpositive_dimensions_rejected() {
        let config = LayoutConfig { width: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = LayoutConfig { height: -10.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = LayoutConfig { depth: Some(0.0), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_coefficients_rejected() {
        for config in [
            LayoutConfig { repulsion: 0.0, ..Default::default() },
            LayoutConfig { attraction: -0.01, ..Default::default() },
            LayoutConfig { damping: 0.0, ..Default::default() },
            LayoutConfig { step_scale: f64::NAN, ..Default::default() },
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_config_accepts_wire_field_names() {
        let json = r#"{
            "width": 1000,
            "height": 700,
            "repulsionRadius": 150,
            "repulsionCoefficient": 40,
            "attractionCoefficient": 0.02,
            "stepScale": 0.05
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.repulsion_radius, 150.0);
        assert_eq!(config.repulsion, 40.0);
        assert_eq!(config.attraction, 0.02);
        assert_eq!(config.step_scale, 0.05);
        assert_eq!(config.iterations, 50);
    }
}
