//! The discrete-time force simulation.
//!
//! Working state is an arena of position/velocity/force vectors indexed in
//! parallel with the input node list (never aliasing the caller's nodes).
//! Each step: grid-bucketed pair repulsion, per-edge attraction, velocity
//! integration with damping, then a bounds clamp so no force magnitude can
//! push a node out of the canvas.

use hashbrown::HashMap;

use super::LayoutConfig;
use super::grid::SpatialGrid;
use crate::model::{Graph, Node, Position};
use crate::{Error, Result};

/// Nodes always stay this far inside the canvas edges.
const BOUNDS_MARGIN: f64 = 20.0;

/// Distance floor for the repulsion law. Coincident nodes (possible after a
/// corner clamp) push apart along a fixed axis instead of dividing by zero.
const MIN_SEPARATION: f64 = 1e-4;

/// Initial ring radius as a fraction of the smaller canvas dimension.
const BASE_RADIUS_FRACTION: f64 = 0.25;

/// Ring-radius bonus per unit of node weight.
const IMPORTANCE_SCALE: f64 = 2.0;

struct SpringEdge {
    a: usize,
    b: usize,
    strength: f64,
}

pub(crate) struct Simulation {
    nodes: Vec<Node>,
    edges: Vec<SpringEdge>,
    positions: Vec<[f64; 3]>,
    velocities: Vec<[f64; 3]>,
    forces: Vec<[f64; 3]>,
    config: LayoutConfig,
    kinetic_energy: f64,
}

impl Simulation {
    /// Resolve edge endpoints and place nodes on the initial ring.
    ///
    /// An edge referencing an id absent from the node list is a contract
    /// breach and fails construction — nothing is silently skipped.
    pub fn new(graph: &Graph, config: &LayoutConfig) -> Result<Self> {
        let index: HashMap<_, _> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let a = *index
                .get(&edge.source)
                .ok_or_else(|| Error::InvalidGraphInput { id: edge.source.to_string() })?;
            let b = *index
                .get(&edge.target)
                .ok_or_else(|| Error::InvalidGraphInput { id: edge.target.to_string() })?;
            edges.push(SpringEdge { a, b, strength: edge.strength });
        }

        let positions = initial_positions(&graph.nodes, config);
        let n = graph.nodes.len();

        Ok(Self {
            nodes: graph.nodes.clone(),
            edges,
            positions,
            velocities: vec![[0.0; 3]; n],
            forces: vec![[0.0; 3]; n],
            config: config.clone(),
            kinetic_energy: 0.0,
        })
    }

    /// One simulation step: accumulate forces, integrate, clamp.
    pub fn step(&mut self) {
        for f in &mut self.forces {
            *f = [0.0; 3];
        }
        self.apply_repulsion();
        self.apply_attraction();
        self.integrate();
    }

    /// Sum of squared velocities after the last step. Decays toward zero as
    /// the layout settles; used by the convergence tests.
    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    #[cfg(test)]
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    /// Consume the simulation, returning nodes with final positions set.
    pub fn into_positioned_nodes(self) -> Vec<Node> {
        let three_d = self.config.is_3d();
        self.nodes
            .into_iter()
            .zip(self.positions)
            .map(|(mut node, p)| {
                node.position = Some(Position {
                    x: p[0],
                    y: p[1],
                    z: three_d.then_some(p[2]),
                });
                node
            })
            .collect()
    }

    /// Inverse-distance repulsion between every pair within the cutoff.
    /// The grid restricts candidates to neighboring cells; each unordered
    /// pair is visited once (`j > i`) and pushed apart symmetrically.
    fn apply_repulsion(&mut self) {
        let grid = SpatialGrid::build(&self.positions, self.config.repulsion_radius);
        for i in 0..self.positions.len() {
            for j in grid.neighbors(self.positions[i]) {
                if j <= i {
                    continue;
                }
                let delta = sub(self.positions[j], self.positions[i]);
                let dist = norm(delta);
                if dist > self.config.repulsion_radius {
                    continue;
                }
                let (dir, dist) = if dist < MIN_SEPARATION {
                    ([1.0, 0.0, 0.0], MIN_SEPARATION)
                } else {
                    (scale(delta, 1.0 / dist), dist)
                };
                let magnitude = self.config.repulsion / dist;
                let push = scale(dir, magnitude);
                self.forces[i] = sub(self.forces[i], push);
                self.forces[j] = add(self.forces[j], push);
            }
        }
    }

    /// Spring attraction along every edge, proportional to distance and
    /// edge strength. Direction cancels out of the math (`delta * k`), so
    /// coincident endpoints simply contribute nothing.
    fn apply_attraction(&mut self) {
        for edge in &self.edges {
            let delta = sub(self.positions[edge.b], self.positions[edge.a]);
            let pull = scale(delta, self.config.attraction * edge.strength);
            self.forces[edge.a] = add(self.forces[edge.a], pull);
            self.forces[edge.b] = sub(self.forces[edge.b], pull);
        }
    }

    /// Velocity accumulates net force, position advances by scaled velocity,
    /// then drag and the bounds clamp apply.
    fn integrate(&mut self) {
        let mut energy = 0.0;
        for i in 0..self.positions.len() {
            let v = add(self.velocities[i], self.forces[i]);
            let p = add(self.positions[i], scale(v, self.config.step_scale));
            let v = scale(v, self.config.damping);

            let mut p = [
                clamp_axis(p[0], self.config.width),
                clamp_axis(p[1], self.config.height),
                p[2],
            ];
            if let Some(depth) = self.config.depth {
                p[2] = clamp_axis(p[2], depth);
            }

            energy += dot(v, v);
            self.velocities[i] = v;
            self.positions[i] = p;
        }
        self.kinetic_energy = energy;
    }
}

/// Deterministic circular placement: node `i` of `n` sits at angle
/// `i * 2π/n` on a ring whose radius grows with node weight, centered in
/// the canvas. In 3D the z coordinate spreads across the depth axis by
/// index so the third dimension is not force-degenerate.
fn initial_positions(nodes: &[Node], config: &LayoutConfig) -> Vec<[f64; 3]> {
    let n = nodes.len().max(1) as f64;
    let cx = config.width / 2.0;
    let cy = config.height / 2.0;
    let base_radius = config.width.min(config.height) * BASE_RADIUS_FRACTION;
    let angle_step = std::f64::consts::TAU / n;

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let radius = base_radius + importance_bonus(node.weight);
            let angle = i as f64 * angle_step;
            let z = match config.depth {
                Some(depth) => clamp_axis(depth * (i as f64 + 0.5) / n, depth),
                None => 0.0,
            };
            [
                clamp_axis(cx + radius * angle.cos(), config.width),
                clamp_axis(cy + radius * angle.sin(), config.height),
                z,
            ]
        })
        .collect()
}

/// Extra ring radius for heavier nodes. Zero or undefined weight gets 0.
fn importance_bonus(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0) * IMPORTANCE_SCALE
    } else {
        0.0
    }
}

/// Clamp a coordinate to `[margin, dim - margin]`, degrading to the canvas
/// center when the canvas is smaller than twice the margin.
fn clamp_axis(value: f64, dim: f64) -> f64 {
    let lo = BOUNDS_MARGIN.min(dim / 2.0);
    let hi = (dim - BOUNDS_MARGIN).max(dim / 2.0);
    value.clamp(lo, hi)
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], k: f64) -> [f64; 3] {
    [a[0] * k, a[1] * k, a[2] * k]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
