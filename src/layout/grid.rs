//! Uniform spatial grid for the repulsion cutoff.
//!
//! Bucketing nodes into cells of `repulsion_radius` width restricts pair
//! checks to the 27 neighboring cells (9 in 2D, where every z-cell is 0),
//! keeping the per-iteration cost near-linear for spread-out layouts instead
//! of all-pairs quadratic. Buckets are filled in node-index order and
//! neighbor cells are visited in a fixed offset order, so traversal is
//! deterministic.

use hashbrown::HashMap;
use smallvec::SmallVec;

pub(crate) struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64, i64), SmallVec<[usize; 8]>>,
}

impl SpatialGrid {
    /// Bucket every position. `cell_size` must be positive (the caller
    /// validates `repulsion_radius` before the simulation starts).
    pub fn build(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut cells: HashMap<(i64, i64, i64), SmallVec<[usize; 8]>> = HashMap::new();
        for (i, p) in positions.iter().enumerate() {
            cells.entry(cell_key(*p, cell_size)).or_default().push(i);
        }
        Self { cell_size, cells }
    }

    /// Indices of all nodes in the cell containing `p` and its neighbors,
    /// in a fixed (dz, dy, dx, insertion) order.
    pub fn neighbors(&self, p: [f64; 3]) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy, cz) = cell_key(p, self.cell_size);
        NEIGHBOR_OFFSETS.iter().flat_map(move |&(dx, dy, dz)| {
            self.cells
                .get(&(cx + dx, cy + dy, cz + dz))
                .into_iter()
                .flatten()
                .copied()
        })
    }
}

fn cell_key(p: [f64; 3], cell_size: f64) -> (i64, i64, i64) {
    (
        (p[0] / cell_size).floor() as i64,
        (p[1] / cell_size).floor() as i64,
        (p[2] / cell_size).floor() as i64,
    )
}

/// The 27 neighbor offsets in a fixed order.
const NEIGHBOR_OFFSETS: [(i64, i64, i64); 27] = {
    let mut offsets = [(0i64, 0i64, 0i64); 27];
    let mut n = 0;
    let mut dz = -1i64;
    while dz <= 1 {
        let mut dy = -1i64;
        while dy <= 1 {
            let mut dx = -1i64;
            while dx <= 1 {
                offsets[n] = (dx, dy, dz);
                n += 1;
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    offsets
};
