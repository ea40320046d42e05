// Radius-bounded flood-fill growth.
//
// Growth is breadth-first frontier expansion from seed cells, constrained
// by category and activity: only active `Blue` (backyard) cells are ever
// admitted, each cell at most once per frontier, and each of the `radius`
// iterations expands the whole accumulated set by one ring. An iteration
// that admits nothing stops the fill early, so the loop always terminates
// even when `radius` exceeds the connected region.
//
// Two variants share that expansion:
// - `grow_plot`: one seed, recolors the admitted region to `White` (plot).
//   2-D in-plane neighbors on the ground layer, full 3-D face neighbors on
//   elevated layers.
// - `grow_corridor`: every cell of an existing route seeds its own
//   independent expansion (per-seed dedup only — overlapping growth from
//   different seeds is expected and harmless since the recolor is
//   idempotent). Admitted cells become occupied (`Yellow`, state 1) and
//   are appended to the route.
//
// `scatter_plots` drives `grow_plot` from an explicit seeded PRNG to drop
// procedural test plots onto the ground layer.

use crate::grid::VoxelGrid;
use crate::types::{CellIndex, FunctionColor, GridError};
use rustc_hash::FxHashSet;
use siteplan_prng::PlanRng;

/// Expand one frontier from `seed` for `radius` iterations. Returns the
/// accumulated cell set, seed first; the seed itself is not category
/// checked — only expansion is constrained to active `Blue` cells.
fn expand_frontier(
    grid: &VoxelGrid,
    seed: CellIndex,
    radius: u32,
    in_plane: bool,
) -> Vec<CellIndex> {
    let mut frontier = vec![seed];
    let mut seen: FxHashSet<CellIndex> = FxHashSet::default();
    seen.insert(seed);

    for _ in 0..radius {
        let mut admitted = Vec::new();
        for &current in &frontier {
            let neighbors = if in_plane {
                grid.face_neighbors_xz(current)
            } else {
                grid.face_neighbors(current)
            };
            for neighbor in neighbors {
                if seen.contains(&neighbor) {
                    continue;
                }
                let cell = grid.cell(neighbor).expect("neighbor indices are in bounds");
                if cell.active && cell.category == FunctionColor::Blue {
                    seen.insert(neighbor);
                    admitted.push(neighbor);
                }
            }
        }
        if admitted.is_empty() {
            break;
        }
        frontier.extend(admitted);
    }

    frontier
}

/// Seed-based plot growth: flood-fill from `origin` (seeded on
/// `height_layer`) and recolor every admitted backyard cell to `White`.
///
/// Uses in-plane neighbors when `height_layer` is 0, full 3-D face
/// neighbors otherwise. Out-of-bounds origins are rejected with
/// `OutOfBounds`; any valid origin succeeds, returning the recolored
/// cells — possibly none, when the seed has no growable surroundings.
pub fn grow_plot(
    grid: &mut VoxelGrid,
    origin: CellIndex,
    radius: u32,
    height_layer: i32,
) -> Result<Vec<CellIndex>, GridError> {
    if !grid.validate_index(origin) {
        return Err(GridError::OutOfBounds(origin));
    }
    let seed = CellIndex::new(origin.x, height_layer, origin.z);
    if !grid.validate_index(seed) {
        return Err(GridError::OutOfBounds(seed));
    }

    let region = expand_frontier(grid, seed, radius, height_layer == 0);

    let mut grown = Vec::new();
    for index in region {
        let cell = grid.cell_mut(index).expect("region cells are in bounds");
        if cell.category == FunctionColor::Blue {
            cell.set_category(FunctionColor::White);
            grown.push(index);
        }
    }
    Ok(grown)
}

/// Corridor widening: grow every cell of `path` independently by `radius`
/// rings of 3-D face neighbors, mark the newly admitted cells occupied
/// (`Yellow`, state 1), and append them to `path`.
///
/// Each seed's frontier dedupes only against itself, so a cell reachable
/// from several path cells appears once per seed in the returned flat
/// collection — deduplication across seeds is deliberately not this
/// function's job.
pub fn grow_corridor(
    grid: &mut VoxelGrid,
    path: &mut Vec<CellIndex>,
    radius: u32,
) -> Vec<CellIndex> {
    let seeds: Vec<CellIndex> = path.clone();
    let mut grown = Vec::new();

    for seed in seeds {
        let region = expand_frontier(grid, seed, radius, false);
        // Skip the seed itself; it is already part of the route.
        grown.extend(region.into_iter().skip(1));
    }

    for &index in &grown {
        if let Some(cell) = grid.cell_mut(index) {
            cell.set_state(1);
        }
    }
    path.extend(grown.iter().copied());
    grown
}

/// Procedural test-plot generation: grow `count` plots of the given radius
/// from random ground-layer origins drawn from `rng`.
///
/// Returns the total number of cells recategorized. Deterministic for a
/// given seed and grid state.
pub fn scatter_plots(grid: &mut VoxelGrid, rng: &mut PlanRng, count: u32, radius: u32) -> usize {
    let size = grid.size();
    // An empty ground plane has nowhere to scatter.
    if size.x <= 0 || size.z <= 0 {
        return 0;
    }
    let mut total = 0;
    for _ in 0..count {
        let origin = CellIndex::new(
            rng.range_usize(0, size.x as usize) as i32,
            0,
            rng.range_usize(0, size.z as usize) as i32,
        );
        // Origins are drawn in bounds, so growth cannot fail.
        if let Ok(grown) = grow_plot(grid, origin, radius, 0) {
            total += grown.len();
        }
    }
    total
}
