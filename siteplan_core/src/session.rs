// A planning session — one grid, its targets, and the accumulated route.
//
// The session is the unit of ownership: exactly one control thread drives
// a session at a time, applying `PlanCommand`s in order. It owns the grid
// built from the input raster, the list of picked target cells, the route
// accumulated by stitching, and the seeded PRNG for procedural plots.
//
// Route stitching (`create_routes`) is the session's own algorithm, using
// the router as a service: the first two targets seed the route with their
// shortest path, then each further target attaches to the nearest cell
// already in the route (nearest-insertion). That greedy attachment is the
// intended design — it is not a Steiner-tree or TSP solve, and for three
// or more targets it can miss the global optimum.

use crate::cell::Cell;
use crate::command::PlanCommand;
use crate::config::PlanConfig;
use crate::graph::AdjacencyGraph;
use crate::grid::VoxelGrid;
use crate::growth;
use crate::raster::Raster;
use crate::router::Router;
use crate::types::{CategoryLabel, CellIndex, FunctionColor, GridError};
use serde::{Deserialize, Serialize};
use siteplan_prng::PlanRng;

/// One interactive planning session over a voxel grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanSession {
    grid: VoxelGrid,
    input: Raster,
    config: PlanConfig,
    targets: Vec<CellIndex>,
    route: Vec<CellIndex>,
    rng: PlanRng,
}

impl PlanSession {
    /// Create a session whose grid matches the input raster's ground
    /// plane, with the height, origin, and voxel size from the config.
    /// The raster is not classified until a `Voxelize` command arrives.
    pub fn new(input: Raster, config: PlanConfig) -> Self {
        let grid = VoxelGrid::from_raster(&input, config.origin, config.grid_height, config.voxel_size);
        let rng = PlanRng::new(config.rng_seed);
        Self {
            grid,
            input,
            config,
            targets: Vec::new(),
            route: Vec::new(),
            rng,
        }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Targets currently flagged, in pick order.
    pub fn targets(&self) -> &[CellIndex] {
        &self.targets
    }

    /// The accumulated route. Empty until `create_routes` succeeds.
    pub fn route(&self) -> &[CellIndex] {
        &self.route
    }

    /// Apply one command. Soft failures (picking a non-backyard cell) are
    /// silent no-ops; contract violations return a `GridError`.
    pub fn apply(&mut self, command: &PlanCommand) -> Result<(), GridError> {
        match *command {
            PlanCommand::PickCell { index } => {
                self.pick_cell(index);
                Ok(())
            }
            PlanCommand::Voxelize => self.grid.classify_from_raster(&self.input),
            PlanCommand::ClearGrid => {
                self.grid.clear();
                Ok(())
            }
            PlanCommand::GrowPlot { origin, radius } => {
                growth::grow_plot(&mut self.grid, origin, radius, 0).map(|_| ())
            }
            PlanCommand::CreateRoutes => self.create_routes(),
            PlanCommand::WidenRoute { radius } => {
                growth::grow_corridor(&mut self.grid, &mut self.route, radius);
                Ok(())
            }
            PlanCommand::ScatterPlots { count, radius } => {
                growth::scatter_plots(&mut self.grid, &mut self.rng, count, radius);
                Ok(())
            }
        }
    }

    /// Toggle the target flag on a picked cell and keep the target list in
    /// step. Only interactive cells whose host layer is `Backyard` respond;
    /// any other pick is ignored. Returns whether the pick had an effect.
    pub fn pick_cell(&mut self, index: CellIndex) -> bool {
        let Some(cell) = self.grid.cell_mut(index) else {
            return false;
        };
        if !cell.interactive || cell.layer != Some(CategoryLabel::Backyard) {
            return false;
        }
        cell.toggle_target();
        if cell.is_target {
            self.targets.push(index);
        } else {
            self.targets.retain(|&t| t != index);
        }
        true
    }

    /// Stitch a route visiting every target and recolor it to `White`.
    ///
    /// Needs at least two targets (`TooFewTargets` otherwise). The graph
    /// is restricted to `Blue`/`White` cells, so the route only crosses
    /// backyard and already-plotted ground. A target that cannot reach the
    /// route aborts with `UnreachableTarget`, leaving the route as it was
    /// before this call.
    pub fn create_routes(&mut self) -> Result<(), GridError> {
        if self.targets.len() < 2 {
            return Err(GridError::TooFewTargets {
                have: self.targets.len(),
            });
        }

        let edges = self
            .grid
            .edges_by_categories(FunctionColor::Blue, FunctionColor::White);
        let graph = AdjacencyGraph::from_edges(&edges);
        let mut router = Router::new(&graph);

        let mut pool = self.targets.iter().copied();
        let first = pool.next().expect("checked length above");
        let second = pool.next().expect("checked length above");

        // Blame the endpoint that is actually cut off: a first target with
        // no graph presence is its own failure, not the second's.
        if !router.compute_from_source(first) {
            return Err(GridError::UnreachableTarget(first));
        }
        let mut route = router.shortest_path(first, second);
        if route.is_empty() {
            return Err(GridError::UnreachableTarget(second));
        }

        for target in pool {
            Self::attach_target(&mut router, &mut route, target)?;
        }

        for &index in &route {
            if let Some(cell) = self.grid.cell_mut(index) {
                cell.set_category(FunctionColor::White);
            }
        }
        self.route.extend(route);
        Ok(())
    }

    /// Attach one further target to the route: recompute distances from
    /// the target, pick the route cell nearest to it, and append the
    /// connecting path minus the duplicate endpoint.
    fn attach_target(
        router: &mut Router<'_>,
        route: &mut Vec<CellIndex>,
        target: CellIndex,
    ) -> Result<(), GridError> {
        if !router.compute_from_source(target) {
            return Err(GridError::UnreachableTarget(target));
        }
        let closest = route
            .iter()
            .copied()
            .filter_map(|cell| router.vertex_distance(cell).map(|d| (d, cell)))
            .min_by_key(|&(d, _)| d)
            .map(|(_, cell)| cell);
        let Some(closest) = closest else {
            return Err(GridError::UnreachableTarget(target));
        };

        let mut segment = router.shortest_path(target, closest);
        // The nearest route cell is the segment's last element; drop it so
        // the route gains no duplicate adjacent entry.
        segment.pop();
        route.extend(segment);
        Ok(())
    }

    /// Record an externally computed exposure score for every interactive
    /// ground cell and recategorize backyard cells scoring below
    /// `min_score` to `Empty` (too shaded to build on). The score function
    /// is injected — ray geometry belongs to the host, thresholding to the
    /// core. Returns the number of cells recategorized.
    pub fn apply_exposure<F>(&mut self, exposure: F, min_score: f32) -> usize
    where
        F: Fn(&Cell) -> f32,
    {
        let size = self.grid.size();
        let mut filtered = 0;
        for z in 0..size.z {
            for x in 0..size.x {
                let index = CellIndex::new(x, 0, z);
                let cell = self.grid.cell_mut(index).expect("ground index in bounds");
                if !cell.interactive {
                    continue;
                }
                let score = exposure(cell);
                cell.light_score = score;
                if cell.category == FunctionColor::Blue && score < min_score {
                    cell.set_category(FunctionColor::Empty);
                    filtered += 1;
                }
            }
        }
        filtered
    }
}
