// Session configuration, loadable from JSON.
//
// Every knob the planning core exposes lives here so a host can serialize
// one file per scenario. Defaults reproduce the behavior of the reference
// scenes: a 10-layer grid, unit voxels, a fixed scatter seed.
//
// **Critical constraint: determinism.** The PRNG seed is part of the
// config, never wall-clock derived. Two sessions built from the same
// config and input raster evolve identically under the same commands.

use serde::{Deserialize, Serialize};

/// Tunable parameters for a [`crate::session::PlanSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Number of voxel layers above the ground plane.
    pub grid_height: i32,
    /// World-space edge length of one voxel.
    pub voxel_size: f32,
    /// World-space position of the grid's minimum corner.
    pub origin: [f32; 3],
    /// Default growth radius for interactively placed plots.
    pub plot_grow_radius: u32,
    /// Corridor half-width used when widening a stitched route.
    pub route_grow_radius: u32,
    /// How many procedural plots a scatter pass places.
    pub scatter_count: u32,
    /// Minimum exposure score a backyard cell needs to stay buildable.
    pub exposure_min_score: f32,
    /// Seed for the session's PRNG.
    pub rng_seed: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            grid_height: 10,
            voxel_size: 1.0,
            origin: [0.0, 0.0, 0.0],
            plot_grow_radius: 3,
            route_grow_radius: 5,
            scatter_count: 8,
            exposure_min_score: 0.5,
            rng_seed: 666,
        }
    }
}

impl PlanConfig {
    /// Parse a config from a JSON string. Missing fields fall back to
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
