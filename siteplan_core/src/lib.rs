// siteplan_core — pure Rust site-planning library.
//
// This crate contains the whole planning core: the voxel grid and its
// geometric topology, raster classification, region growth, route
// stitching over an adjacency graph, and the command interface. It has
// zero engine dependencies and can be tested, benchmarked, and run
// headless.
//
// Module overview:
// - `session.rs`:  Top-level PlanSession, command dispatch, route stitching.
// - `grid.rs`:     Dense 3D voxel grid with ground-plane adjacency and raster I/O.
// - `topology.rs`: Face/edge/corner records indexed per axis.
// - `raster.rs`:   Row-major RGB raster + max-difference pixel classification.
// - `growth.rs`:   Radius-bounded flood-fill growth (plots, corridors, scatter).
// - `graph.rs`:    Undirected adjacency graph with interned cell vertices.
// - `router.rs`:   Dijkstra over the adjacency graph with a reusable distance field.
// - `command.rs`:  PlanCommand — all session mutations.
// - `config.rs`:   PlanConfig — all tunable parameters, JSON-loadable.
// - `cell.rs`:     Cell state: category, layer, target flag, exposure score.
// - `prng`:        Re-exported from `siteplan_prng` — xoshiro256++ PRNG with SplitMix64 seeding.
// - `types.rs`:    CellIndex, colors, category profiles, GridError.
//
// **Critical constraint: determinism.** A session is a pure function:
// `(raster, config, commands) -> grid`. All randomness comes from the
// seeded xoshiro256++ PRNG in the config. No system time, no OS entropy.

pub mod cell;
pub mod command;
pub mod config;
pub mod graph;
pub mod grid;
pub mod growth;
pub use siteplan_prng as prng;
pub mod raster;
pub mod router;
pub mod session;
pub mod topology;
pub mod types;
