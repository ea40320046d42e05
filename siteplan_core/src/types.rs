// Core types shared across the planning library.
//
// Defines the spatial index (`CellIndex`), the functional category enum
// (`FunctionColor`) with its single lookup table to display color and
// semantic label, normalized RGB pixels, and the library's error enum.
// All data types derive `Serialize`/`Deserialize` so a host can snapshot
// and restore a session.
//
// The category lookup table is deliberately the only place that maps a
// `FunctionColor` to anything: classification, raster export, and host
// layer assignment all read from it, so the three can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D cell grid. Each component is in voxel units.
///
/// The ground plane is XZ; Y is the vertical axis. Layer `y = 0` is the
/// interactive ground layer that classification and routing operate on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellIndex {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance between two indices.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs()
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An RGB color with channels normalized to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Sum of absolute per-channel differences to another color.
    pub fn channel_distance(self, other: Self) -> f32 {
        (self.r - other.r).abs() + (self.g - other.g).abs() + (self.b - other.b).abs()
    }
}

// ---------------------------------------------------------------------------
// Functional categories
// ---------------------------------------------------------------------------

/// Color-coded functional category of a cell, read from the site plan.
///
/// `Empty` means unclassified; it is the state every cell starts in and the
/// state `VoxelGrid::clear()` resets to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionColor {
    Empty,
    Red,
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    White,
    Gray,
}

impl Default for FunctionColor {
    fn default() -> Self {
        Self::Empty
    }
}

/// Semantic label attached to a category — the site-plan meaning of the
/// color, also used as the host-visible layer name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    Plot,
    House,
    Street,
    Backyard,
    Frontyard,
    SmallBuilding,
    Tree,
    EmptyLand,
    LandTexture,
}

/// Everything derived from a `FunctionColor`: the fixed display color used
/// by raster export and host rendering, and the semantic label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryProfile {
    pub display: Rgb,
    pub label: CategoryLabel,
}

impl FunctionColor {
    /// The single category lookup table. Unclassified cells display as
    /// orange so they are visible in exported rasters.
    pub fn profile(self) -> CategoryProfile {
        use CategoryLabel as L;
        let (display, label) = match self {
            Self::Empty => (Rgb::new(1.0, 0.64, 0.0), L::EmptyLand),
            Self::Red => (Rgb::new(1.0, 0.0, 0.0), L::House),
            Self::Yellow => (Rgb::new(1.0, 1.0, 0.0), L::Street),
            Self::Green => (Rgb::new(0.0, 1.0, 0.0), L::Tree),
            Self::Cyan => (Rgb::new(0.0, 1.0, 1.0), L::LandTexture),
            Self::Magenta => (Rgb::new(1.0, 0.0, 1.0), L::Frontyard),
            Self::Blue => (Rgb::new(0.0, 0.0, 1.0), L::Backyard),
            Self::White => (Rgb::new(1.0, 1.0, 1.0), L::Plot),
            Self::Gray => (Rgb::new(0.5, 0.5, 0.5), L::SmallBuilding),
        };
        CategoryProfile { display, label }
    }

    /// Fixed display color for raster export.
    pub fn display_color(self) -> Rgb {
        self.profile().display
    }

    /// Semantic label for this category.
    pub fn label(self) -> CategoryLabel {
        self.profile().label
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by grid and routing operations.
///
/// Soft failures (unreachable vertices during plain shortest-path queries)
/// are reported as empty paths, not errors; see `router.rs`. These variants
/// cover contract violations a caller can commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An index outside the grid bounds was passed to an operation.
    OutOfBounds(CellIndex),
    /// Route stitching needs at least two targets.
    TooFewTargets { have: usize },
    /// A target could not be connected to the rest of the route.
    UnreachableTarget(CellIndex),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(index) => write!(f, "cell index {index} is out of bounds"),
            Self::TooFewTargets { have } => {
                write!(f, "route stitching needs at least 2 targets, have {have}")
            }
            Self::UnreachableTarget(index) => {
                write!(f, "target {index} is unreachable from the route")
            }
        }
    }
}

impl std::error::Error for GridError {}
