// The addressable unit of the grid.
//
// One cell type carries every attribute any part of the system needs:
// category, derived label, target flag, growth state, exposure score.
// Interactive (ground-layer) cells are distinguished by a flag rather than
// a separate type, since every grid instantiates exactly one kind of cell.
//
// A cell's identity is its index and nothing else: equality and hashing
// ignore every mutable attribute. Cells are created once at grid
// construction and live for the grid's lifetime; only attributes mutate.

use crate::types::{CategoryLabel, CellIndex, FunctionColor};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single grid cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Immutable position within the grid; the cell's identity.
    pub index: CellIndex,
    /// Whether the cell participates in queries and rendering.
    pub active: bool,
    /// Ground-layer cells are interactive: they respond to host picking
    /// and carry a host-visible classification layer.
    pub interactive: bool,
    /// Functional category, `Empty` until classified.
    pub category: FunctionColor,
    /// Semantic label, always derived from `category` via the lookup table.
    pub quality: CategoryLabel,
    /// Host-visible classification layer. Assigned strictly once, during
    /// the first classification pass that sees this cell active.
    pub layer: Option<CategoryLabel>,
    /// Whether the cell is flagged for inclusion in the multi-point route.
    pub is_target: bool,
    /// Growth state: 0 = background, 1 = occupied by corridor growth.
    pub state: u8,
    /// Externally computed exposure score, recorded by the session's
    /// exposure filter. Zero until scored.
    pub light_score: f32,
}

impl Cell {
    /// Create a cell at `index`. All cells start active and unclassified;
    /// `interactive` is set for ground-layer cells by the grid.
    pub fn new(index: CellIndex, interactive: bool) -> Self {
        Self {
            index,
            active: true,
            interactive,
            category: FunctionColor::Empty,
            quality: FunctionColor::Empty.label(),
            layer: None,
            is_target: false,
            state: 0,
            light_score: 0.0,
        }
    }

    /// Assign a category, keeping the derived label in sync.
    pub fn set_category(&mut self, category: FunctionColor) {
        self.category = category;
        self.quality = category.label();
    }

    /// Toggle the target flag. A selected target shows as `White` (plot);
    /// deselecting reverts it to `Blue` (backyard), matching the only
    /// category targets can be picked from.
    pub fn toggle_target(&mut self) {
        self.is_target = !self.is_target;
        if self.is_target {
            self.set_category(FunctionColor::White);
        } else {
            self.set_category(FunctionColor::Blue);
        }
    }

    /// Set the growth state. State 1 marks the cell as occupied corridor
    /// (`Yellow`); state 0 releases it back to backyard (`Blue`).
    pub fn set_state(&mut self, state: u8) {
        self.state = state;
        match state {
            1 => self.set_category(FunctionColor::Yellow),
            0 => self.set_category(FunctionColor::Blue),
            _ => {}
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
