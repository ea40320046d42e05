// Dense 3D cell grid — the spatial truth of a planning session.
//
// Cells are stored as a flat `Vec<Cell>` indexed by
// `x + z * size_x + y * size_x * size_z`, giving O(1) bounds-checked
// access. All cells are created once at construction and only their
// attributes mutate afterward; the grid exclusively owns them.
//
// Alongside the cells the grid owns two derived structures, both built
// once at construction and read-only after:
// - the face/edge/corner topology (see `topology.rs`), and
// - the ground-layer adjacency edge list: 4-connectivity between y = 0
//   cells, each undirected edge recorded exactly once (toward -x and -z).
//   The list depends only on the grid size, so both constructors build it.
//
// Classification, clearing, and raster export live here; flood-fill growth
// is in `growth.rs` and operates on `&mut VoxelGrid`.
//
// The grid is mutated in place by a single control thread per session.
// The one internal use of parallelism, the raster export fill, reads the
// grid immutably.

use crate::cell::Cell;
use crate::raster::{Raster, classify_pixel};
use crate::topology::GridTopology;
use crate::types::{CellIndex, FunctionColor, GridError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The voxel grid: cells, derived topology, ground adjacency.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoxelGrid {
    size: CellIndex,
    origin: [f32; 3],
    voxel_size: f32,
    /// Flat storage: index = x + z * size.x + y * size.x * size.z.
    cells: Vec<Cell>,
    topology: GridTopology,
    /// Ground-layer adjacency edges, each stored once.
    adjacency: Vec<(CellIndex, CellIndex)>,
}

impl VoxelGrid {
    /// Create a grid of `size` cells. Every cell starts active and
    /// unclassified; ground-layer (y = 0) cells are interactive.
    ///
    /// Non-positive size components are clamped to zero, yielding an empty
    /// grid: no cells, no adjacency, every index out of bounds. Operations
    /// on an empty grid degrade to no-ops or bounds errors, never faults.
    pub fn new(size: CellIndex, origin: [f32; 3], voxel_size: f32) -> Self {
        let size = CellIndex::new(size.x.max(0), size.y.max(0), size.z.max(0));

        let total = (size.x as usize) * (size.y as usize) * (size.z as usize);
        let mut cells = Vec::with_capacity(total);
        let mut adjacency = Vec::new();

        for y in 0..size.y {
            for z in 0..size.z {
                for x in 0..size.x {
                    let index = CellIndex::new(x, y, z);
                    cells.push(Cell::new(index, y == 0));
                    if y == 0 {
                        if x > 0 {
                            adjacency.push((index, CellIndex::new(x - 1, 0, z)));
                        }
                        if z > 0 {
                            adjacency.push((index, CellIndex::new(x, 0, z - 1)));
                        }
                    }
                }
            }
        }

        Self {
            size,
            origin,
            voxel_size,
            cells,
            topology: GridTopology::new(size),
            adjacency,
        }
    }

    /// Create a grid whose ground plane matches a raster's dimensions:
    /// `size = (raster.width, height, raster.height)`. The raster is not
    /// classified here — call `classify_from_raster` for that.
    pub fn from_raster(raster: &Raster, origin: [f32; 3], height: i32, voxel_size: f32) -> Self {
        Self::new(
            CellIndex::new(raster.width() as i32, height, raster.height() as i32),
            origin,
            voxel_size,
        )
    }

    pub fn size(&self) -> CellIndex {
        self.size
    }

    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Whether an index lies within the grid bounds. Every entry point that
    /// accepts caller-supplied coordinates goes through this.
    pub fn validate_index(&self, index: CellIndex) -> bool {
        index.x >= 0
            && index.y >= 0
            && index.z >= 0
            && index.x < self.size.x
            && index.y < self.size.y
            && index.z < self.size.z
    }

    /// Convert an index to a flat offset. `None` if out of bounds.
    fn offset(&self, index: CellIndex) -> Option<usize> {
        if self.validate_index(index) {
            let sx = self.size.x as usize;
            let sz = self.size.z as usize;
            Some(index.x as usize + index.z as usize * sx + index.y as usize * sx * sz)
        } else {
            None
        }
    }

    /// Read a cell. `None` for out-of-bounds indices.
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.offset(index).map(|i| &self.cells[i])
    }

    /// Mutable access to a cell. `None` for out-of-bounds indices.
    pub fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.offset(index).map(move |i| &mut self.cells[i])
    }

    /// All cells, x-fastest within a z-row, rows within a layer.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The 6 face-adjacent neighbor indices that are in bounds.
    pub fn face_neighbors(&self, index: CellIndex) -> SmallVec<[CellIndex; 6]> {
        const OFFSETS: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| CellIndex::new(index.x + dx, index.y + dy, index.z + dz))
            .filter(|&n| self.validate_index(n))
            .collect()
    }

    /// The 4 in-plane (XZ) neighbor indices that are in bounds.
    pub fn face_neighbors_xz(&self, index: CellIndex) -> SmallVec<[CellIndex; 6]> {
        const OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        OFFSETS
            .iter()
            .map(|&(dx, dz)| CellIndex::new(index.x + dx, index.y, index.z + dz))
            .filter(|&n| self.validate_index(n))
            .collect()
    }

    /// Classify every ground-layer cell from the raster pixel at its
    /// (x, z) position, assigning category and derived label.
    ///
    /// Side effect: each active cell's host-visible layer is assigned from
    /// the lookup table, strictly once — a cell classified again keeps the
    /// layer from its first classification.
    ///
    /// Returns `Err(OutOfBounds)` if the raster is smaller than the ground
    /// plane on either axis.
    pub fn classify_from_raster(&mut self, raster: &Raster) -> Result<(), GridError> {
        if (raster.width() as i32) < self.size.x || (raster.height() as i32) < self.size.z {
            return Err(GridError::OutOfBounds(CellIndex::new(
                self.size.x - 1,
                0,
                self.size.z - 1,
            )));
        }

        for z in 0..self.size.z {
            for x in 0..self.size.x {
                let pixel = raster
                    .pixel(x as u32, z as u32)
                    .unwrap_or(crate::types::Rgb::new(0.0, 0.0, 0.0));
                let (category, _score) = classify_pixel(pixel);
                let cell = self
                    .cell_mut(CellIndex::new(x, 0, z))
                    .expect("ground index in bounds by construction");
                cell.set_category(category);
                if cell.active && cell.layer.is_none() {
                    cell.layer = Some(category.label());
                }
            }
        }
        Ok(())
    }

    /// Reset every cell's category to `Empty`. Leaves `active`, `state`,
    /// target flags, layers, and the topology untouched.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_category(FunctionColor::Empty);
        }
    }

    /// Export the ground layer as a raster, one pixel per cell, using the
    /// fixed display palette (unclassified cells map to the orange
    /// fallback). Output dimensions are (size.x, size.z).
    pub fn image_from_grid(&self) -> Raster {
        let width = self.size.x as usize;
        let mut raster = Raster::new(self.size.x as u32, self.size.z as u32);
        raster
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(z, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let index = CellIndex::new(x as i32, 0, z as i32);
                    let cell = &self.cells[self.offset(index).expect("row index in bounds")];
                    *pixel = cell.category.display_color();
                }
            });
        raster
    }

    /// Ground adjacency edges whose endpoints both have a category in
    /// `{c1, c2}` (either assignment — the endpoints need not differ).
    pub fn edges_by_categories(
        &self,
        c1: FunctionColor,
        c2: FunctionColor,
    ) -> Vec<(CellIndex, CellIndex)> {
        let matches = |index: CellIndex| {
            let category = self.cells[self.offset(index).expect("stored edge endpoint")].category;
            category == c1 || category == c2
        };
        self.adjacency
            .iter()
            .copied()
            .filter(|&(a, b)| matches(a) && matches(b))
            .collect()
    }

    /// All stored ground adjacency edges.
    pub fn adjacency_edges(&self) -> &[(CellIndex, CellIndex)] {
        &self.adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryLabel, Rgb};

    fn ground_grid(x: i32, z: i32) -> VoxelGrid {
        VoxelGrid::new(CellIndex::new(x, 1, z), [0.0; 3], 1.0)
    }

    #[test]
    fn every_cell_stores_its_own_index() {
        let grid = VoxelGrid::new(CellIndex::new(3, 2, 4), [0.0; 3], 1.0);
        for x in 0..3 {
            for y in 0..2 {
                for z in 0..4 {
                    let index = CellIndex::new(x, y, z);
                    assert_eq!(grid.cell(index).unwrap().index, index);
                }
            }
        }
    }

    #[test]
    fn ground_layer_cells_are_interactive() {
        let grid = VoxelGrid::new(CellIndex::new(2, 3, 2), [0.0; 3], 1.0);
        for cell in grid.cells() {
            assert_eq!(cell.interactive, cell.index.y == 0);
        }
    }

    #[test]
    fn degenerate_sizes_yield_an_empty_grid() {
        for size in [CellIndex::new(0, 10, 0), CellIndex::new(-3, 1, 5)] {
            let grid = VoxelGrid::new(size, [0.0; 3], 1.0);
            assert_eq!(grid.cells().count(), 0);
            assert!(grid.adjacency_edges().is_empty());
            assert!(grid.cell(CellIndex::new(0, 0, 0)).is_none());
        }
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let grid = ground_grid(4, 4);
        assert!(grid.cell(CellIndex::new(-1, 0, 0)).is_none());
        assert!(grid.cell(CellIndex::new(4, 0, 0)).is_none());
        assert!(grid.cell(CellIndex::new(0, 1, 0)).is_none());
        assert!(grid.cell(CellIndex::new(0, 0, 4)).is_none());
    }

    #[test]
    fn adjacency_edge_count_is_4_connectivity_stored_once() {
        // An n×m ground plane has n*(m-1) + m*(n-1) undirected edges.
        let grid = ground_grid(3, 4);
        assert_eq!(grid.adjacency_edges().len(), 3 * 3 + 4 * 2);
    }

    #[test]
    fn from_raster_matches_image_dimensions() {
        let raster = Raster::new(5, 7);
        let grid = VoxelGrid::from_raster(&raster, [0.0; 3], 2, 1.0);
        assert_eq!(grid.size(), CellIndex::new(5, 2, 7));
    }

    #[test]
    fn face_neighbors_at_corner_and_interior() {
        let grid = VoxelGrid::new(CellIndex::new(3, 3, 3), [0.0; 3], 1.0);
        assert_eq!(grid.face_neighbors(CellIndex::new(0, 0, 0)).len(), 3);
        assert_eq!(grid.face_neighbors(CellIndex::new(1, 1, 1)).len(), 6);
        assert_eq!(grid.face_neighbors_xz(CellIndex::new(0, 0, 0)).len(), 2);
        assert_eq!(grid.face_neighbors_xz(CellIndex::new(1, 0, 1)).len(), 4);
    }

    #[test]
    fn classify_assigns_category_and_label_once() {
        let mut raster = Raster::new(2, 2);
        // Pure red pixels classify as Cyan under the max-difference rule.
        for y in 0..2 {
            for x in 0..2 {
                raster.set_pixel(x, y, Rgb::new(1.0, 0.0, 0.0));
            }
        }
        let mut grid = VoxelGrid::from_raster(&raster, [0.0; 3], 1, 1.0);
        grid.classify_from_raster(&raster).unwrap();

        let cell = grid.cell(CellIndex::new(0, 0, 0)).unwrap();
        assert_eq!(cell.category, FunctionColor::Cyan);
        assert_eq!(cell.quality, CategoryLabel::LandTexture);
        assert_eq!(cell.layer, Some(CategoryLabel::LandTexture));

        // Re-classifying with different pixels updates the category but
        // never the layer — it is assigned strictly once.
        let mut second = Raster::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                second.set_pixel(x, y, Rgb::new(0.0, 1.0, 1.0));
            }
        }
        grid.classify_from_raster(&second).unwrap();
        let cell = grid.cell(CellIndex::new(0, 0, 0)).unwrap();
        assert_eq!(cell.category, FunctionColor::Red);
        assert_eq!(cell.layer, Some(CategoryLabel::LandTexture));
    }

    #[test]
    fn classify_rejects_undersized_raster() {
        let raster = Raster::new(2, 2);
        let mut grid = ground_grid(3, 3);
        assert!(matches!(
            grid.classify_from_raster(&raster),
            Err(GridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn clear_resets_categories_and_nothing_else() {
        let mut grid = ground_grid(3, 3);
        let index = CellIndex::new(1, 0, 1);
        grid.cell_mut(index).unwrap().set_category(FunctionColor::Blue);
        grid.cell_mut(index).unwrap().state = 1;

        grid.clear();

        let cell = grid.cell(index).unwrap();
        assert_eq!(cell.category, FunctionColor::Empty);
        assert_eq!(cell.quality, CategoryLabel::EmptyLand);
        assert!(cell.active);
        assert_eq!(cell.state, 1);
        assert!(grid.topology().dims_valid());
    }

    #[test]
    fn export_quantizes_to_the_fixed_palette() {
        // Classification is lossy; the export of a classified grid uses
        // exact palette colors regardless of the input pixel values.
        let mut raster = Raster::new(2, 1);
        raster.set_pixel(0, 0, Rgb::new(0.9, 0.05, 0.1)); // near-red
        raster.set_pixel(1, 0, Rgb::new(0.1, 0.1, 0.95)); // near-blue
        let mut grid = VoxelGrid::from_raster(&raster, [0.0; 3], 1, 1.0);
        grid.classify_from_raster(&raster).unwrap();

        let exported = grid.image_from_grid();
        assert_eq!(exported.width(), 2);
        assert_eq!(exported.height(), 1);
        for x in 0..2 {
            let category = grid.cell(CellIndex::new(x, 0, 0)).unwrap().category;
            assert_eq!(exported.pixel(x as u32, 0), Some(category.display_color()));
        }
    }

    #[test]
    fn export_maps_empty_to_orange() {
        let grid = ground_grid(2, 2);
        let exported = grid.image_from_grid();
        assert_eq!(exported.pixel(0, 0), Some(Rgb::new(1.0, 0.64, 0.0)));
    }

    #[test]
    fn edges_by_categories_requires_both_endpoints() {
        let mut grid = ground_grid(3, 1);
        // Row: Blue, Blue, Red. Edge (1,0)-(0,0) qualifies for {Blue,White};
        // edge (2,0)-(1,0) does not (Red endpoint).
        grid.cell_mut(CellIndex::new(0, 0, 0)).unwrap().set_category(FunctionColor::Blue);
        grid.cell_mut(CellIndex::new(1, 0, 0)).unwrap().set_category(FunctionColor::Blue);
        grid.cell_mut(CellIndex::new(2, 0, 0)).unwrap().set_category(FunctionColor::Red);

        let edges = grid.edges_by_categories(FunctionColor::Blue, FunctionColor::White);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0], (CellIndex::new(1, 0, 0), CellIndex::new(0, 0, 0)));

        // Mixed endpoints count when each is one of the two categories.
        grid.cell_mut(CellIndex::new(2, 0, 0)).unwrap().set_category(FunctionColor::White);
        let edges = grid.edges_by_categories(FunctionColor::Blue, FunctionColor::White);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn grid_serialization_roundtrip() {
        let mut grid = ground_grid(2, 2);
        grid.cell_mut(CellIndex::new(1, 0, 1)).unwrap().set_category(FunctionColor::Blue);
        let json = serde_json::to_string(&grid).unwrap();
        let restored: VoxelGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.size(), grid.size());
        assert_eq!(
            restored.cell(CellIndex::new(1, 0, 1)).unwrap().category,
            FunctionColor::Blue
        );
        assert!(restored.topology().dims_valid());
        assert_eq!(restored.adjacency_edges().len(), grid.adjacency_edges().len());
    }
}
