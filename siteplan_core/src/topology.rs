// Face/edge/corner topology derived from the grid size.
//
// For a grid of size (sx, sy, sz) cells there are three orientations of
// faces, one per axis: the array for faces normal to an axis is padded by
// one along that axis and matches the grid along the other two. Edges pad
// along the two axes perpendicular to their direction, and corners pad
// along all three. Everything here is pure positional indexing — the
// topology is built once at grid construction and is read-only afterward;
// it exists to support neighbor queries in the three orthogonal directions.
//
// Invariant: for each orientation, the stored array dimensions equal
// `GridSize + unit vector` along the relevant padded axes. `dims_valid()`
// checks this and is exercised by the tests; a violation would mean the
// topology is corrupt and nothing downstream can be trusted.

use crate::types::CellIndex;
use serde::{Deserialize, Serialize};

/// A grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// A cell face, identified by its position and the axis it is normal to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub index: CellIndex,
    pub axis: Axis,
}

/// A cell edge, identified by its position and the axis it runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEdge {
    pub index: CellIndex,
    pub axis: Axis,
}

/// A cell corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corner {
    pub index: CellIndex,
}

/// Dense face/edge/corner arrays for one grid.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GridTopology {
    size: [i32; 3],
    faces: [Vec<Face>; 3],
    face_dims: [[i32; 3]; 3],
    edges: [Vec<GridEdge>; 3],
    edge_dims: [[i32; 3]; 3],
    corners: Vec<Corner>,
}

/// Flat offset into a dense array with the given dimensions, or `None` if
/// any coordinate falls outside them.
fn linear(dims: [i32; 3], index: CellIndex) -> Option<usize> {
    let (x, y, z) = (index.x, index.y, index.z);
    if x < 0 || y < 0 || z < 0 || x >= dims[0] || y >= dims[1] || z >= dims[2] {
        return None;
    }
    let (dx, dz) = (dims[0] as usize, dims[2] as usize);
    Some(x as usize + z as usize * dx + y as usize * dx * dz)
}

impl GridTopology {
    /// Build the topology for a grid of `size` cells.
    pub fn new(size: CellIndex) -> Self {
        let s = [size.x, size.y, size.z];

        // Faces normal to axis n pad by one along axis n.
        let face_dims = [
            [s[0] + 1, s[1], s[2]],
            [s[0], s[1] + 1, s[2]],
            [s[0], s[1], s[2] + 1],
        ];
        // Edges along axis n pad by one along the other two axes.
        let edge_dims = [
            [s[0], s[1] + 1, s[2] + 1],
            [s[0] + 1, s[1], s[2] + 1],
            [s[0] + 1, s[1] + 1, s[2]],
        ];

        let faces = [
            Self::fill(face_dims[0], |i| Face { index: i, axis: Axis::X }),
            Self::fill(face_dims[1], |i| Face { index: i, axis: Axis::Y }),
            Self::fill(face_dims[2], |i| Face { index: i, axis: Axis::Z }),
        ];
        let edges = [
            Self::fill(edge_dims[0], |i| GridEdge { index: i, axis: Axis::X }),
            Self::fill(edge_dims[1], |i| GridEdge { index: i, axis: Axis::Y }),
            Self::fill(edge_dims[2], |i| GridEdge { index: i, axis: Axis::Z }),
        ];
        let corners = Self::fill([s[0] + 1, s[1] + 1, s[2] + 1], |i| Corner { index: i });

        Self {
            size: s,
            faces,
            face_dims,
            edges,
            edge_dims,
            corners,
        }
    }

    /// Fill a dense array in x-fastest, then z, then y order.
    fn fill<T>(dims: [i32; 3], make: impl Fn(CellIndex) -> T) -> Vec<T> {
        let mut out = Vec::with_capacity((dims[0] * dims[1] * dims[2]) as usize);
        for y in 0..dims[1] {
            for z in 0..dims[2] {
                for x in 0..dims[0] {
                    out.push(make(CellIndex::new(x, y, z)));
                }
            }
        }
        out
    }

    fn axis_slot(axis: Axis) -> usize {
        match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The face normal to `axis` at the given padded-array position.
    pub fn face(&self, axis: Axis, index: CellIndex) -> Option<&Face> {
        let n = Self::axis_slot(axis);
        linear(self.face_dims[n], index).map(|i| &self.faces[n][i])
    }

    /// The edge running along `axis` at the given padded-array position.
    pub fn edge(&self, axis: Axis, index: CellIndex) -> Option<&GridEdge> {
        let n = Self::axis_slot(axis);
        linear(self.edge_dims[n], index).map(|i| &self.edges[n][i])
    }

    /// The corner at the given position.
    pub fn corner(&self, index: CellIndex) -> Option<&Corner> {
        let s = self.size;
        linear([s[0] + 1, s[1] + 1, s[2] + 1], index).map(|i| &self.corners[i])
    }

    /// All faces across the three orientations.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().flatten()
    }

    /// All edges across the three orientations.
    pub fn edges(&self) -> impl Iterator<Item = &GridEdge> {
        self.edges.iter().flatten()
    }

    /// All corners.
    pub fn corners(&self) -> impl Iterator<Item = &Corner> {
        self.corners.iter()
    }

    /// Verify the padding invariant: each orientation's array dimensions
    /// equal the grid size plus one along the padded axes.
    pub fn dims_valid(&self) -> bool {
        let s = self.size;
        for n in 0..3 {
            let mut expected_face = s;
            expected_face[n] += 1;
            if self.face_dims[n] != expected_face {
                return false;
            }
            let mut expected_edge = [s[0] + 1, s[1] + 1, s[2] + 1];
            expected_edge[n] = s[n];
            if self.edge_dims[n] != expected_edge {
                return false;
            }
            let len = (self.face_dims[n][0] * self.face_dims[n][1] * self.face_dims[n][2]) as usize;
            if self.faces[n].len() != len {
                return false;
            }
            let len = (self.edge_dims[n][0] * self.edge_dims[n][1] * self.edge_dims[n][2]) as usize;
            if self.edges[n].len() != len {
                return false;
            }
        }
        self.corners.len() == ((s[0] + 1) * (s[1] + 1) * (s[2] + 1)) as usize
    }
}
