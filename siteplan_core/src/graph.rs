// Undirected adjacency graph over grid cells.
//
// Built on demand from a filtered slice of the grid's stored ground
// adjacency edges (see `VoxelGrid::edges_by_categories`). Vertices are
// deduplicated by cell index through an `FxHashMap`; edges are stored in
// both directions in `Vec`-indexed adjacency lists for O(1) lookup.
// Parallel edges are permitted — they are pointless under uniform weights
// but must not break the router, so nothing deduplicates them.
//
// See `router.rs` for the shortest-path computation over this graph.

use crate::types::CellIndex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Compact identifier for a graph vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// A vertex — one grid cell that participates in at least one edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphVertex {
    pub id: VertexId,
    pub index: CellIndex,
    /// Indices into `AdjacencyGraph::edges` for edges leaving this vertex.
    pub edge_indices: Vec<usize>,
}

/// One direction of an undirected edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: VertexId,
    pub to: VertexId,
}

/// The adjacency graph container.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyGraph {
    vertices: Vec<GraphVertex>,
    edges: Vec<GraphEdge>,
    by_index: FxHashMap<CellIndex, VertexId>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an undirected edge list of cell index pairs.
    pub fn from_edges(edges: &[(CellIndex, CellIndex)]) -> Self {
        let mut graph = Self::new();
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Intern a cell index as a vertex, returning the existing ID if the
    /// index is already known.
    pub fn add_vertex(&mut self, index: CellIndex) -> VertexId {
        if let Some(&id) = self.by_index.get(&index) {
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(GraphVertex {
            id,
            index,
            edge_indices: Vec::new(),
        });
        self.by_index.insert(index, id);
        id
    }

    /// Add an undirected edge, interning both endpoints. Stored as two
    /// directed half-edges.
    pub fn add_edge(&mut self, a: CellIndex, b: CellIndex) {
        let va = self.add_vertex(a);
        let vb = self.add_vertex(b);

        let forward = self.edges.len();
        self.edges.push(GraphEdge { from: va, to: vb });
        let reverse = self.edges.len();
        self.edges.push(GraphEdge { from: vb, to: va });

        self.vertices[va.0 as usize].edge_indices.push(forward);
        self.vertices[vb.0 as usize].edge_indices.push(reverse);
    }

    /// Look up the vertex for a cell index, if the cell is in the graph.
    pub fn vertex_id(&self, index: CellIndex) -> Option<VertexId> {
        self.by_index.get(&index).copied()
    }

    /// The cell index behind a vertex.
    pub fn index_of(&self, id: VertexId) -> CellIndex {
        self.vertices[id.0 as usize].index
    }

    /// Half-edge indices leaving a vertex.
    pub fn neighbors(&self, id: VertexId) -> &[usize] {
        &self.vertices[id.0 as usize].edge_indices
    }

    /// A half-edge by index.
    pub fn edge(&self, idx: usize) -> &GraphEdge {
        &self.edges[idx]
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_are_interned_once() {
        let mut graph = AdjacencyGraph::new();
        let a = graph.add_vertex(CellIndex::new(0, 0, 0));
        let b = graph.add_vertex(CellIndex::new(1, 0, 0));
        let a_again = graph.add_vertex(CellIndex::new(0, 0, 0));
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn edges_are_bidirectional() {
        let mut graph = AdjacencyGraph::new();
        let a = CellIndex::new(0, 0, 0);
        let b = CellIndex::new(1, 0, 0);
        graph.add_edge(a, b);

        let va = graph.vertex_id(a).unwrap();
        let vb = graph.vertex_id(b).unwrap();
        let a_out: Vec<_> = graph
            .neighbors(va)
            .iter()
            .map(|&i| graph.edge(i).to)
            .collect();
        assert_eq!(a_out, vec![vb]);
        let b_out: Vec<_> = graph
            .neighbors(vb)
            .iter()
            .map(|&i| graph.edge(i).to)
            .collect();
        assert_eq!(b_out, vec![va]);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let a = CellIndex::new(0, 0, 0);
        let b = CellIndex::new(1, 0, 0);
        let graph = AdjacencyGraph::from_edges(&[(a, b), (a, b)]);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.neighbors(graph.vertex_id(a).unwrap()).len(), 2);
    }

    #[test]
    fn from_edges_builds_the_whole_list() {
        let edges: Vec<_> = (0..4)
            .map(|x| (CellIndex::new(x, 0, 0), CellIndex::new(x + 1, 0, 0)))
            .collect();
        let graph = AdjacencyGraph::from_edges(&edges);
        assert_eq!(graph.vertex_count(), 5);
        // Interior vertices have two half-edges each.
        let mid = graph.vertex_id(CellIndex::new(2, 0, 0)).unwrap();
        assert_eq!(graph.neighbors(mid).len(), 2);
    }

    #[test]
    fn unknown_index_has_no_vertex() {
        let graph = AdjacencyGraph::new();
        assert_eq!(graph.vertex_id(CellIndex::new(9, 0, 9)), None);
    }
}
