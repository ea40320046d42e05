// Single-source shortest paths over the adjacency graph.
//
// Standard Dijkstra relaxation with a `BinaryHeap` min-heap (reversed
// ordering via `Reverse`). Every adjacency edge has uniform unit weight,
// so distances are hop counts; `u32::MAX` marks unreachable vertices.
// Distance and predecessor labels are stored in `Vec`s indexed by
// `VertexId` for O(1) access and deterministic behavior.
//
// The router borrows its graph, so labels can never outlive or cross
// graphs. It caches the source of the last computation; `shortest_path`
// recomputes automatically when asked about a different source.
//
// A query between disconnected vertices yields an *empty* path, not an
// error — callers treat empty as "no route" (see `session.rs` for where
// that contract matters).

use crate::graph::{AdjacencyGraph, VertexId};
use crate::types::CellIndex;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Distance label for unreachable vertices.
const UNREACHED: u32 = u32::MAX;

/// Shortest-path state over one graph.
pub struct Router<'g> {
    graph: &'g AdjacencyGraph,
    dist: Vec<u32>,
    prev: Vec<Option<VertexId>>,
    source: Option<VertexId>,
}

impl<'g> Router<'g> {
    pub fn new(graph: &'g AdjacencyGraph) -> Self {
        Self {
            graph,
            dist: Vec::new(),
            prev: Vec::new(),
            source: None,
        }
    }

    /// Run Dijkstra from `source`, labeling every reachable vertex with
    /// its hop distance and predecessor. Returns `false` (leaving previous
    /// labels untouched) if `source` is not a vertex of the graph.
    pub fn compute_from_source(&mut self, source: CellIndex) -> bool {
        let Some(start) = self.graph.vertex_id(source) else {
            return false;
        };

        let n = self.graph.vertex_count();
        self.dist = vec![UNREACHED; n];
        self.prev = vec![None; n];
        self.source = Some(start);

        self.dist[start.0 as usize] = 0;
        let mut open: BinaryHeap<Reverse<(u32, u32)>> = BinaryHeap::new();
        open.push(Reverse((0, start.0)));

        while let Some(Reverse((d, v))) = open.pop() {
            if d > self.dist[v as usize] {
                continue; // stale heap entry
            }
            for &edge_idx in self.graph.neighbors(VertexId(v)) {
                let next = self.graph.edge(edge_idx).to;
                let ni = next.0 as usize;
                let candidate = d + 1;
                if candidate < self.dist[ni] {
                    self.dist[ni] = candidate;
                    self.prev[ni] = Some(VertexId(v));
                    open.push(Reverse((candidate, next.0)));
                }
            }
        }
        true
    }

    /// The cached hop distance from the last computed source to `index`.
    /// `None` before any computation, for cells outside the graph, and for
    /// unreachable vertices.
    pub fn vertex_distance(&self, index: CellIndex) -> Option<u32> {
        self.source?;
        let v = self.graph.vertex_id(index)?;
        let d = self.dist[v.0 as usize];
        (d != UNREACHED).then_some(d)
    }

    /// Shortest path from `a` to `b` as an ordered cell sequence,
    /// inclusive of both endpoints. Recomputes labels if the cached source
    /// differs from `a`. Empty when either endpoint is outside the graph
    /// or `b` is unreachable; `[a]` when the endpoints coincide.
    pub fn shortest_path(&mut self, a: CellIndex, b: CellIndex) -> Vec<CellIndex> {
        let cached = self.source.map(|s| self.graph.index_of(s));
        if cached != Some(a) && !self.compute_from_source(a) {
            return Vec::new();
        }
        let Some(goal) = self.graph.vertex_id(b) else {
            return Vec::new();
        };
        if self.dist[goal.0 as usize] == UNREACHED {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = goal;
        loop {
            path.push(self.graph.index_of(current));
            match self.prev[current.0 as usize] {
                Some(previous) => current = previous,
                None => break,
            }
        }
        path.reverse();
        path
    }
}
