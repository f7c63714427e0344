//! Directed graphs whose out-neighbour sets are [roaring
//! bitmaps](https://roaringbitmap.org/), together with the classic
//! breadth-first and depth-first traversals, path searches and an
//! "earliest ancestor" resolver built on top of them.
//!
//! Vertices are arbitrary `Clone + Eq + Hash + Debug` identifiers.  They are
//! interned into dense `u32` indices on insertion so that every neighbour set
//! and every visited set is just a bitmap.
//!
//! ## Anti-features
//!
//! * No support for storing anything in the vertices.
//! * No weighted edges.
//! * No serde impls.  Serialize the list of edges from
//!   [`DirectedGraph::iter_edges`] with a library of your choosing.
//!
//! # Entry points
//!
//! See [`DirectedGraph::from_edges_iter`] to build a graph, the traversal
//! methods in [`traversal`], the searches in [`path`] and
//! [`earliest_ancestor`].

pub mod ancestor;
pub mod digraph;
pub mod error;
pub mod path;
pub mod traversal;

/// The default vertex identifier.  Signed so that [`NO_ANCESTOR`] fits.
pub type Vertex = i64;

pub use ancestor::{earliest_ancestor, NO_ANCESTOR};
pub use digraph::{arb_dag, arb_digraph, random_dag, random_digraph, DirectedGraph};
pub use error::{GraphError, Result};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::HashMap;

    use crate::{DirectedGraph, Vertex};

    /// 1 -> 2, 2 -> {3, 4}, 3 -> 5, 4 -> {6, 7}, 5 -> 3, 6 -> 3, 7 -> {1, 6}
    pub(crate) fn seven_vertex_graph() -> DirectedGraph<Vertex> {
        DirectedGraph::from_edges_iter(
            1..=7,
            vec![
                (5, 3),
                (6, 3),
                (7, 1),
                (4, 7),
                (1, 2),
                (7, 6),
                (2, 4),
                (3, 5),
                (2, 3),
                (4, 6),
            ],
        )
        .unwrap()
    }

    /// Depth-first orders of [`seven_vertex_graph`] from vertex 1 that are
    /// valid for some order of siblings.
    pub(crate) fn valid_dfs_orders() -> Vec<Vec<Vertex>> {
        vec![
            vec![1, 2, 3, 5, 4, 6, 7],
            vec![1, 2, 3, 5, 4, 7, 6],
            vec![1, 2, 4, 7, 6, 3, 5],
            vec![1, 2, 4, 6, 3, 5, 7],
        ]
    }

    /// Edge distance from `start` of every reachable vertex, computed one
    /// frontier at a time.
    pub(crate) fn levels(graph: &DirectedGraph, start: Vertex) -> HashMap<Vertex, usize> {
        let mut levels = HashMap::from([(start, 0)]);
        let mut frontier = vec![start];
        let mut depth = 0;
        while !frontier.is_empty() {
            depth += 1;
            let mut next = Vec::new();
            for u in frontier {
                for v in graph.iter_neighbours(&u).unwrap() {
                    if !levels.contains_key(v) {
                        levels.insert(*v, depth);
                        next.push(*v);
                    }
                }
            }
            frontier = next;
        }
        levels
    }
}
