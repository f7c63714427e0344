//! Breadth-first and depth-first visitation orders.
//!
//! Every traversal reports each reachable vertex exactly once, at its first
//! visit.  Siblings come out in whatever order the neighbour sets yield them,
//! so callers should not rely on a particular order among them.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use roaring::RoaringBitmap;
use tracing::trace;

use crate::digraph::DirectedGraph;
use crate::error::Result;

/// Visited vertices together with the order of their first visit.
#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    seen: RoaringBitmap,
    order: Vec<u32>,
}

impl VisitedSet {
    /// Returns `true` if `u` was not visited before.
    pub(crate) fn insert(&mut self, u: u32) -> bool {
        let fresh = self.seen.insert(u);
        if fresh {
            self.order.push(u);
        }
        fresh
    }

    pub(crate) fn iter_in_visit_order(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }
}

/// See [`DirectedGraph::iter_vertices_bfs`].
pub struct BfsVerticesIterator<'a, V> {
    graph: &'a DirectedGraph<V>,
    visited: RoaringBitmap,
    to_visit: VecDeque<u32>,
}

impl<'a, V: Debug> Iterator for BfsVerticesIterator<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop_front() {
            if !self.visited.insert(u) {
                cov_mark::hit!(bfs_skips_revisited_vertex);
                trace!(vertex = ?self.graph.label(u), "bfs: already visited");
                continue;
            }
            self.to_visit.extend(self.graph.iter_neighbour_indices(u));
            return Some(self.graph.label(u));
        }
        None
    }
}

/// See [`DirectedGraph::iter_vertices_dfs`].
pub struct DfsVerticesIterator<'a, V> {
    graph: &'a DirectedGraph<V>,
    visited: RoaringBitmap,
    to_visit: Vec<u32>,
}

impl<'a, V: Debug> Iterator for DfsVerticesIterator<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop() {
            if !self.visited.insert(u) {
                cov_mark::hit!(dfs_skips_revisited_vertex);
                trace!(vertex = ?self.graph.label(u), "dfs: already visited");
                continue;
            }
            self.to_visit.extend(self.graph.iter_neighbour_indices(u));
            return Some(self.graph.label(u));
        }
        None
    }
}

impl<V: Clone + Eq + Hash + Debug> DirectedGraph<V> {
    /// Visit all vertices reachable from `start` in a breadth-first-search
    /// (BFS) order.
    ///
    /// All neighbours of a visited vertex are queued, including ones that were
    /// seen already; those are dropped when they reach the front of the queue.
    pub fn iter_vertices_bfs(&self, start: &V) -> Result<BfsVerticesIterator<'_, V>, V> {
        let start = self.index_of(start)?;
        Ok(BfsVerticesIterator {
            graph: self,
            visited: RoaringBitmap::new(),
            to_visit: vec![start].into(),
        })
    }

    /// Visit all vertices reachable from `start` in a depth-first-search
    /// (DFS) order.  Neighbours pushed last are visited first.
    pub fn iter_vertices_dfs(&self, start: &V) -> Result<DfsVerticesIterator<'_, V>, V> {
        let start = self.index_of(start)?;
        Ok(DfsVerticesIterator {
            graph: self,
            visited: RoaringBitmap::new(),
            to_visit: vec![start],
        })
    }

    pub fn breadth_first_order(&self, start: &V) -> Result<Vec<V>, V> {
        Ok(self.iter_vertices_bfs(start)?.cloned().collect())
    }

    pub fn depth_first_order(&self, start: &V) -> Result<Vec<V>, V> {
        Ok(self.iter_vertices_dfs(start)?.cloned().collect())
    }

    /// Depth-first order in recursive (pre-order) form: a vertex is reported,
    /// then each of its unvisited neighbours is explored completely before the
    /// next neighbour is looked at.
    ///
    /// Unlike [`Self::depth_first_order`], siblings come out in neighbour
    /// order rather than reversed.  The nesting lives on the heap, so chain
    /// length is not limited by the thread's stack.
    pub fn depth_first_order_recursive(&self, start: &V) -> Result<Vec<V>, V> {
        let mut order = Vec::new();
        self.extend_with_depth_first_recursive(start, &mut order)?;
        Ok(order)
    }

    /// Appends the recursive depth-first order from `start` to `order`.
    /// Nothing is appended when `start` is absent.
    pub fn extend_with_depth_first_recursive(&self, start: &V, order: &mut Vec<V>) -> Result<(), V> {
        let start = self.index_of(start)?;
        let mut visited = VisitedSet::default();
        visited.insert(start);
        self.visit_nested(start, &mut visited);
        order.extend(visited.iter_in_visit_order().map(|u| self.label(u).clone()));
        Ok(())
    }

    /// One frame per vertex being explored, holding the neighbours it has
    /// yet to look at.
    fn visit_nested(&self, start: u32, visited: &mut VisitedSet) {
        let mut frames = vec![self.iter_neighbour_indices(start)];
        while let Some(frame) = frames.last_mut() {
            match frame.next() {
                Some(v) => {
                    if visited.insert(v) {
                        frames.push(self.iter_neighbour_indices(v));
                    }
                }
                None => {
                    frames.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::error::GraphError;
    use crate::fixtures::{levels, seven_vertex_graph, valid_dfs_orders};
    use crate::{arb_dag, arb_digraph, DirectedGraph, Vertex};

    fn valid_bfs_orders() -> Vec<Vec<Vertex>> {
        vec![
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![1, 2, 3, 4, 5, 7, 6],
            vec![1, 2, 3, 4, 6, 7, 5],
            vec![1, 2, 3, 4, 6, 5, 7],
            vec![1, 2, 3, 4, 7, 6, 5],
            vec![1, 2, 3, 4, 7, 5, 6],
            vec![1, 2, 4, 3, 5, 6, 7],
            vec![1, 2, 4, 3, 5, 7, 6],
            vec![1, 2, 4, 3, 6, 7, 5],
            vec![1, 2, 4, 3, 6, 5, 7],
            vec![1, 2, 4, 3, 7, 6, 5],
            vec![1, 2, 4, 3, 7, 5, 6],
        ]
    }

    #[test]
    fn seven_vertex_bfs() {
        let graph = seven_vertex_graph();
        cov_mark::check!(bfs_skips_revisited_vertex);
        let order = graph.breadth_first_order(&1).unwrap();
        assert!(valid_bfs_orders().contains(&order), "{:?}", order);
    }

    #[test]
    fn seven_vertex_dfs() {
        let graph = seven_vertex_graph();
        cov_mark::check!(dfs_skips_revisited_vertex);
        let order = graph.depth_first_order(&1).unwrap();
        assert!(valid_dfs_orders().contains(&order), "{:?}", order);
    }

    #[test]
    fn seven_vertex_dfs_recursive() {
        let graph = seven_vertex_graph();
        let order = graph.depth_first_order_recursive(&1).unwrap();
        assert!(valid_dfs_orders().contains(&order), "{:?}", order);
    }

    #[test]
    fn recursive_dfs_survives_a_long_chain() {
        let length: Vertex = 200_000;
        let graph =
            DirectedGraph::from_edges_iter(0..length, (1..length).map(|v| (v - 1, v))).unwrap();
        let order = graph.depth_first_order_recursive(&0).unwrap();
        assert_eq!(order, (0..length).collect::<Vec<Vertex>>());
        assert_eq!(graph.any_path_recursive(&0, &(length - 1)).unwrap().len(), length as usize);
    }

    #[test]
    fn recursive_dfs_explores_a_neighbour_fully_before_the_next() {
        // 1 -> {2, 3}, 2 -> 4: the subtree under the first neighbour visited
        // is finished before the second neighbour appears.
        let graph =
            DirectedGraph::from_edges_iter(1..=4, vec![(1, 2), (1, 3), (2, 4)]).unwrap();
        let order = graph.depth_first_order_recursive(&1).unwrap();
        assert!(
            order == vec![1, 2, 4, 3] || order == vec![1, 3, 2, 4],
            "{:?}",
            order
        );
    }

    #[test]
    fn recursive_dfs_appends_to_the_callers_sequence() {
        let graph = seven_vertex_graph();
        let mut order = vec![100];
        graph.extend_with_depth_first_recursive(&5, &mut order).unwrap();
        assert_eq!(order, vec![100, 5, 3]);
    }

    #[test]
    fn isolated_start_visits_only_itself() {
        let graph = DirectedGraph::from_edges_iter(vec![1, 2], vec![(2, 1)]).unwrap();
        assert_eq!(graph.breadth_first_order(&1).unwrap(), vec![1]);
        assert_eq!(graph.depth_first_order(&1).unwrap(), vec![1]);
        assert_eq!(graph.depth_first_order_recursive(&1).unwrap(), vec![1]);
    }

    #[test]
    fn traversals_from_a_missing_start_fail() {
        let graph = seven_vertex_graph();
        assert_eq!(
            graph.breadth_first_order(&8),
            Err(GraphError::MissingVertex(8))
        );
        assert_eq!(
            graph.depth_first_order(&8),
            Err(GraphError::MissingVertex(8))
        );
        let mut order = Vec::new();
        assert_eq!(
            graph.extend_with_depth_first_recursive(&8, &mut order),
            Err(GraphError::MissingVertex(8))
        );
        assert!(order.is_empty());
    }

    proptest! {
        #[test]
        fn traversals_equal_modulo_order(graph in arb_digraph(1..25)) {
            let bfs = graph.breadth_first_order(&0).unwrap();
            let dfs = graph.depth_first_order(&0).unwrap();
            let dfs_recursive = graph.depth_first_order_recursive(&0).unwrap();
            prop_assert_eq!(bfs[0], 0);
            prop_assert_eq!(dfs[0], 0);
            prop_assert_eq!(dfs_recursive[0], 0);

            let reachable: HashSet<Vertex> = levels(&graph, 0).into_keys().collect();
            for order in [&bfs, &dfs, &dfs_recursive] {
                let visited: HashSet<Vertex> = order.iter().copied().collect();
                prop_assert_eq!(visited.len(), order.len());
                prop_assert_eq!(&visited, &reachable);
            }
        }

        #[test]
        fn bfs_never_visits_a_farther_vertex_first(graph in arb_digraph(1..25)) {
            let levels = levels(&graph, 0);
            let bfs = graph.breadth_first_order(&0).unwrap();
            for pair in bfs.windows(2) {
                prop_assert!(levels[&pair[0]] <= levels[&pair[1]]);
            }
        }

        #[test]
        fn every_visit_is_discovered_by_an_earlier_one(dag in arb_dag(1..25)) {
            for order in [
                dag.breadth_first_order(&0).unwrap(),
                dag.depth_first_order(&0).unwrap(),
                dag.depth_first_order_recursive(&0).unwrap(),
            ] {
                for (position, vertex) in order.iter().enumerate().skip(1) {
                    prop_assert!(order[..position].iter().any(|u| dag.get_edge(u, vertex)));
                }
            }
        }
    }
}
