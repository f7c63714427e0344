//! Path searches between two vertices.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use roaring::RoaringBitmap;
use tracing::trace;

use crate::digraph::DirectedGraph;
use crate::error::{GraphError, Result};

impl<V: Clone + Eq + Hash + Debug> DirectedGraph<V> {
    /// Returns a path from `start` to `goal` with the fewest edges, or `None`
    /// if `goal` cannot be reached (which includes `goal` not being a vertex).
    ///
    /// Partial paths are explored in order of non-decreasing length, so the
    /// first one ending at `goal` is a shortest one.  A partial path whose last
    /// vertex was already expanded through an earlier, no longer path is
    /// dropped, which keeps the search finite on cyclic graphs.
    pub fn shortest_path(&self, start: &V, goal: &V) -> Result<Option<Vec<V>>, V> {
        let start = self.index_of(start)?;
        let goal = match self.index_of(goal) {
            Ok(goal) => goal,
            Err(_) => return Ok(None),
        };

        let mut expanded = RoaringBitmap::new();
        let mut to_visit: VecDeque<Vec<u32>> = VecDeque::from([vec![start]]);
        while let Some(path) = to_visit.pop_front() {
            let tail = path[path.len() - 1];
            if tail == goal {
                return Ok(Some(path.into_iter().map(|u| self.label(u).clone()).collect()));
            }
            if !expanded.insert(tail) {
                cov_mark::hit!(shortest_path_skips_expanded_tail);
                trace!(vertex = ?self.label(tail), "shortest path: tail already expanded");
                continue;
            }
            for v in self.iter_neighbour_indices(tail) {
                let mut extended = path.clone();
                extended.push(v);
                to_visit.push_back(extended);
            }
        }
        Ok(None)
    }

    /// Returns the depth-first visitation order from `start`, cut right after
    /// `goal`.
    ///
    /// The result always starts at `start` and ends at `goal`, but it is a
    /// visitation trace: consecutive entries are not guaranteed to be joined
    /// by an edge once the traversal has backtracked.
    pub fn any_path(&self, start: &V, goal: &V) -> Result<Vec<V>, V> {
        let visits = self.depth_first_order(start)?;
        cut_after_goal(visits, start, goal)
    }

    /// Same as [`Self::any_path`] but derived from
    /// [`Self::depth_first_order_recursive`].
    pub fn any_path_recursive(&self, start: &V, goal: &V) -> Result<Vec<V>, V> {
        let visits = self.depth_first_order_recursive(start)?;
        cut_after_goal(visits, start, goal)
    }
}

fn cut_after_goal<V: Clone + PartialEq + Debug>(
    mut visits: Vec<V>,
    start: &V,
    goal: &V,
) -> Result<Vec<V>, V> {
    match visits.iter().position(|v| v == goal) {
        Some(end) => {
            visits.truncate(end + 1);
            Ok(visits)
        }
        None => Err(GraphError::NotFound {
            start: start.clone(),
            goal: goal.clone(),
        }),
    }
}
