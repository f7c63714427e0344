//! Earliest-ancestor resolution over `(parent, child)` pairs.

use tracing::{debug, instrument, trace};

use crate::digraph::DirectedGraph;
use crate::Vertex;

/// Returned by [`earliest_ancestor`] when the starting vertex has no parents.
pub const NO_ANCESTOR: Vertex = -1;

/// Finds the ancestor of `starting_node` that is farthest away from it.
///
/// `ancestors` lists `(parent, child)` pairs.  Every chain of parents starting
/// at `starting_node` is enumerated; among the vertices that end a longest
/// chain the lowest identifier wins.  A starting node without any parent,
/// including one that does not occur in `ancestors` at all, yields
/// [`NO_ANCESTOR`].
///
/// Enumeration is exhaustive, so the cost grows with the number of distinct
/// chains, not with the number of vertices.  A chain is never extended back to
/// a vertex it already contains.
#[instrument(level = "debug", skip(ancestors), fields(pair_count = ancestors.len()))]
pub fn earliest_ancestor(ancestors: &[(Vertex, Vertex)], starting_node: Vertex) -> Vertex {
    // Edges point from a child to its parents.
    let mut graph: DirectedGraph<Vertex> = DirectedGraph::with_capacity(ancestors.len() + 1);
    for &(parent, child) in ancestors {
        graph.ensure_edge(child, parent);
    }
    let start = graph.ensure_index(starting_node);

    let mut best_distance = 1;
    let mut best_ancestor = NO_ANCESTOR;
    let mut routes: Vec<Vec<u32>> = vec![vec![start]];
    while let Some(route) = routes.pop() {
        let visiting = route[route.len() - 1];

        let mut extended = false;
        for parent in graph.iter_neighbour_indices(visiting) {
            if route.contains(&parent) {
                cov_mark::hit!(ancestor_chain_cycle_cut);
                trace!(vertex = *graph.label(parent), "ancestor chain would loop");
                continue;
            }
            let mut longer = route.clone();
            longer.push(parent);
            routes.push(longer);
            extended = true;
        }
        if extended {
            continue;
        }

        let candidate = *graph.label(visiting);
        if route.len() > best_distance {
            best_distance = route.len();
            best_ancestor = candidate;
        } else if route.len() == best_distance && best_distance > 1 {
            cov_mark::hit!(ancestor_tie_goes_to_lowest_id);
            best_ancestor = best_ancestor.min(candidate);
        }
    }

    debug!(
        ancestor = best_ancestor,
        distance = best_distance,
        "resolved earliest ancestor"
    );
    best_ancestor
}
