use thiserror::Error;

use crate::Vertex;

/// Errors raised by graph store lookups and path searches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V = Vertex> {
    /// A single vertex identifier is not present in the graph.
    #[error("No {0:?} vertex in graph")]
    MissingVertex(V),

    /// Both endpoints of an edge are absent.
    #[error("No {0:?} or {1:?} vertex in graph")]
    MissingVertices(V, V),

    /// A path search finished its traversal without ever reaching `goal`.
    #[error("{goal:?} is not reachable from {start:?}")]
    NotFound { start: V, goal: V },
}

impl<V> GraphError<V> {
    /// True for both the one-endpoint and the two-endpoint flavours.
    pub fn is_missing_vertex(&self) -> bool {
        matches!(
            self,
            GraphError::MissingVertex(_) | GraphError::MissingVertices(_, _)
        )
    }
}

pub type Result<T, V = Vertex> = std::result::Result<T, GraphError<V>>;
