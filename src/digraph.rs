use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roaring::RoaringBitmap;

use crate::error::{GraphError, Result};
use crate::Vertex;

/// A mutable, single-threaded directed graph.
///
/// Vertex identifiers are interned into dense `u32` indices in insertion
/// order.  The out-neighbours of every vertex are kept in a
/// [`RoaringBitmap`] of such indices, which gives set semantics for free:
/// adding an existing edge again is a no-op.
#[derive(Clone)]
pub struct DirectedGraph<V = Vertex> {
    labels: Vec<V>,
    indices: HashMap<V, u32>,
    adjacency: Vec<RoaringBitmap>,
}

impl<V: Debug> Debug for DirectedGraph<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges: Vec<(&V, &V)> = self.iter_edges().collect();
        write!(
            f,
            "DirectedGraph::from_edges_iter(vec!{:?}, vec!{:?})",
            self.labels, edges
        )?;
        Ok(())
    }
}

impl<V: Eq + Hash> PartialEq for DirectedGraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.adjacency == other.adjacency
    }
}

impl<V: Eq + Hash> Eq for DirectedGraph<V> {}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            indices: HashMap::new(),
            adjacency: Vec::new(),
        }
    }
}

impl<V> DirectedGraph<V> {
    /// Constructs a new graph without any vertices.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            labels: Vec::with_capacity(vertex_count),
            indices: HashMap::with_capacity(vertex_count),
            adjacency: Vec::with_capacity(vertex_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> u64 {
        self.adjacency.iter().map(RoaringBitmap::len).sum()
    }

    /// Iterates over vertices in the order they were first added.
    pub fn iter_vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.labels.iter()
    }

    /// Iterates over every edge `(from, to)`, grouped by `from`.
    pub fn iter_edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(u, neighbours)| {
                neighbours
                    .iter()
                    .map(move |v| (&self.labels[u], &self.labels[v as usize]))
            })
    }

    #[inline]
    pub(crate) fn label(&self, index: u32) -> &V {
        &self.labels[index as usize]
    }

    pub(crate) fn iter_neighbour_indices(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency[index as usize].iter()
    }
}

impl<V: Clone + Eq + Hash + Debug> DirectedGraph<V> {
    /// Constructs a graph from a sequence of vertices and a sequence of edges.
    ///
    /// Every endpoint of every edge has to be among `vertices`; the first edge
    /// that violates this fails the whole construction.
    pub fn from_edges_iter<I, E>(vertices: I, edges: E) -> Result<Self, V>
    where
        I: IntoIterator<Item = V>,
        E: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        graph.add_vertices(vertices);
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Panics if the graph already holds `u32::MAX` vertices.
    fn intern(&mut self, vertex: V) -> u32 {
        assert!(
            self.labels.len() < u32::MAX as usize,
            "a graph holds at most u32::MAX vertices"
        );
        let index = self.labels.len() as u32;
        self.indices.insert(vertex.clone(), index);
        self.labels.push(vertex);
        self.adjacency.push(RoaringBitmap::new());
        index
    }

    /// Adds `vertex` with no out-neighbours.
    ///
    /// Adding a vertex that is already present clears its out-neighbours.
    /// Edges pointing *to* it are left alone.
    pub fn add_vertex(&mut self, vertex: V) {
        match self.indices.get(&vertex) {
            Some(&index) => self.adjacency[index as usize].clear(),
            None => {
                self.intern(vertex);
            }
        }
    }

    /// Like [`Self::add_vertex`] but keeps the edges of a vertex that is
    /// already present.
    pub fn ensure_vertex(&mut self, vertex: V) {
        self.ensure_index(vertex);
    }

    pub(crate) fn ensure_index(&mut self, vertex: V) -> u32 {
        match self.indices.get(&vertex) {
            Some(&index) => index,
            None => self.intern(vertex),
        }
    }

    pub fn add_vertices<I: IntoIterator<Item = V>>(&mut self, vertices: I) {
        for vertex in vertices {
            self.add_vertex(vertex);
        }
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.indices.contains_key(vertex)
    }

    pub(crate) fn index_of(&self, vertex: &V) -> Result<u32, V> {
        self.indices
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))
    }

    /// Adds the directed edge `from -> to`.  Both endpoints must already be
    /// vertices of the graph.
    pub fn add_edge(&mut self, from: V, to: V) -> Result<(), V> {
        let (u, v) = match (self.indices.get(&from), self.indices.get(&to)) {
            (Some(&u), Some(&v)) => (u, v),
            (None, None) => return Err(GraphError::MissingVertices(from, to)),
            (None, Some(_)) => return Err(GraphError::MissingVertex(from)),
            (Some(_), None) => return Err(GraphError::MissingVertex(to)),
        };
        self.adjacency[u as usize].insert(v);
        Ok(())
    }

    /// Adds the directed edge `from -> to`, registering whichever endpoint is
    /// not a vertex yet.  Existing edges of either endpoint are kept.
    pub fn ensure_edge(&mut self, from: V, to: V) {
        let u = self.ensure_index(from);
        let v = self.ensure_index(to);
        self.adjacency[u as usize].insert(v);
    }

    /// Adds `from -> to` for each `to` in order.  Stops at the first missing
    /// vertex; edges added before that point stay in the graph.
    pub fn add_edges<I: IntoIterator<Item = V>>(&mut self, from: V, tos: I) -> Result<(), V> {
        for to in tos {
            self.add_edge(from.clone(), to)?;
        }
        Ok(())
    }

    pub fn get_edge(&self, from: &V, to: &V) -> bool {
        match (self.indices.get(from), self.indices.get(to)) {
            (Some(&u), Some(&v)) => self.adjacency[u as usize].contains(v),
            _ => false,
        }
    }

    /// Returns the out-neighbour set of `vertex`.
    pub fn get_neighbors(&self, vertex: &V) -> Result<HashSet<V>, V> {
        Ok(self.iter_neighbours(vertex)?.cloned().collect())
    }

    /// Iterates over the out-neighbours of `vertex`.  The order is stable for
    /// a given graph but carries no meaning.
    pub fn iter_neighbours(&self, vertex: &V) -> Result<impl Iterator<Item = &V> + '_, V> {
        let u = self.index_of(vertex)?;
        Ok(self.iter_neighbour_indices(u).map(move |v| self.label(v)))
    }
}

/// Generates a DAG on vertices `0..vertex_count` where every forward pair
/// `(u, v)`, `u < v`, is an edge with probability `edge_probability`.
///
/// Panics unless `0.0 <= edge_probability <= 1.0`.
pub fn random_dag<R: Rng>(
    rng: &mut R,
    vertex_count: u32,
    edge_probability: f64,
) -> DirectedGraph<Vertex> {
    let mut graph = DirectedGraph::with_capacity(vertex_count as usize);
    graph.add_vertices((0..vertex_count).map(Vertex::from));
    for u in 0..vertex_count {
        for v in u + 1..vertex_count {
            if rng.gen_bool(edge_probability) {
                graph.adjacency[u as usize].insert(v);
            }
        }
    }
    graph
}

/// Generates a directed graph on vertices `0..vertex_count` where every pair
/// `(u, v)`, `u != v`, is an edge with probability `edge_probability`.  The
/// result may well contain cycles.
///
/// Panics unless `0.0 <= edge_probability <= 1.0`.
pub fn random_digraph<R: Rng>(
    rng: &mut R,
    vertex_count: u32,
    edge_probability: f64,
) -> DirectedGraph<Vertex> {
    let mut graph = DirectedGraph::with_capacity(vertex_count as usize);
    graph.add_vertices((0..vertex_count).map(Vertex::from));
    for u in 0..vertex_count {
        for v in (0..vertex_count).filter(|v| *v != u) {
            if rng.gen_bool(edge_probability) {
                graph.adjacency[u as usize].insert(v);
            }
        }
    }
    graph
}

pub fn arb_dag(vertex_count: impl Into<Range<u32>>) -> BoxedStrategy<DirectedGraph<Vertex>> {
    (vertex_count.into(), any::<u64>())
        .prop_map(|(vertex_count, seed)| {
            random_dag(&mut StdRng::seed_from_u64(seed), vertex_count, 0.3)
        })
        .boxed()
}

pub fn arb_digraph(vertex_count: impl Into<Range<u32>>) -> BoxedStrategy<DirectedGraph<Vertex>> {
    (vertex_count.into(), any::<u64>())
        .prop_map(|(vertex_count, seed)| {
            random_digraph(&mut StdRng::seed_from_u64(seed), vertex_count, 0.2)
        })
        .boxed()
}
