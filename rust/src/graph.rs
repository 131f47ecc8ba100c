//! Weighted directed graph over dense vertex ids.

use pyo3::prelude::*;
use thiserror::Error;

/// Dense vertex identifier in `[0, n)`.
pub type VertexId = usize;

/// Edge weight as supplied by the caller. Distances accumulate in `i64`.
pub type Weight = i32;

/// Errors raised by checked graph construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
}

/// Outgoing edge stored in an adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: Weight,
}

/// Directed graph with per-vertex edge lists kept in insertion order.
///
/// Insertion order matters: it decides which original edge survives when the
/// condensation collapses parallel component pairs.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Append edge `u -> v` with weight `w`.
    ///
    /// # Panics
    /// If either endpoint is outside `[0, n)`. Use [`Graph::try_add_edge`] for
    /// input that has not been validated.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, w: Weight) {
        if let Err(e) = self.try_add_edge(u, v, w) {
            panic!("{e}");
        }
    }

    /// Append edge `u -> v`, rejecting out-of-range endpoints.
    pub fn try_add_edge(&mut self, u: VertexId, v: VertexId, w: Weight) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        for vertex in [u, v] {
            if vertex >= vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }
        self.adjacency[u].push(Edge { to: v, weight: w });
        self.edge_count += 1;
        Ok(())
    }

    /// Outgoing edges of `v` in insertion order.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[Edge] {
        &self.adjacency[v]
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of incoming edges per vertex.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0usize; self.vertex_count()];
        for edges in &self.adjacency {
            for edge in edges {
                in_degree[edge.to] += 1;
            }
        }
        in_degree
    }
}

#[pymethods]
impl Graph {
    #[new]
    fn py_new(vertex_count: usize) -> Self {
        Self::new(vertex_count)
    }

    /// Add a directed edge; raises IndexError for out-of-range endpoints.
    #[pyo3(name = "add_edge")]
    fn py_add_edge(&mut self, u: VertexId, v: VertexId, w: Weight) -> PyResult<()> {
        self.try_add_edge(u, v, w)
            .map_err(|e| pyo3::exceptions::PyIndexError::new_err(e.to_string()))
    }

    /// Outgoing `(target, weight)` pairs of a vertex.
    #[pyo3(name = "neighbors")]
    fn py_neighbors(&self, v: VertexId) -> PyResult<Vec<(VertexId, Weight)>> {
        let edges = self.adjacency.get(v).ok_or_else(|| {
            pyo3::exceptions::PyIndexError::new_err(
                GraphError::VertexOutOfRange {
                    vertex: v,
                    vertex_count: self.vertex_count(),
                }
                .to_string(),
            )
        })?;
        Ok(edges.iter().map(|e| (e.to, e.weight)).collect())
    }

    #[getter]
    fn n(&self) -> usize {
        self.vertex_count()
    }

    #[getter]
    fn num_edges(&self) -> usize {
        self.edge_count
    }

    fn __repr__(&self) -> String {
        format!(
            "Graph(vertices={}, edges={})",
            self.vertex_count(),
            self.edge_count
        )
    }
}
