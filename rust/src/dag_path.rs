//! Shortest and longest paths over a DAG via dynamic programming in
//! topological order.
//!
//! Distances accumulate in `i64` while edge weights are `i32`. A simple path
//! has at most `n - 1` edges, so any reachable distance lies within
//! `±(n - 1) * 2^31`, which fits comfortably for every graph with fewer than
//! `2^32` vertices. Unreachable vertices are tagged rather than encoded as a
//! large sentinel, so no addition is ever performed on them.

use thiserror::Error;

use crate::graph::{Graph, VertexId};
use crate::metrics::Metrics;
use crate::topo::{topological_sort, TopoError};

/// Error types for DAG path computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path computation requires an acyclic graph: {0}")]
    CycleDetected(#[from] TopoError),
    #[error("Source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
}

/// Accumulated path weight, or the absence of any path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distance {
    Finite(i64),
    Unreachable,
}

impl Distance {
    pub fn finite(self) -> Option<i64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Unreachable => write!(f, "UNREACHABLE"),
        }
    }
}

/// Single-source shortest distances with predecessor links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source: VertexId,
    pub distances: Vec<Distance>,
    pub predecessors: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    pub fn distance(&self, v: VertexId) -> Distance {
        self.distances[v]
    }

    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distances.get(v).is_some_and(|d| d.is_finite())
    }

    /// Vertex sequence from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(target) {
            return None;
        }
        Some(reconstruct_path(&self.predecessors, target))
    }
}

/// Maximum-weight path through a DAG.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LongestPath {
    /// Vertices from a zero in-degree start to the endpoint.
    pub path: Vec<VertexId>,
    pub length: i64,
    /// Best value per vertex from the topological-order pass.
    pub distances: Vec<Distance>,
}

fn reconstruct_path(predecessors: &[Option<VertexId>], end: VertexId) -> Vec<VertexId> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = predecessors[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Topological order computed with its own metrics, so the caller's counters
/// only reflect the path computation.
fn dag_order(graph: &Graph, metrics: &mut Metrics) -> Result<Vec<VertexId>, PathError> {
    match topological_sort(graph, &mut Metrics::new()) {
        Ok(order) => Ok(order),
        Err(e) => {
            metrics.stop();
            Err(e.into())
        }
    }
}

/// Compute shortest distances from `source` over an acyclic `graph`.
///
/// One relaxation pass in topological order suffices: every vertex's
/// distance is final before its outgoing edges are examined. Each improving
/// update counts as one relaxation. Fails without partial output if the
/// graph has a cycle.
pub fn shortest_paths(
    graph: &Graph,
    source: VertexId,
    metrics: &mut Metrics,
) -> Result<ShortestPaths, PathError> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(PathError::SourceOutOfRange {
            vertex: source,
            vertex_count: n,
        });
    }

    let mut distances = vec![Distance::Unreachable; n];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; n];
    distances[source] = Distance::Finite(0);

    metrics.start();
    let order = dag_order(graph, metrics)?;

    for u in order {
        let Distance::Finite(du) = distances[u] else {
            continue;
        };
        for edge in graph.neighbors(u) {
            let candidate = du + i64::from(edge.weight);
            let improves = match distances[edge.to] {
                Distance::Finite(dv) => candidate < dv,
                Distance::Unreachable => true,
            };
            if improves {
                distances[edge.to] = Distance::Finite(candidate);
                predecessors[edge.to] = Some(u);
                metrics.increment_relaxations();
            }
        }
    }

    metrics.stop();

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

/// Compute the longest path through an acyclic `graph`.
///
/// Every zero in-degree vertex starts at distance zero, so the path may begin
/// at any of them. The endpoint is the vertex with the largest distance,
/// lowest id on ties. A graph without vertices yields an empty path of
/// length zero. Fails without partial output if the graph has a cycle.
pub fn longest_path(graph: &Graph, metrics: &mut Metrics) -> Result<LongestPath, PathError> {
    let n = graph.vertex_count();
    let mut distances = vec![Distance::Unreachable; n];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; n];

    metrics.start();
    let order = dag_order(graph, metrics)?;

    for (v, degree) in graph.in_degrees().into_iter().enumerate() {
        if degree == 0 {
            distances[v] = Distance::Finite(0);
        }
    }

    for u in order {
        let Distance::Finite(du) = distances[u] else {
            continue;
        };
        for edge in graph.neighbors(u) {
            let candidate = du + i64::from(edge.weight);
            let improves = match distances[edge.to] {
                Distance::Finite(dv) => candidate > dv,
                Distance::Unreachable => true,
            };
            if improves {
                distances[edge.to] = Distance::Finite(candidate);
                predecessors[edge.to] = Some(u);
                metrics.increment_relaxations();
            }
        }
    }

    metrics.stop();

    let mut best: Option<(VertexId, i64)> = None;
    for (v, d) in distances.iter().enumerate() {
        if let Distance::Finite(d) = *d {
            if best.map_or(true, |(_, b)| d > b) {
                best = Some((v, d));
            }
        }
    }

    let Some((end, length)) = best else {
        return Ok(LongestPath {
            path: Vec::new(),
            length: 0,
            distances,
        });
    };

    Ok(LongestPath {
        path: reconstruct_path(&predecessors, end),
        length,
        distances,
    })
}
