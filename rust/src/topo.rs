//! Topological ordering using Kahn's algorithm.

use std::collections::VecDeque;
use thiserror::Error;

use crate::condensation::ComponentId;
use crate::graph::{Graph, VertexId};
use crate::metrics::Metrics;

/// Error types for topological sorting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    /// Fewer than all vertices could be ordered; the graph has a cycle.
    #[error("Cycle detected: only {emitted} of {vertex_count} vertices could be ordered")]
    CycleDetected { emitted: usize, vertex_count: usize },
}

/// Order the vertices of `graph` so every edge points forward.
///
/// Zero in-degree vertices are seeded in ascending id order and processed
/// FIFO, so the result is deterministic. Each dequeue counts as one operation.
/// A cyclic graph yields `TopoError::CycleDetected`, never a partial order.
pub fn topological_sort(graph: &Graph, metrics: &mut Metrics) -> Result<Vec<VertexId>, TopoError> {
    let n = graph.vertex_count();

    metrics.start();

    let mut in_degree = graph.in_degrees();
    let mut queue: VecDeque<VertexId> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut result: Vec<VertexId> = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        result.push(u);
        metrics.increment_operations();

        for edge in graph.neighbors(u) {
            let degree = &mut in_degree[edge.to];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(edge.to);
            }
        }
    }

    metrics.stop();

    if result.len() != n {
        return Err(TopoError::CycleDetected {
            emitted: result.len(),
            vertex_count: n,
        });
    }

    Ok(result)
}

/// Expand a component order into a vertex-level execution order.
///
/// Members of each component are emitted contiguously, in the order the
/// partition stores them.
///
/// # Panics
/// If `component_order` names a component missing from `components`.
pub fn expand_to_vertices(
    component_order: &[ComponentId],
    components: &[Vec<VertexId>],
) -> Vec<VertexId> {
    let total = component_order.iter().map(|&c| components[c].len()).sum();
    let mut result = Vec::with_capacity(total);
    for &cid in component_order {
        result.extend_from_slice(&components[cid]);
    }
    result
}
