//! Rust implementation of dependency graph analysis for schedule planning.
//!
//! Detects cyclic dependency clusters (strongly connected components), collapses
//! them into an acyclic condensation, orders it topologically, and computes
//! shortest distances and the critical (longest) path over it.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod condensation;
mod config;
pub mod dag_path;
pub mod dataset;
pub mod graph;
pub mod logging;
pub mod metrics;
mod models;
pub mod pipeline;
pub mod report;
pub mod scc;
pub mod topo;

pub use condensation::{ComponentId, Condensation, DedupPolicy};
pub use config::AnalysisConfig;
pub use dag_path::{longest_path, shortest_paths, Distance, LongestPath, PathError, ShortestPaths};
pub use dataset::{DatasetError, EdgeSpec, GraphSpec};
pub use graph::{Edge, Graph, GraphError, VertexId, Weight};
pub use metrics::Metrics;
pub use models::{AnalysisResult, LongestPathResult, MetricsSummary};
pub use pipeline::{analyze, AnalysisError, GraphAnalysis, LongestPathReport, ShortestPathReport};
pub use report::{write_metrics_csv, MetricsRow, ReportError};
pub use scc::{find_sccs, Components};
pub use topo::{expand_to_vertices, topological_sort, TopoError};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Find strongly connected components with Tarjan's algorithm.
///
/// # Returns
/// * (components, metrics): vertex groups in completion order and the SCC counters
#[pyfunction]
#[pyo3(name = "find_sccs")]
fn py_find_sccs(graph: &Graph) -> (Vec<Vec<usize>>, MetricsSummary) {
    let mut metrics = Metrics::new();
    let components = find_sccs(graph, &mut metrics);
    (components, (&metrics).into())
}

/// Topologically sort a graph with Kahn's algorithm.
///
/// # Returns
/// * (order, metrics) where order is None if the graph has a cycle
#[pyfunction]
#[pyo3(name = "topological_sort")]
fn py_topological_sort(graph: &Graph) -> (Option<Vec<usize>>, MetricsSummary) {
    let mut metrics = Metrics::new();
    let order = topological_sort(graph, &mut metrics).ok();
    (order, (&metrics).into())
}

/// Expand a component order into a vertex-level execution order.
///
/// # Raises
/// * IndexError if the order names a component not present in `components`
#[pyfunction]
#[pyo3(name = "expand_to_original")]
fn py_expand_to_original(
    component_order: Vec<usize>,
    components: Vec<Vec<usize>>,
) -> PyResult<Vec<usize>> {
    if let Some(&bad) = component_order.iter().find(|&&c| c >= components.len()) {
        return Err(pyo3::exceptions::PyIndexError::new_err(format!(
            "Component {} out of range for {} components",
            bad,
            components.len()
        )));
    }
    Ok(expand_to_vertices(&component_order, &components))
}

/// Single-source shortest distances on a DAG.
///
/// # Returns
/// * (distances, metrics) where distances is None if the graph has a cycle and
///   unreachable entries are None
///
/// # Raises
/// * IndexError if the source is out of range
#[pyfunction]
#[pyo3(name = "shortest_paths")]
fn py_shortest_paths(
    graph: &Graph,
    source: usize,
) -> PyResult<(Option<Vec<Option<i64>>>, MetricsSummary)> {
    let mut metrics = Metrics::new();
    match shortest_paths(graph, source, &mut metrics) {
        Ok(sp) => Ok((
            Some(models::distances_to_options(&sp.distances)),
            (&metrics).into(),
        )),
        Err(PathError::CycleDetected(_)) => Ok((None, (&metrics).into())),
        Err(e @ PathError::SourceOutOfRange { .. }) => {
            Err(pyo3::exceptions::PyIndexError::new_err(e.to_string()))
        }
    }
}

/// Longest (critical) path on a DAG; None if the graph has a cycle.
#[pyfunction]
#[pyo3(name = "longest_path")]
fn py_longest_path(graph: &Graph) -> Option<LongestPathResult> {
    let mut metrics = Metrics::new();
    longest_path(graph, &mut metrics)
        .ok()
        .map(|lp| LongestPathResult::from_path(lp, &metrics))
}

/// Run the full analysis pipeline.
///
/// # Arguments
/// * `graph` - Graph to analyze
/// * `source` - Optional original vertex for shortest-distance queries
/// * `config` - Analysis configuration (defaults when omitted)
///
/// # Raises
/// * IndexError if the source is out of range
/// * ValueError for an unknown dedup policy or an unexpected cyclic condensation
#[pyfunction]
#[pyo3(signature = (graph, source=None, config=None))]
fn analyze_graph(
    graph: &Graph,
    source: Option<usize>,
    config: Option<AnalysisConfig>,
) -> PyResult<AnalysisResult> {
    let config = config.unwrap_or_default();
    match analyze(graph, source, &config) {
        Ok(analysis) => Ok(AnalysisResult::from(&analysis)),
        Err(e @ AnalysisError::SourceOutOfRange { .. }) => {
            Err(pyo3::exceptions::PyIndexError::new_err(e.to_string()))
        }
        Err(e) => Err(value_error(e)),
    }
}

/// Load a graph definition from a JSON file.
///
/// # Returns
/// * (graph, source) where source is None when the file has none
///
/// # Raises
/// * ValueError if the file cannot be read, parsed, or has out-of-range edges
#[pyfunction]
fn load_graph_json(path: std::path::PathBuf) -> PyResult<(Graph, Option<usize>)> {
    let spec = GraphSpec::from_path(&path).map_err(value_error)?;
    let graph = spec.to_graph().map_err(value_error)?;
    Ok((graph, spec.source))
}

/// The depgraph.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Graph>()?;
    m.add_class::<MetricsSummary>()?;
    m.add_class::<LongestPathResult>()?;
    m.add_class::<AnalysisResult>()?;

    // Config types
    m.add_class::<AnalysisConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_find_sccs, m)?)?;
    m.add_function(wrap_pyfunction!(py_topological_sort, m)?)?;
    m.add_function(wrap_pyfunction!(py_expand_to_original, m)?)?;
    m.add_function(wrap_pyfunction!(py_shortest_paths, m)?)?;
    m.add_function(wrap_pyfunction!(py_longest_path, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_graph, m)?)?;
    m.add_function(wrap_pyfunction!(load_graph_json, m)?)?;

    Ok(())
}
