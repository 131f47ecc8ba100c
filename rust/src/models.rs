//! Result types exposed to Python.

use pyo3::prelude::*;

use crate::dag_path::{Distance, LongestPath};
use crate::metrics::Metrics;
use crate::pipeline::GraphAnalysis;

/// Frozen counters from one algorithm call.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSummary {
    #[pyo3(get)]
    pub elapsed_ms: f64,
    #[pyo3(get)]
    pub dfs_visits: u64,
    #[pyo3(get)]
    pub relaxations: u64,
    #[pyo3(get)]
    pub operations: u64,
}

impl From<&Metrics> for MetricsSummary {
    fn from(m: &Metrics) -> Self {
        Self {
            elapsed_ms: m.elapsed_ms(),
            dfs_visits: m.dfs_visits(),
            relaxations: m.relaxations(),
            operations: m.operations(),
        }
    }
}

#[pymethods]
impl MetricsSummary {
    fn __repr__(&self) -> String {
        format!(
            "MetricsSummary(elapsed_ms={:.3}, dfs_visits={}, relaxations={}, operations={})",
            self.elapsed_ms, self.dfs_visits, self.relaxations, self.operations
        )
    }
}

/// Longest path with the counters of the call that produced it.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct LongestPathResult {
    #[pyo3(get)]
    pub path: Vec<usize>,
    #[pyo3(get)]
    pub length: i64,
    /// Original vertices per path node; empty when computed on a plain graph.
    #[pyo3(get)]
    pub member_groups: Vec<Vec<usize>>,
    #[pyo3(get)]
    pub metrics: MetricsSummary,
}

impl LongestPathResult {
    pub fn from_path(lp: LongestPath, metrics: &Metrics) -> Self {
        Self {
            path: lp.path,
            length: lp.length,
            member_groups: Vec::new(),
            metrics: metrics.into(),
        }
    }
}

#[pymethods]
impl LongestPathResult {
    fn __repr__(&self) -> String {
        format!(
            "LongestPathResult(length={}, path_len={})",
            self.length,
            self.path.len()
        )
    }
}

/// Full pipeline output.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct AnalysisResult {
    #[pyo3(get)]
    pub components: Vec<Vec<usize>>,
    #[pyo3(get)]
    pub scc_metrics: MetricsSummary,
    /// Component id per original vertex.
    #[pyo3(get)]
    pub vertex_to_component: Vec<usize>,
    /// Condensation edges as (from_component, to_component, weight).
    #[pyo3(get)]
    pub condensation_edges: Vec<(usize, usize, i32)>,
    #[pyo3(get)]
    pub component_order: Vec<usize>,
    #[pyo3(get)]
    pub topo_metrics: MetricsSummary,
    #[pyo3(get)]
    pub execution_order: Vec<usize>,
    #[pyo3(get)]
    pub source_component: Option<usize>,
    /// Per-component shortest distance; `None` entries are unreachable.
    #[pyo3(get)]
    pub shortest_distances: Option<Vec<Option<i64>>>,
    #[pyo3(get)]
    pub shortest_metrics: Option<MetricsSummary>,
    #[pyo3(get)]
    pub longest: LongestPathResult,
}

/// Convert tagged distances to Python-friendly optionals.
pub fn distances_to_options(distances: &[Distance]) -> Vec<Option<i64>> {
    distances.iter().map(|d| d.finite()).collect()
}

impl From<&GraphAnalysis> for AnalysisResult {
    fn from(analysis: &GraphAnalysis) -> Self {
        let cond = analysis.condensation.graph();
        let condensation_edges = (0..cond.vertex_count())
            .flat_map(|u| cond.neighbors(u).iter().map(move |e| (u, e.to, e.weight)))
            .collect();

        let shortest = analysis.shortest.as_ref();

        Self {
            components: analysis.components.clone(),
            scc_metrics: (&analysis.scc_metrics).into(),
            vertex_to_component: analysis.condensation.vertex_map().to_vec(),
            condensation_edges,
            component_order: analysis.component_order.clone(),
            topo_metrics: (&analysis.topo_metrics).into(),
            execution_order: analysis.execution_order.clone(),
            source_component: shortest.map(|sp| sp.source_component),
            shortest_distances: shortest.map(|sp| distances_to_options(&sp.distances)),
            shortest_metrics: shortest.map(|sp| (&sp.metrics).into()),
            longest: LongestPathResult {
                path: analysis.longest.path.clone(),
                length: analysis.longest.length,
                member_groups: analysis.longest.member_groups.clone(),
                metrics: (&analysis.longest.metrics).into(),
            },
        }
    }
}

#[pymethods]
impl AnalysisResult {
    fn __repr__(&self) -> String {
        format!(
            "AnalysisResult(components={}, condensation_edges={}, critical_path_length={})",
            self.components.len(),
            self.condensation_edges.len(),
            self.longest.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::graph::Graph;
    use crate::pipeline::analyze;

    #[test]
    fn test_analysis_result_conversion() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1, 4);
        g.add_edge(1, 0, 4);
        g.add_edge(1, 2, 6);

        let analysis = analyze(&g, Some(2), &AnalysisConfig::default()).unwrap();
        let result = AnalysisResult::from(&analysis);

        assert_eq!(result.components.len(), 2);
        assert_eq!(result.condensation_edges.len(), 1);
        assert_eq!(result.condensation_edges[0].2, 6);
        assert_eq!(result.vertex_to_component[0], result.vertex_to_component[1]);
        assert_eq!(result.execution_order.len(), 3);
        assert_eq!(result.longest.length, 6);
        assert_eq!(result.longest.member_groups.len(), 2);

        // Source 2 sits downstream of the cycle, so the cycle is unreachable.
        let source_component = result.source_component.unwrap();
        let distances = result.shortest_distances.unwrap();
        assert_eq!(distances[source_component], Some(0));
        assert_eq!(distances.iter().filter(|d| d.is_none()).count(), 1);
        assert!(result.shortest_metrics.is_some());
    }

    #[test]
    fn test_metrics_summary_from_metrics() {
        let mut m = Metrics::new();
        m.start();
        m.increment_relaxations();
        m.increment_relaxations();
        m.stop();

        let summary = MetricsSummary::from(&m);
        assert_eq!(summary.relaxations, 2);
        assert_eq!(summary.dfs_visits, 0);
        assert!(summary.elapsed_ms >= 0.0);
    }
}
