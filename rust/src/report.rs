//! Per-dataset performance counters in CSV form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::dataset::GraphSpec;
use crate::pipeline::GraphAnalysis;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write metrics report: {0}")]
    Io(#[from] std::io::Error),
}

/// One CSV row summarising an analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsRow {
    pub dataset: String,
    pub vertices: usize,
    pub edges: usize,
    pub sccs: usize,
    pub scc_time_ms: f64,
    pub scc_dfs_visits: u64,
    pub topo_time_ms: f64,
    pub topo_operations: u64,
    pub has_source: bool,
    pub shortest_path_time_ms: f64,
    pub shortest_path_relaxations: u64,
    pub longest_path_length: i64,
    pub longest_path_time_ms: f64,
    pub longest_path_relaxations: u64,
}

impl MetricsRow {
    pub const CSV_HEADER: &'static str = "dataset,vertices,edges,sccs,scc_time_ms,scc_dfs_visits,\
topo_time_ms,topo_operations,has_source,shortest_path_time_ms,\
shortest_path_relaxations,longest_path_length,longest_path_time_ms,\
longest_path_relaxations";

    /// Collect counters from a finished run. Stages that did not run report zero.
    pub fn from_analysis(dataset: &str, spec: &GraphSpec, analysis: &GraphAnalysis) -> Self {
        let (shortest_path_time_ms, shortest_path_relaxations) = analysis
            .shortest
            .as_ref()
            .map(|sp| (sp.metrics.elapsed_ms(), sp.metrics.relaxations()))
            .unwrap_or((0.0, 0));

        Self {
            dataset: dataset.to_string(),
            vertices: spec.n,
            edges: spec.edges.len(),
            sccs: analysis.component_count(),
            scc_time_ms: analysis.scc_metrics.elapsed_ms(),
            scc_dfs_visits: analysis.scc_metrics.dfs_visits(),
            topo_time_ms: analysis.topo_metrics.elapsed_ms(),
            topo_operations: analysis.topo_metrics.operations(),
            has_source: spec.source.is_some(),
            shortest_path_time_ms,
            shortest_path_relaxations,
            longest_path_length: analysis.longest.length,
            longest_path_time_ms: analysis.longest.metrics.elapsed_ms(),
            longest_path_relaxations: analysis.longest.metrics.relaxations(),
        }
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{:.3},{},{:.3},{},{},{:.3},{},{},{:.3},{}",
            self.dataset,
            self.vertices,
            self.edges,
            self.sccs,
            self.scc_time_ms,
            self.scc_dfs_visits,
            self.topo_time_ms,
            self.topo_operations,
            self.has_source,
            self.shortest_path_time_ms,
            self.shortest_path_relaxations,
            self.longest_path_length,
            self.longest_path_time_ms,
            self.longest_path_relaxations
        )
    }
}

/// Write the header followed by one line per row, replacing any existing file.
pub fn write_metrics_csv(path: impl AsRef<Path>, rows: &[MetricsRow]) -> Result<(), ReportError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", MetricsRow::CSV_HEADER)?;
    for row in rows {
        writeln!(out, "{}", row.to_csv_line())?;
    }
    out.flush()?;
    Ok(())
}
