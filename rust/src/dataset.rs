//! JSON graph definitions.
//!
//! Format: `{"n": 4, "edges": [{"u": 0, "v": 1, "w": 5}], "source": 0}`.
//! `source` is optional; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::graph::{Graph, GraphError, VertexId, Weight};

/// Errors raised while loading a graph definition.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid edge in dataset: {0}")]
    Graph(#[from] GraphError),
}

/// One weighted edge as written in the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub u: VertexId,
    pub v: VertexId,
    pub w: Weight,
}

/// Graph definition: vertex count, edges in order, optional source vertex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<VertexId>,
}

impl GraphSpec {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build the graph, preserving edge order and rejecting out-of-range ids.
    pub fn to_graph(&self) -> Result<Graph, DatasetError> {
        let mut graph = Graph::new(self.n);
        for edge in &self.edges {
            graph.try_add_edge(edge.u, edge.v, edge.w)?;
        }
        Ok(graph)
    }
}
