//! Configuration types for graph analysis.

use pyo3::prelude::*;

use crate::condensation::DedupPolicy;

/// Configuration for the analysis pipeline.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Verbosity level: 0=silent, 1=stages, 2=details, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Condensation duplicate-edge policy: "first", "min_weight", or "max_weight"
    #[pyo3(get, set)]
    pub dedup_policy: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            dedup_policy: DedupPolicy::First.as_str().to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Parse the configured dedup policy, returning the unknown name on failure.
    pub fn dedup_policy(&self) -> Result<DedupPolicy, String> {
        self.dedup_policy.parse()
    }
}

#[pymethods]
impl AnalysisConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, dedup_policy=None))]
    fn new(verbosity: Option<u8>, dedup_policy: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            dedup_policy: dedup_policy.unwrap_or(defaults.dedup_policy),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalysisConfig(verbosity={}, dedup_policy={:?})",
            self.verbosity, self.dedup_policy
        )
    }
}
