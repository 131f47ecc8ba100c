//! Condensation of a graph into the DAG of its strongly connected components.

use rustc_hash::FxHashMap;
use std::str::FromStr;

use crate::graph::{Graph, VertexId, Weight};
use crate::scc::Components;

/// Component index in the condensation graph.
pub type ComponentId = usize;

/// Which original edge's weight represents a component pair.
///
/// Edges are visited by ascending source vertex, then in each vertex's
/// insertion order. `First` keeps the first edge seen for a pair; the other
/// policies keep the extremal weight but still place the edge where the pair
/// was first seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    #[default]
    First,
    MinWeight,
    MaxWeight,
}

impl DedupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::MinWeight => "min_weight",
            Self::MaxWeight => "max_weight",
        }
    }

    fn merge(&self, kept: Weight, candidate: Weight) -> Weight {
        match self {
            Self::First => kept,
            Self::MinWeight => kept.min(candidate),
            Self::MaxWeight => kept.max(candidate),
        }
    }
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "min_weight" => Ok(Self::MinWeight),
            "max_weight" => Ok(Self::MaxWeight),
            other => Err(other.to_string()),
        }
    }
}

/// Component-level DAG plus the vertex-to-component map that produced it.
#[derive(Clone, Debug)]
pub struct Condensation {
    graph: Graph,
    component_of: Vec<ComponentId>,
}

impl Condensation {
    /// Build the condensation of `graph` using the first-wins edge policy.
    pub fn build(graph: &Graph, components: &Components) -> Self {
        Self::build_with_policy(graph, components, DedupPolicy::First)
    }

    /// Build the condensation of `graph` for a partition covering every vertex.
    ///
    /// Edges inside a component are dropped. Each ordered component pair gets
    /// at most one edge, weighted according to `policy`.
    ///
    /// # Panics
    /// If a component lists a vertex outside the graph.
    pub fn build_with_policy(
        graph: &Graph,
        components: &Components,
        policy: DedupPolicy,
    ) -> Self {
        let mut component_of = vec![0; graph.vertex_count()];
        for (cid, members) in components.iter().enumerate() {
            for &v in members {
                component_of[v] = cid;
            }
        }

        // (from, to, weight) in first-seen order; `slots` indexes into it.
        let mut pairs: Vec<(ComponentId, ComponentId, Weight)> = Vec::new();
        let mut slots: FxHashMap<(ComponentId, ComponentId), usize> = FxHashMap::default();

        for u in 0..graph.vertex_count() {
            let cu = component_of[u];
            for edge in graph.neighbors(u) {
                let cv = component_of[edge.to];
                if cu == cv {
                    continue;
                }
                match slots.get(&(cu, cv)) {
                    Some(&slot) => {
                        let kept = &mut pairs[slot].2;
                        *kept = policy.merge(*kept, edge.weight);
                    }
                    None => {
                        slots.insert((cu, cv), pairs.len());
                        pairs.push((cu, cv, edge.weight));
                    }
                }
            }
        }

        let mut condensed = Graph::new(components.len());
        for (cu, cv, w) in pairs {
            condensed.add_edge(cu, cv, w);
        }

        Self {
            graph: condensed,
            component_of,
        }
    }

    /// The component DAG; vertex `i` is component `i` of the partition.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Component containing original vertex `v`.
    ///
    /// # Panics
    /// If `v` is not a vertex of the original graph.
    pub fn component_of(&self, v: VertexId) -> ComponentId {
        self.component_of[v]
    }

    /// Checked variant of [`Condensation::component_of`].
    pub fn try_component_of(&self, v: VertexId) -> Option<ComponentId> {
        self.component_of.get(v).copied()
    }

    /// Full vertex-to-component map, indexed by original vertex.
    pub fn vertex_map(&self) -> &[ComponentId] {
        &self.component_of
    }

    pub fn component_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}
