//! End-to-end analysis: SCC detection, condensation, ordering, and paths.
//!
//! Each stage runs with its own `Metrics`, so the returned counters describe
//! exactly one algorithm call.

use thiserror::Error;

use crate::condensation::{ComponentId, Condensation};
use crate::config::AnalysisConfig;
use crate::dag_path::{longest_path, shortest_paths, Distance, PathError};
use crate::graph::{Graph, VertexId};
use crate::metrics::Metrics;
use crate::scc::{find_sccs, Components};
use crate::topo::{expand_to_vertices, topological_sort, TopoError};
use crate::{log_debug, log_details, log_stages, log_warning};

/// Errors that can occur during analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The condensation was not acyclic. Indicates a broken SCC partition.
    #[error("Condensation has a cycle: only {emitted} of {component_count} components ordered")]
    CyclicCondensation {
        emitted: usize,
        component_count: usize,
    },
    #[error("Source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
    #[error("Unknown condensation dedup policy: {0}")]
    UnknownDedupPolicy(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Shortest distances over the condensation from the component of a source.
#[derive(Clone, Debug)]
pub struct ShortestPathReport {
    pub source_vertex: VertexId,
    pub source_component: ComponentId,
    /// Indexed by component id.
    pub distances: Vec<Distance>,
    pub metrics: Metrics,
}

/// Critical path through the condensation.
#[derive(Clone, Debug)]
pub struct LongestPathReport {
    /// Component ids from start to end.
    pub path: Vec<ComponentId>,
    pub length: i64,
    /// Original vertices of each component on the path, in path order.
    pub member_groups: Vec<Vec<VertexId>>,
    pub metrics: Metrics,
}

/// Everything produced by one analysis run.
#[derive(Clone, Debug)]
pub struct GraphAnalysis {
    pub components: Components,
    pub scc_metrics: Metrics,
    pub condensation: Condensation,
    pub component_order: Vec<ComponentId>,
    pub topo_metrics: Metrics,
    /// Vertex-level execution order derived from `component_order`.
    pub execution_order: Vec<VertexId>,
    pub shortest: Option<ShortestPathReport>,
    pub longest: LongestPathReport,
}

impl GraphAnalysis {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn condensation_edge_count(&self) -> usize {
        self.condensation.edge_count()
    }
}

/// Run the full analysis on `graph`.
///
/// `source`, when given, is an original vertex id; shortest distances are
/// computed from its component. A cyclic condensation cannot occur for a
/// correct partition and is reported as `AnalysisError::CyclicCondensation`.
pub fn analyze(
    graph: &Graph,
    source: Option<VertexId>,
    config: &AnalysisConfig,
) -> Result<GraphAnalysis, AnalysisError> {
    let verbosity = config.verbosity;
    let policy = config
        .dedup_policy()
        .map_err(AnalysisError::UnknownDedupPolicy)?;

    if let Some(vertex) = source {
        if vertex >= graph.vertex_count() {
            return Err(AnalysisError::SourceOutOfRange {
                vertex,
                vertex_count: graph.vertex_count(),
            });
        }
    }

    log_stages!(
        verbosity,
        "Graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    // Strongly connected components
    let mut scc_metrics = Metrics::new();
    let components = find_sccs(graph, &mut scc_metrics);
    log_stages!(verbosity, "Found {} SCC(s)", components.len());
    for (i, members) in components.iter().enumerate() {
        log_details!(
            verbosity,
            "  SCC {}: {:?} (size: {})",
            i,
            members,
            members.len()
        );
    }
    log_debug!(verbosity, "  SCC performance: {}", scc_metrics);

    // Condensation
    let condensation = Condensation::build_with_policy(graph, &components, policy);
    log_stages!(
        verbosity,
        "Condensation DAG: {} nodes, {} edges (dedup: {})",
        condensation.component_count(),
        condensation.edge_count(),
        policy.as_str()
    );
    log_debug!(verbosity, "  Vertex -> SCC: {:?}", condensation.vertex_map());
    if verbosity >= crate::logging::VERBOSITY_DEBUG {
        let cond = condensation.graph();
        for u in 0..cond.vertex_count() {
            for e in cond.neighbors(u) {
                eprintln!("  SCC {} -> SCC {} (w={})", u, e.to, e.weight);
            }
        }
    }

    // Topological order of components
    let mut topo_metrics = Metrics::new();
    let component_order = match topological_sort(condensation.graph(), &mut topo_metrics) {
        Ok(order) => order,
        Err(TopoError::CycleDetected {
            emitted,
            vertex_count,
        }) => {
            log_warning!(
                "Condensation has a cycle (should not happen!): ordered {} of {} components",
                emitted,
                vertex_count
            );
            debug_assert!(false, "condensation of an SCC partition must be acyclic");
            return Err(AnalysisError::CyclicCondensation {
                emitted,
                component_count: vertex_count,
            });
        }
    };
    let execution_order = expand_to_vertices(&component_order, &components);
    log_details!(verbosity, "SCC topological order: {:?}", component_order);
    log_details!(verbosity, "Task execution order: {:?}", execution_order);
    log_debug!(verbosity, "  Topological sort performance: {}", topo_metrics);

    // Shortest distances from the source's component
    let shortest = match source {
        Some(source_vertex) => {
            let source_component = condensation.component_of(source_vertex);
            let mut metrics = Metrics::new();
            let sp = shortest_paths(condensation.graph(), source_component, &mut metrics)?;
            log_stages!(
                verbosity,
                "Shortest paths from vertex {} (SCC {}): {} reachable component(s)",
                source_vertex,
                source_component,
                sp.distances.iter().filter(|d| d.is_finite()).count()
            );
            for (cid, d) in sp.distances.iter().enumerate() {
                log_details!(verbosity, "  To SCC {}: {}", cid, d);
            }
            log_debug!(verbosity, "  Shortest path performance: {}", metrics);
            Some(ShortestPathReport {
                source_vertex,
                source_component,
                distances: sp.distances,
                metrics,
            })
        }
        None => None,
    };

    // Critical path
    let mut lp_metrics = Metrics::new();
    let lp = longest_path(condensation.graph(), &mut lp_metrics)?;
    let member_groups: Vec<Vec<VertexId>> =
        lp.path.iter().map(|&cid| components[cid].clone()).collect();
    if lp.path.is_empty() {
        log_stages!(verbosity, "No path found or graph is empty");
    } else {
        log_stages!(verbosity, "Critical path length: {}", lp.length);
        log_details!(verbosity, "Critical path (SCC indices): {:?}", lp.path);
        log_details!(
            verbosity,
            "Critical path (original vertices): {:?}",
            member_groups
        );
    }
    log_debug!(verbosity, "  Longest path performance: {}", lp_metrics);

    Ok(GraphAnalysis {
        components,
        scc_metrics,
        condensation,
        component_order,
        topo_metrics,
        execution_order,
        shortest,
        longest: LongestPathReport {
            path: lp.path,
            length: lp.length,
            member_groups,
            metrics: lp_metrics,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(n: usize, edges: &[(VertexId, VertexId, i32)]) -> Graph {
        let mut g = Graph::new(n);
        for &(u, v, w) in edges {
            g.add_edge(u, v, w);
        }
        g
    }

    /// Deterministic pseudo-random graph (linear congruential generator).
    fn generated_graph(seed: u64, n: usize, edge_count: usize) -> Graph {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };
        let mut g = Graph::new(n);
        for _ in 0..edge_count {
            let u = next() % n;
            let v = next() % n;
            let w = (next() % 21) as i32 - 5;
            g.add_edge(u, v, w);
        }
        g
    }

    fn generated_graphs() -> Vec<Graph> {
        let mut graphs = Vec::new();
        for seed in 0..40u64 {
            let n = 1 + (seed as usize % 12);
            let edges = (seed as usize * 7) % 30;
            graphs.push(generated_graph(seed, n, edges));
        }
        graphs
    }

    fn all_edges(g: &Graph) -> Vec<(VertexId, VertexId, i32)> {
        (0..g.vertex_count())
            .flat_map(|u| g.neighbors(u).iter().map(move |e| (u, e.to, e.weight)))
            .collect()
    }

    #[test]
    fn test_cycle_scenario() {
        let g = make_graph(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let analysis = analyze(&g, Some(0), &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.component_count(), 1);
        assert_eq!(analysis.component_order, vec![0]);
        assert_eq!(analysis.condensation_edge_count(), 0);
        assert_eq!(analysis.execution_order.len(), 3);
        assert_eq!(analysis.longest.length, 0);
        assert_eq!(analysis.longest.path, vec![0]);
        assert_eq!(analysis.longest.member_groups, vec![vec![2, 1, 0]]);

        let shortest = analysis.shortest.unwrap();
        assert_eq!(shortest.source_component, 0);
        assert_eq!(shortest.distances, vec![Distance::Finite(0)]);
    }

    #[test]
    fn test_dag_input_keeps_vertex_structure() {
        let g = make_graph(4, &[(0, 1, 5), (1, 2, 3), (2, 3, 1)]);
        let analysis = analyze(&g, Some(0), &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.component_count(), 4);
        assert_eq!(analysis.execution_order, vec![0, 1, 2, 3]);
        assert_eq!(analysis.longest.length, 9);
        assert_eq!(analysis.longest.member_groups, vec![vec![0], vec![1], vec![2], vec![3]]);

        let shortest = analysis.shortest.unwrap();
        let by_vertex: Vec<Distance> = (0..4)
            .map(|v| shortest.distances[analysis.condensation.component_of(v)])
            .collect();
        assert_eq!(
            by_vertex,
            vec![
                Distance::Finite(0),
                Distance::Finite(5),
                Distance::Finite(8),
                Distance::Finite(9)
            ]
        );
    }

    #[test]
    fn test_cycle_feeding_chain() {
        // {0, 1} cycle -> 2 -> 3, with a heavier parallel edge from 1 that loses.
        let g = make_graph(
            4,
            &[(0, 1, 1), (1, 0, 1), (0, 2, 4), (1, 2, 10), (2, 3, 2)],
        );
        let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.component_count(), 3);
        assert_eq!(analysis.condensation_edge_count(), 2);
        assert_eq!(analysis.longest.length, 6);
        assert_eq!(analysis.longest.member_groups.len(), 3);
        assert!(analysis.shortest.is_none());

        let cycle_component = analysis.condensation.component_of(0);
        assert_eq!(analysis.longest.path[0], cycle_component);
        let first_group = &analysis.longest.member_groups[0];
        assert_eq!(first_group.len(), 2);
    }

    #[test]
    fn test_max_weight_policy_changes_critical_path() {
        let g = make_graph(
            4,
            &[(0, 1, 1), (1, 0, 1), (0, 2, 4), (1, 2, 10), (2, 3, 2)],
        );
        let config = AnalysisConfig {
            dedup_policy: "max_weight".to_string(),
            ..AnalysisConfig::default()
        };
        let analysis = analyze(&g, None, &config).unwrap();
        assert_eq!(analysis.longest.length, 12);
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let config = AnalysisConfig {
            dedup_policy: "median".to_string(),
            ..AnalysisConfig::default()
        };
        let result = analyze(&Graph::new(1), None, &config);
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::UnknownDedupPolicy("median".to_string())
        );
    }

    #[test]
    fn test_source_out_of_range() {
        let result = analyze(&Graph::new(2), Some(7), &AnalysisConfig::default());
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::SourceOutOfRange {
                vertex: 7,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_empty_graph() {
        let analysis = analyze(&Graph::new(0), None, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.component_count(), 0);
        assert!(analysis.execution_order.is_empty());
        assert!(analysis.longest.path.is_empty());
        assert_eq!(analysis.longest.length, 0);
    }

    #[test]
    fn test_stage_metrics_are_independent() {
        let g = make_graph(3, &[(0, 1, 2), (1, 2, 3)]);
        let analysis = analyze(&g, Some(0), &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.scc_metrics.dfs_visits(), 3);
        assert_eq!(analysis.scc_metrics.relaxations(), 0);
        assert_eq!(analysis.topo_metrics.operations(), 3);
        assert_eq!(analysis.topo_metrics.dfs_visits(), 0);
        let shortest = analysis.shortest.unwrap();
        assert_eq!(shortest.metrics.relaxations(), 2);
        assert_eq!(shortest.metrics.operations(), 0);
        assert_eq!(analysis.longest.metrics.relaxations(), 2);
    }

    #[test]
    fn test_verbose_run_succeeds() {
        let g = make_graph(4, &[(0, 1, 1), (1, 0, 1), (1, 2, 3), (2, 3, 1)]);
        let config = AnalysisConfig {
            verbosity: crate::logging::VERBOSITY_DEBUG,
            ..AnalysisConfig::default()
        };
        let analysis = analyze(&g, Some(3), &config).unwrap();
        assert_eq!(analysis.longest.length, 4);
    }

    #[test]
    fn test_partition_completeness_property() {
        for g in generated_graphs() {
            let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();
            let mut seen = vec![0usize; g.vertex_count()];
            for members in &analysis.components {
                assert!(!members.is_empty());
                for &v in members {
                    seen[v] += 1;
                }
            }
            assert!(seen.iter().all(|&count| count == 1));
        }
    }

    #[test]
    fn test_components_are_strongly_connected_and_maximal() {
        for g in generated_graphs() {
            let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();
            let n = g.vertex_count();
            // Reachability by repeated DFS on tiny graphs.
            let reach: Vec<Vec<bool>> = (0..n)
                .map(|s| {
                    let mut seen = vec![false; n];
                    let mut stack = vec![s];
                    seen[s] = true;
                    while let Some(u) = stack.pop() {
                        for e in g.neighbors(u) {
                            if !seen[e.to] {
                                seen[e.to] = true;
                                stack.push(e.to);
                            }
                        }
                    }
                    seen
                })
                .collect();
            for u in 0..n {
                for v in 0..n {
                    let mutual = reach[u][v] && reach[v][u];
                    let same = analysis.condensation.component_of(u)
                        == analysis.condensation.component_of(v);
                    assert_eq!(mutual, same, "vertices {u} and {v}");
                }
            }
        }
    }

    #[test]
    fn test_condensation_order_is_valid_property() {
        for g in generated_graphs() {
            let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();
            let cond = analysis.condensation.graph();
            let mut position = vec![0usize; cond.vertex_count()];
            for (i, &c) in analysis.component_order.iter().enumerate() {
                position[c] = i;
            }
            for (u, v, _) in all_edges(cond) {
                assert_ne!(u, v);
                assert!(position[u] < position[v]);
            }
        }
    }

    #[test]
    fn test_expansion_coverage_property() {
        for g in generated_graphs() {
            let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();
            let order = &analysis.execution_order;
            assert_eq!(order.len(), g.vertex_count());

            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..g.vertex_count()).collect::<Vec<_>>());

            // Components are contiguous and follow component_order.
            let component_sequence: Vec<ComponentId> = order
                .iter()
                .map(|&v| analysis.condensation.component_of(v))
                .collect();
            let mut collapsed = component_sequence.clone();
            collapsed.dedup();
            assert_eq!(collapsed, analysis.component_order);
        }
    }

    #[test]
    fn test_shortest_path_fixpoint_property() {
        for (i, g) in generated_graphs().into_iter().enumerate() {
            let source = i % g.vertex_count();
            let analysis = analyze(&g, Some(source), &AnalysisConfig::default()).unwrap();
            let shortest = analysis.shortest.unwrap();
            let cond = analysis.condensation.graph();

            assert_eq!(
                shortest.distances[shortest.source_component],
                Distance::Finite(0)
            );
            for (u, v, w) in all_edges(cond) {
                if let (Some(du), Some(dv)) =
                    (shortest.distances[u].finite(), shortest.distances[v].finite())
                {
                    assert!(dv <= du + i64::from(w));
                }
                if shortest.distances[u].is_finite() {
                    assert!(shortest.distances[v].is_finite());
                }
            }
        }
    }

    #[test]
    fn test_longest_path_optimality_property() {
        for g in generated_graphs() {
            let analysis = analyze(&g, None, &AnalysisConfig::default()).unwrap();
            let cond = analysis.condensation.graph();
            let lp = longest_path(cond, &mut Metrics::new()).unwrap();

            // Every condensation vertex is reachable from some start vertex.
            assert!(lp.distances.iter().all(|d| d.is_finite()));
            let best = lp.distances.iter().filter_map(|d| d.finite()).max();
            assert_eq!(Some(analysis.longest.length), best);

            let weight: i64 = analysis
                .longest
                .path
                .windows(2)
                .map(|pair| {
                    let edge = cond
                        .neighbors(pair[0])
                        .iter()
                        .find(|e| e.to == pair[1])
                        .unwrap();
                    i64::from(edge.weight)
                })
                .sum();
            assert_eq!(weight, analysis.longest.length);
        }
    }
}
