//! Strongly connected components using Tarjan's algorithm.
//!
//! The depth-first search runs on an explicit frame stack instead of the call
//! stack, so a dependency chain of any length cannot overflow. Each frame holds
//! a vertex and the position of the next outgoing edge to examine, which is
//! exactly the state a recursive implementation keeps in its stack frame. The
//! emitted components, and their order, are identical to the recursive form.

use crate::graph::{Graph, VertexId};
use crate::metrics::Metrics;

/// Disjoint vertex groups covering `[0, n)`, in completion order.
pub type Components = Vec<Vec<VertexId>>;

/// Simulated recursion frame.
#[derive(Clone, Copy, Debug)]
struct Frame {
    vertex: VertexId,
    next_edge: usize,
}

struct TarjanState<'g> {
    graph: &'g Graph,
    /// Discovery index per vertex (`None` until visited).
    index: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    /// Vertices of components still being assembled.
    stack: Vec<VertexId>,
    frames: Vec<Frame>,
    next_index: usize,
    components: Components,
}

impl<'g> TarjanState<'g> {
    fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            index: vec![None; n],
            low_link: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::with_capacity(n),
            frames: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, v: VertexId, metrics: &mut Metrics) {
        self.index[v] = Some(self.next_index);
        self.low_link[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        self.frames.push(Frame {
            vertex: v,
            next_edge: 0,
        });
        metrics.increment_dfs_visits();
    }

    fn run_from(&mut self, root: VertexId, metrics: &mut Metrics) {
        let graph = self.graph;
        self.discover(root, metrics);

        while let Some(frame) = self.frames.last_mut() {
            let v = frame.vertex;
            let edges = graph.neighbors(v);

            if frame.next_edge < edges.len() {
                let w = edges[frame.next_edge].to;
                frame.next_edge += 1;

                match self.index[w] {
                    None => self.discover(w, metrics),
                    Some(w_index) if self.on_stack[w] => {
                        self.low_link[v] = self.low_link[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All edges of v examined: the simulated call returns.
            self.frames.pop();
            if Some(self.low_link[v]) == self.index[v] {
                self.pop_component(v, metrics);
            }
            if let Some(parent) = self.frames.last() {
                let p = parent.vertex;
                self.low_link[p] = self.low_link[p].min(self.low_link[v]);
            }
        }
    }

    fn pop_component(&mut self, root: VertexId, metrics: &mut Metrics) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            metrics.increment_operations();
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Partition `graph` into maximal strongly connected components.
///
/// Vertices inside each component appear in stack-pop order; components
/// appear in the order they were completed, which is a reverse topological
/// order of the condensation. Records one DFS visit per discovered vertex and
/// one operation per vertex popped into a component.
pub fn find_sccs(graph: &Graph, metrics: &mut Metrics) -> Components {
    let mut state = TarjanState::new(graph);

    metrics.start();
    for v in 0..graph.vertex_count() {
        if state.index[v].is_none() {
            state.run_from(v, metrics);
        }
    }
    metrics.stop();

    state.components
}
