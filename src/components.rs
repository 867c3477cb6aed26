use petgraph::graph::NodeIndex;

use crate::graph::Graph;

/// Connected-component labeling. Two vertices share a label iff a path
/// exists between them.
pub struct ConnectedComponents {
    labels: Vec<usize>,
    count: usize,
}

impl ConnectedComponents {
    pub fn new<V, E>(graph: &Graph<V, E>) -> Self {
        let n = graph.vertex_count();
        let mut labels = vec![usize::MAX; n];
        let mut count = 0;
        for start in graph.vertices() {
            if labels[start.index()] != usize::MAX {
                continue;
            }
            let mut stack = vec![start];
            while let Some(current) = stack.pop() {
                if labels[current.index()] != usize::MAX {
                    continue;
                }
                labels[current.index()] = count;
                for neighbor in graph.neighbors(current) {
                    if labels[neighbor.index()] == usize::MAX {
                        stack.push(neighbor);
                    }
                }
            }
            count += 1;
        }
        Self { labels, count }
    }

    /// 0-based component id per vertex.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn label(&self, v: NodeIndex) -> usize {
        self.labels[v.index()]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn same_component(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.labels[a.index()] == self.labels[b.index()]
    }
}

/// Splits a graph into one subgraph per connected component, preserving
/// vertex and edge data. Within each fragment, vertices keep their
/// original ascending order.
pub fn fragments<V: Clone, E: Clone>(graph: &Graph<V, E>) -> Vec<Graph<V, E>> {
    let components = ConnectedComponents::new(graph);
    let mut result: Vec<Graph<V, E>> = (0..components.count()).map(|_| Graph::new()).collect();
    let mut index_map = vec![NodeIndex::new(0); graph.vertex_count()];

    for v in graph.vertices() {
        let frag = &mut result[components.label(v)];
        index_map[v.index()] = frag.add_vertex(graph.vertex(v).clone());
    }
    for edge in graph.edges() {
        if let Some((a, b)) = graph.edge_endpoints(edge) {
            let frag = &mut result[components.label(a)];
            frag.add_edge(
                index_map[a.index()],
                index_map[b.index()],
                graph.edge(edge).clone(),
            );
        }
    }
    result
}
