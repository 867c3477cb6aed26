use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// An undirected adjacency-list graph with caller-opaque vertex and edge
/// data. The algorithms in this crate never inspect `V` or `E` except
/// through closures supplied by the caller.
pub struct Graph<V, E> {
    graph: UnGraph<V, E>,
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<V, E> {
        &self.graph
    }

    pub fn vertex(&self, idx: NodeIndex) -> &V {
        &self.graph[idx]
    }

    pub fn vertex_mut(&mut self, idx: NodeIndex) -> &mut V {
        &mut self.graph[idx]
    }

    pub fn edge(&self, idx: EdgeIndex) -> &E {
        &self.graph[idx]
    }

    pub fn edge_mut(&mut self, idx: EdgeIndex) -> &mut E {
        &mut self.graph[idx]
    }

    pub fn add_vertex(&mut self, data: V) -> NodeIndex {
        self.graph.add_node(data)
    }

    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, data: E) -> EdgeIndex {
        self.graph.add_edge(a, b, data)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn edges_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    /// All edges between `a` and `b`; more than one for multigraphs.
    pub fn edges_between(&self, a: NodeIndex, b: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges_connecting(a, b).map(|e| e.id())
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }
}

impl Graph<(), ()> {
    /// Builds an unlabeled graph from `n` vertices and an edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new();
        let idx: Vec<NodeIndex> = (0..n).map(|_| graph.add_vertex(())).collect();
        for &(a, b) in edges {
            graph.add_edge(idx[a], idx[b], ());
        }
        graph
    }

    /// Builds an unlabeled graph from per-vertex neighbor lists. Each
    /// undirected edge may be listed from both endpoints; only the
    /// `a < b` direction is materialized.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Self {
        let mut edges = Vec::new();
        for (a, neighbors) in adjacency.iter().enumerate() {
            for &b in neighbors {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        Self::from_edges(adjacency.len(), &edges)
    }
}

impl<V: Clone, E: Clone> Clone for Graph<V, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for Graph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}
