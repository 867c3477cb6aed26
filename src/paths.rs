use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::graph::Graph;

pub fn adjacency_matrix<V, E>(graph: &Graph<V, E>) -> Vec<Vec<bool>> {
    let n = graph.vertex_count();
    let mut matrix = vec![vec![false; n]; n];
    for v in graph.vertices() {
        for neighbor in graph.neighbors(v) {
            matrix[v.index()][neighbor.index()] = true;
        }
    }
    matrix
}

/// Breadth-first distances from `start` to every vertex; `usize::MAX` for
/// unreachable vertices.
pub fn bfs_distances<V, E>(graph: &Graph<V, E>, start: NodeIndex) -> Vec<usize> {
    let mut dist = vec![usize::MAX; graph.vertex_count()];
    dist[start.index()] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        let d = dist[current.index()];
        for neighbor in graph.neighbors(current) {
            if dist[neighbor.index()] == usize::MAX {
                dist[neighbor.index()] = d + 1;
                queue.push_back(neighbor);
            }
        }
    }
    dist
}

pub fn distance_matrix<V, E>(graph: &Graph<V, E>) -> Vec<Vec<usize>> {
    graph.vertices().map(|v| bfs_distances(graph, v)).collect()
}

/// A shortest path from `from` to `to` as a vertex sequence, or `None` if
/// no path exists. Reconstructed by walking the BFS distance field back
/// from `to`: any neighbor one step closer to `from` is a valid
/// predecessor.
pub fn shortest_path<V, E>(
    graph: &Graph<V, E>,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let dist = bfs_distances(graph, from);
    if dist[to.index()] == usize::MAX {
        return None;
    }
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        let d = dist[current.index()];
        let prev = graph.neighbors(current).find(|nb| dist[nb.index()] == d - 1)?;
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}
