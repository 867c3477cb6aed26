use petgraph::graph::NodeIndex;

use crate::graph::Graph;

/// Position of each vertex in the ascending-degree ordering, ties broken
/// by vertex index. Always a permutation of `0..n`. Processing vertices in
/// this order keeps the cycle enumerator's intermediate path graph small.
pub fn rank_from_degrees(degrees: &[usize]) -> Vec<usize> {
    let n = degrees.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&v| (degrees[v], v));
    let mut rank = vec![0usize; n];
    for (pos, &v) in order.iter().enumerate() {
        rank[v] = pos;
    }
    rank
}

pub fn degree_rank<V, E>(graph: &Graph<V, E>) -> Vec<usize> {
    let degrees: Vec<usize> = graph.vertices().map(|v| graph.degree(v)).collect();
    rank_from_degrees(&degrees)
}

/// Inverts a rank array into an explicit visiting sequence:
/// `vertices_in_order(rank)[r]` is the vertex with rank `r`.
pub fn vertices_in_order(rank: &[usize]) -> Vec<NodeIndex> {
    let mut order = vec![NodeIndex::new(0); rank.len()];
    for (v, &r) in rank.iter().enumerate() {
        order[r] = NodeIndex::new(v);
    }
    order
}
