use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::graph::Graph;
use crate::rank::{degree_rank, vertices_in_order};

/// Default ceiling on the number of live paths during cycle enumeration.
/// Elementary-cycle count is worst-case exponential in vertex count, so the
/// enumerator trades completeness for bounded running time once this many
/// paths are alive at once. Generous for molecular-sized graphs; complete
/// graphs up to K7 enumerate fully within it.
pub const DEFAULT_MAX_PATHS: usize = 1000;

/// Exhaustive elementary-cycle enumeration by incremental path-graph
/// collapse: vertices are eliminated in ascending-degree order, splicing
/// the simple paths that meet at each vertex; a splice whose outer
/// endpoints coincide is a discovered cycle.
///
/// When run to completion this yields every elementary cycle exactly once.
/// If the live-path count ever exceeds the `max_paths` ceiling the search
/// stops early and `completed()` reports `false`; the cycles found so far
/// remain valid but are not exhaustive. Incompleteness is an inspectable
/// result state, not an error.
pub struct CycleSearch {
    cycles: Vec<Vec<NodeIndex>>,
    completed: bool,
}

enum Splice {
    Cycle(Vec<usize>),
    Path(Vec<usize>),
    Incompatible,
}

impl CycleSearch {
    pub fn run<V, E>(graph: &Graph<V, E>, max_paths: usize) -> Self {
        let order = vertices_in_order(&degree_rank(graph));

        // The path graph starts with one two-vertex path per edge.
        let mut paths: Vec<Vec<usize>> = graph
            .edges()
            .filter_map(|e| graph.edge_endpoints(e))
            .filter(|(a, b)| a != b)
            .map(|(a, b)| vec![a.index(), b.index()])
            .collect();
        let mut cycles: Vec<Vec<NodeIndex>> = Vec::new();
        let mut completed = true;

        'eliminate: for vertex in order {
            let v = vertex.index();
            let (incident, rest): (Vec<Vec<usize>>, Vec<Vec<usize>>) =
                std::mem::take(&mut paths)
                    .into_iter()
                    .partition(|p| p[0] == v || *p.last().unwrap() == v);
            paths = rest;

            for i in 0..incident.len() {
                for j in (i + 1)..incident.len() {
                    match splice(&incident[i], &incident[j], v) {
                        Splice::Cycle(c) => cycles.push(normalize_cycle(&c)),
                        Splice::Path(p) => {
                            paths.push(p);
                            if paths.len() > max_paths {
                                completed = false;
                                break 'eliminate;
                            }
                        }
                        Splice::Incompatible => {}
                    }
                }
            }
        }

        cycles.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        Self { cycles, completed }
    }

    /// `false` iff enumeration hit the path ceiling before every vertex was
    /// eliminated. Callers must check this before trusting `cycles()` as
    /// exhaustive.
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn size(&self) -> usize {
        self.cycles.len()
    }

    /// Each cycle as a vertex sequence without the repeated closing vertex,
    /// normalized so the smallest vertex comes first and its smaller
    /// neighbor second.
    pub fn cycles(&self) -> &[Vec<NodeIndex>] {
        &self.cycles
    }
}

/// Joins two paths that share the endpoint `v`. The splice is a cycle when
/// the two outer endpoints coincide, a longer path when all other vertices
/// are distinct, and incompatible otherwise.
fn splice(p: &[usize], q: &[usize], v: usize) -> Splice {
    let left: Vec<usize> = if p[0] == v {
        p.iter().rev().copied().collect()
    } else {
        p.to_vec()
    };
    let right: Vec<usize> = if q[0] == v {
        q.to_vec()
    } else {
        q.iter().rev().copied().collect()
    };
    // left runs a..v, right runs v..b
    let a = left[0];
    let b = *right.last().unwrap();

    if a == b {
        if !overlap_within(&left, &right, &[v, a]) {
            return Splice::Incompatible;
        }
        let mut cycle = left;
        cycle.extend_from_slice(&right[1..right.len() - 1]);
        if cycle.len() >= 3 {
            Splice::Cycle(cycle)
        } else {
            Splice::Incompatible
        }
    } else {
        if !overlap_within(&left, &right, &[v]) {
            return Splice::Incompatible;
        }
        let mut path = left;
        path.extend_from_slice(&right[1..]);
        Splice::Path(path)
    }
}

/// True iff every vertex shared by `left` and `right` is in `allowed`.
fn overlap_within(left: &[usize], right: &[usize], allowed: &[usize]) -> bool {
    left.iter()
        .all(|x| allowed.contains(x) || !right.contains(x))
}

fn normalize_cycle(cycle: &[usize]) -> Vec<NodeIndex> {
    let len = cycle.len();
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, v)| v)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(len);
    for i in 0..len {
        normalized.push(cycle[(min_pos + i) % len]);
    }
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized.into_iter().map(NodeIndex::new).collect()
}

/// Marks each vertex that lies on at least one cycle, by iteratively
/// pruning degree-≤1 vertices. Linear, no budget needed.
pub fn cyclic_vertices<V, E>(graph: &Graph<V, E>) -> Vec<bool> {
    let n = graph.vertex_count();
    let mut degree: Vec<usize> = graph.vertices().map(|v| graph.degree(v)).collect();
    let mut in_cycle = vec![true; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| degree[i] <= 1).collect();

    while let Some(v) = queue.pop_front() {
        if !in_cycle[v] {
            continue;
        }
        in_cycle[v] = false;
        for neighbor in graph.neighbors(NodeIndex::new(v)) {
            let u = neighbor.index();
            if in_cycle[u] {
                degree[u] -= 1;
                if degree[u] == 1 {
                    queue.push_back(u);
                }
            }
        }
    }
    in_cycle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Graph<(), ()> {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                edges.push((a, b));
            }
        }
        Graph::from_edges(n, &edges)
    }

    fn ring(n: usize) -> Graph<(), ()> {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::from_edges(n, &edges)
    }

    #[test]
    fn triangle_has_one_cycle() {
        let search = CycleSearch::run(&complete(3), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 1);
        assert_eq!(search.cycles()[0].len(), 3);
    }

    #[test]
    fn six_ring_has_one_cycle() {
        let search = CycleSearch::run(&ring(6), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 1);
        assert_eq!(search.cycles()[0].len(), 6);
    }

    #[test]
    fn acyclic_has_none() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let search = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 0);
    }

    #[test]
    fn k4_has_seven_cycles() {
        let search = CycleSearch::run(&complete(4), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 7);
        let triangles = search.cycles().iter().filter(|c| c.len() == 3).count();
        let squares = search.cycles().iter().filter(|c| c.len() == 4).count();
        assert_eq!(triangles, 4);
        assert_eq!(squares, 3);
    }

    #[test]
    fn k5_has_thirty_seven_cycles() {
        let search = CycleSearch::run(&complete(5), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 37);
    }

    #[test]
    fn k6_has_197_cycles() {
        let search = CycleSearch::run(&complete(6), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 197);
    }

    #[test]
    fn k7_has_1172_cycles() {
        let search = CycleSearch::run(&complete(7), DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 1172);
    }

    #[test]
    fn k12_with_tight_limit_reports_incomplete() {
        let search = CycleSearch::run(&complete(12), 100);
        assert!(!search.completed());
    }

    #[test]
    fn no_duplicate_cycles() {
        let search = CycleSearch::run(&complete(5), DEFAULT_MAX_PATHS);
        let mut seen = search.cycles().to_vec();
        seen.dedup();
        assert_eq!(seen.len(), search.size());
    }

    #[test]
    fn theta_graph_has_three_cycles() {
        // Two hubs joined by three internally disjoint paths.
        let g = Graph::from_edges(5, &[(0, 1), (0, 2), (2, 1), (0, 3), (3, 4), (4, 1)]);
        let search = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 3);
    }

    #[test]
    fn fused_rings_yield_three_cycles() {
        // Two squares sharing an edge: the two faces plus the perimeter.
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (4, 5), (5, 2)]);
        let search = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 3);
        let mut sizes: Vec<usize> = search.cycles().iter().map(|c| c.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![4, 4, 6]);
    }

    #[test]
    fn disjoint_triangles_both_found() {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let search = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        assert!(search.completed());
        assert_eq!(search.size(), 2);
    }

    #[test]
    fn cycles_are_normalized() {
        let search = CycleSearch::run(&ring(5), DEFAULT_MAX_PATHS);
        let cycle = &search.cycles()[0];
        assert_eq!(cycle[0], NodeIndex::new(0));
        assert!(cycle[1] < cycle[cycle.len() - 1]);
    }

    #[test]
    fn repeated_runs_agree() {
        let g = complete(5);
        let a = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        let b = CycleSearch::run(&g, DEFAULT_MAX_PATHS);
        assert_eq!(a.completed(), b.completed());
        assert_eq!(a.cycles(), b.cycles());
    }

    #[test]
    fn cyclic_vertices_ring_with_tail() {
        // Triangle with a two-vertex tail off vertex 0.
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4)]);
        let cyclic = cyclic_vertices(&g);
        assert_eq!(cyclic, vec![true, true, true, false, false]);
    }

    #[test]
    fn cyclic_vertices_acyclic_all_false() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (1, 3)]);
        assert!(cyclic_vertices(&g).iter().all(|&c| !c));
    }

    #[test]
    fn cyclic_vertices_isolated_vertex() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 0)]);
        let cyclic = cyclic_vertices(&g);
        assert_eq!(cyclic, vec![true, true, true, false]);
    }
}
