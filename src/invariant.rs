use std::fmt;
use std::hash::{Hash, Hasher};

use petgraph::graph::NodeIndex;

use crate::cycles::cyclic_vertices;
use crate::graph::Graph;

/// Default bound on refinement rounds. The partition can refine at most
/// `n - 1` times, so this only matters for very large graphs.
pub const DEFAULT_MAX_ROUNDS: usize = 64;

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

/// Errors from invariant refinement preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// The invariant array length does not match the vertex count.
    LengthMismatch { expected: usize, got: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, got } => {
                write!(f, "invariant array length {got} != vertex count {expected}")
            }
        }
    }
}

impl std::error::Error for InvariantError {}

fn count_distinct(values: &[u64]) -> usize {
    let mut sorted: Vec<u64> = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

fn recombine<V, E>(graph: &Graph<V, E>, invariants: &[u64]) -> Vec<u64> {
    let mut next = vec![0u64; invariants.len()];
    for vertex in graph.vertices() {
        let i = vertex.index();
        let mut neighbor_values: Vec<u64> = graph
            .neighbors(vertex)
            .map(|nb| invariants[nb.index()])
            .collect();
        neighbor_values.sort_unstable();

        let mut h = Fnv1aHasher::new();
        invariants[i].hash(&mut h);
        neighbor_values.hash(&mut h);
        next[i] = h.finish();
    }
    next
}

fn refine_loop<V, E>(graph: &Graph<V, E>, invariants: &mut [u64], max_rounds: usize) -> usize {
    let mut prev_distinct = count_distinct(invariants);
    let mut rounds = 0;
    while rounds < max_rounds {
        let next = recombine(graph, invariants);
        let distinct = count_distinct(&next);
        if distinct <= prev_distinct {
            break;
        }
        invariants.copy_from_slice(&next);
        prev_distinct = distinct;
        rounds += 1;
    }
    rounds
}

/// Iteratively recombines each vertex's invariant with the sorted multiset
/// of its neighbors' invariants until the equal-value partition stops
/// getting finer (or `max_rounds` is hit). Returns the number of rounds
/// applied. Two automorphic vertices always keep equal values, so the
/// final partition never separates an orbit.
pub fn refine_invariants<V, E>(
    graph: &Graph<V, E>,
    invariants: &mut [u64],
    max_rounds: usize,
) -> Result<usize, InvariantError> {
    if invariants.len() != graph.vertex_count() {
        return Err(InvariantError::LengthMismatch {
            expected: graph.vertex_count(),
            got: invariants.len(),
        });
    }
    Ok(refine_loop(graph, invariants, max_rounds))
}

/// Partitions vertex indices by invariant value; classes ordered by
/// ascending value, members ascending.
pub fn equivalence_classes(invariants: &[u64]) -> Vec<Vec<usize>> {
    let mut indexed: Vec<(u64, usize)> = invariants
        .iter()
        .copied()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();
    indexed.sort_unstable();

    let mut classes: Vec<Vec<usize>> = Vec::new();
    for (value, i) in indexed {
        match classes.last_mut() {
            Some(class) if invariants[class[0]] == value => class.push(i),
            _ => classes.push(vec![i]),
        }
    }
    classes
}

/// A perturbed value guaranteed distinct from every value currently in use.
fn perturbed(value: u64, existing: &[u64]) -> u64 {
    let mut candidate = value;
    loop {
        let mut h = Fnv1aHasher::new();
        candidate.hash(&mut h);
        0x9e3779b97f4a7c15u64.hash(&mut h);
        candidate = h.finish();
        if !existing.contains(&candidate) {
            return candidate;
        }
    }
}

/// Index-independent signature of an invariant assignment: the sorted
/// value multiset. Automorphic trial perturbations produce equal traces.
fn trace(invariants: &[u64]) -> Vec<u64> {
    let mut t = invariants.to_vec();
    t.sort_unstable();
    t
}

/// Chooses the class to shatter: the smallest class of size > 1 whose
/// members all lie on cycles, ties broken by lowest invariant value;
/// falls back to the smallest class overall when no all-cyclic class
/// exists (acyclic symmetry still has to be broken for termination).
fn select_class(classes: &[Vec<usize>], invariants: &[u64], cyclic: &[bool]) -> Option<Vec<usize>> {
    let ring_tied = classes
        .iter()
        .filter(|c| c.len() > 1 && c.iter().all(|&m| cyclic[m]))
        .min_by_key(|c| (c.len(), invariants[c[0]]));
    ring_tied
        .or_else(|| {
            classes
                .iter()
                .filter(|c| c.len() > 1)
                .min_by_key(|c| (c.len(), invariants[c[0]]))
        })
        .cloned()
}

/// Canonical rank assignment: seeds each vertex through the caller's
/// encoder, refines to a fixed point, then repeatedly shatters the chosen
/// equivalence class until every class is a singleton. Each shattering
/// trial-perturbs every member of the class and keeps the candidate whose
/// refined trace is lexicographically smallest, so the outcome depends
/// only on graph structure and seeds, never on vertex numbering.
///
/// Isomorphic graphs seeded from isomorphism-invariant vertex properties
/// converge to the same rank sequence under their canonical orders.
pub fn canonical_ranks<V, E, F>(graph: &Graph<V, E>, seed: F) -> Vec<usize>
where
    F: Fn(NodeIndex, &V) -> u64,
{
    let n = graph.vertex_count();
    if n == 0 {
        return Vec::new();
    }

    let mut invariants: Vec<u64> = graph
        .vertices()
        .map(|v| {
            let mut h = Fnv1aHasher::new();
            seed(v, graph.vertex(v)).hash(&mut h);
            h.finish()
        })
        .collect();
    refine_loop(graph, &mut invariants, DEFAULT_MAX_ROUNDS);

    let cyclic = cyclic_vertices(graph);

    loop {
        let classes = equivalence_classes(&invariants);
        let Some(class) = select_class(&classes, &invariants, &cyclic) else {
            break;
        };

        let mut best: Option<(Vec<u64>, Vec<u64>)> = None;
        for &member in &class {
            let mut trial = invariants.clone();
            trial[member] = perturbed(trial[member], &trial);
            refine_loop(graph, &mut trial, DEFAULT_MAX_ROUNDS);
            let t = trace(&trial);
            if best.as_ref().is_none_or(|(bt, _)| t < *bt) {
                best = Some((t, trial));
            }
        }
        // The class has >= 2 members, so a best trial always exists.
        invariants = best.expect("non-empty equivalence class").1;
    }

    // All values distinct: rank by ascending value.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| invariants[i]);
    let mut ranks = vec![0usize; n];
    for (rank, &i) in order.iter().enumerate() {
        ranks[i] = rank;
    }
    ranks
}
