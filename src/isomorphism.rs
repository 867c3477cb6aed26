use std::fmt;

use petgraph::graph::NodeIndex;

use crate::graph::Graph;

/// Default step budget for a single search. One step is one candidate
/// feasibility test; well beyond anything a molecular-sized query needs.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

pub type VertexMatcher<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;
pub type EdgeMatcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// A complete pattern-to-target assignment: `(pattern node, target
/// vertex)` pairs, ordered by pattern node, injective on both sides.
pub type Mapping = Vec<(usize, NodeIndex)>;

/// Whether edge predicates participate in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Every pattern edge's predicate must accept the target edge.
    Strict,
    /// Target adjacency alone is enough; edge predicates are ignored.
    Topology,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_steps: usize,
    pub edge_mode: EdgeMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            edge_mode: EdgeMode::Strict,
        }
    }
}

/// Errors from a bounded isomorphism search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The search exceeded its step budget before reaching a definite
    /// answer. Callers must treat this as "unknown", never as "no
    /// mapping exists".
    Intractable { steps: usize },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intractable { steps } => {
                write!(f, "isomorphism search exceeded its budget of {steps} steps")
            }
        }
    }
}

impl std::error::Error for MatchError {}

struct PatternEdge<E> {
    a: usize,
    b: usize,
    matcher: EdgeMatcher<E>,
}

/// A query graph of matcher-decorated nodes and edges, compiled once and
/// reusable across targets. Matching never mutates the pattern, so one
/// compiled pattern may serve concurrent searches.
pub struct Pattern<V, E> {
    nodes: Vec<VertexMatcher<V>>,
    edges: Vec<PatternEdge<E>>,
    // adjacency[node] = (neighbor node, edge index)
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl<V, E> Pattern<V, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn add_node(&mut self, matcher: impl Fn(&V) -> bool + Send + Sync + 'static) -> usize {
        self.nodes.push(Box::new(matcher));
        self.adjacency.push(Vec::new());
        self.nodes.len() - 1
    }

    /// Connects two pattern nodes. Panics on out-of-range node ids
    /// (caller contract).
    pub fn add_edge(
        &mut self,
        a: usize,
        b: usize,
        matcher: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> usize {
        assert!(a < self.nodes.len() && b < self.nodes.len(), "pattern node out of range");
        let idx = self.edges.len();
        self.edges.push(PatternEdge {
            a,
            b,
            matcher: Box::new(matcher),
        });
        self.adjacency[a].push((b, idx));
        self.adjacency[b].push((a, idx));
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether at least one complete mapping into `target` exists.
    pub fn has_map(&self, target: &Graph<V, E>, config: MatchConfig) -> Result<bool, MatchError> {
        Ok(self.get_first_map(target, config)?.is_some())
    }

    /// The first complete mapping found, stopping the search early. Far
    /// cheaper than enumerating all mappings for yes/no tests.
    pub fn get_first_map(
        &self,
        target: &Graph<V, E>,
        config: MatchConfig,
    ) -> Result<Option<Mapping>, MatchError> {
        let mut found = None;
        self.search(target, config, |mapping| {
            found = Some(mapping);
            true
        })?;
        Ok(found)
    }

    /// Every complete mapping; more than one for symmetric patterns.
    pub fn get_maps(
        &self,
        target: &Graph<V, E>,
        config: MatchConfig,
    ) -> Result<Vec<Mapping>, MatchError> {
        let mut maps = Vec::new();
        self.search(target, config, |mapping| {
            maps.push(mapping);
            false
        })?;
        Ok(maps)
    }

    /// The total number of complete mappings.
    pub fn count_maps(&self, target: &Graph<V, E>, config: MatchConfig) -> Result<usize, MatchError> {
        let mut count = 0;
        self.search(target, config, |_| {
            count += 1;
            false
        })?;
        Ok(count)
    }

    /// Depth-first backtracking over an explicit frame stack. `emit`
    /// receives each complete mapping and returns `true` to stop the
    /// whole search.
    fn search(
        &self,
        target: &Graph<V, E>,
        config: MatchConfig,
        mut emit: impl FnMut(Mapping) -> bool,
    ) -> Result<(), MatchError> {
        let k = self.nodes.len();
        if k == 0 {
            // The empty pattern has exactly one (empty) mapping.
            emit(Vec::new());
            return Ok(());
        }

        // Highest-degree pattern nodes first: fail early on the most
        // constrained assignments.
        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by(|&a, &b| self.adjacency[b].len().cmp(&self.adjacency[a].len()));

        let t = target.vertex_count();
        let mut node_map: Vec<Option<NodeIndex>> = vec![None; k];
        let mut target_used = vec![false; t];
        // next[d] = next target index to try at search depth d
        let mut next = vec![0usize; k];
        let mut depth = 0usize;
        let mut steps = 0usize;

        loop {
            if depth == k {
                let mapping: Mapping = (0..k)
                    .map(|p| (p, node_map[p].expect("complete mapping")))
                    .collect();
                if emit(mapping) {
                    return Ok(());
                }
                depth -= 1;
                let p = order[depth];
                let mapped = node_map[p].take().expect("mapped at this depth");
                target_used[mapped.index()] = false;
                continue;
            }

            let p = order[depth];
            let mut advanced = false;
            while next[depth] < t {
                let candidate = next[depth];
                next[depth] += 1;
                if target_used[candidate] {
                    continue;
                }
                steps += 1;
                if steps > config.max_steps {
                    return Err(MatchError::Intractable { steps });
                }
                let cand = NodeIndex::new(candidate);
                if !self.is_feasible(target, &node_map, p, cand, config.edge_mode) {
                    continue;
                }
                node_map[p] = Some(cand);
                target_used[candidate] = true;
                depth += 1;
                if depth < k {
                    next[depth] = 0;
                }
                advanced = true;
                break;
            }
            if advanced {
                continue;
            }
            if depth == 0 {
                return Ok(());
            }
            next[depth] = 0;
            depth -= 1;
            let p = order[depth];
            let mapped = node_map[p].take().expect("mapped at this depth");
            target_used[mapped.index()] = false;
        }
    }

    /// A candidate is feasible when its vertex matcher accepts the target
    /// vertex and every pattern edge to an already-mapped neighbor has a
    /// target edge (passing the edge matcher in strict mode).
    fn is_feasible(
        &self,
        target: &Graph<V, E>,
        node_map: &[Option<NodeIndex>],
        pattern_node: usize,
        candidate: NodeIndex,
        edge_mode: EdgeMode,
    ) -> bool {
        if !(self.nodes[pattern_node])(target.vertex(candidate)) {
            return false;
        }
        for &(neighbor, edge_idx) in &self.adjacency[pattern_node] {
            let Some(mapped) = node_map[neighbor] else {
                continue;
            };
            let satisfied = match edge_mode {
                EdgeMode::Topology => target.edge_between(candidate, mapped).is_some(),
                EdgeMode::Strict => target
                    .edges_between(candidate, mapped)
                    .any(|e| (self.edges[edge_idx].matcher)(target.edge(e))),
            };
            if !satisfied {
                return false;
            }
        }
        true
    }
}

impl<V, E> Default for Pattern<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> fmt::Debug for Pattern<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}
