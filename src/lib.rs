pub mod components;
pub mod cycles;
pub mod disjoint_set;
pub mod graph;
pub mod invariant;
pub mod isomorphism;
pub mod paths;
pub mod rank;

pub use components::{fragments, ConnectedComponents};
pub use cycles::{cyclic_vertices, CycleSearch, DEFAULT_MAX_PATHS};
pub use disjoint_set::DisjointSetForest;
pub use graph::Graph;
pub use invariant::{
    canonical_ranks, equivalence_classes, refine_invariants, InvariantError, DEFAULT_MAX_ROUNDS,
};
pub use isomorphism::{EdgeMode, MatchConfig, MatchError, Mapping, Pattern, DEFAULT_MAX_STEPS};
pub use paths::{adjacency_matrix, bfs_distances, distance_matrix, shortest_path};
pub use rank::{degree_rank, rank_from_degrees, vertices_in_order};
