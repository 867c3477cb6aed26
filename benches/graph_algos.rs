use criterion::{black_box, criterion_group, criterion_main, Criterion};

use molgraph::{
    canonical_ranks, CycleSearch, Graph, MatchConfig, Pattern, DEFAULT_MAX_PATHS,
};

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

/// Two hexagons sharing an edge.
fn fused_rings() -> Graph<(), ()> {
    Graph::from_edges(
        10,
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 0),
            (4, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 5),
        ],
    )
}

fn bench_cycles(c: &mut Criterion) {
    let k6 = complete(6);
    let ring12 = ring(12);
    let fused = fused_rings();

    let mut group = c.benchmark_group("cycles");

    group.bench_function("k6", |b| {
        b.iter(|| black_box(CycleSearch::run(black_box(&k6), DEFAULT_MAX_PATHS)))
    });
    group.bench_function("ring12", |b| {
        b.iter(|| black_box(CycleSearch::run(black_box(&ring12), DEFAULT_MAX_PATHS)))
    });
    group.bench_function("fused_rings", |b| {
        b.iter(|| black_box(CycleSearch::run(black_box(&fused), DEFAULT_MAX_PATHS)))
    });

    group.finish();
}

fn bench_canonical(c: &mut Criterion) {
    let ring12 = ring(12);
    let fused = fused_rings();

    let mut group = c.benchmark_group("canonical");

    group.bench_function("ring12", |b| {
        b.iter(|| black_box(canonical_ranks(black_box(&ring12), |_, _| 1)))
    });
    group.bench_function("fused_rings", |b| {
        b.iter(|| black_box(canonical_ranks(black_box(&fused), |_, _| 1)))
    });

    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let fused = fused_rings();

    let mut hexagon: Pattern<(), ()> = Pattern::new();
    let nodes: Vec<usize> = (0..6).map(|_| hexagon.add_node(|_| true)).collect();
    for i in 0..6 {
        hexagon.add_edge(nodes[i], nodes[(i + 1) % 6], |_| true);
    }

    let mut group = c.benchmark_group("matching");

    group.bench_function("hexagon_in_fused_rings", |b| {
        b.iter(|| {
            black_box(
                hexagon
                    .count_maps(black_box(&fused), MatchConfig::default())
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_cycles, bench_canonical, bench_matching);
criterion_main!(benches);
