//! Benchmarks for dominator-tree construction.
//!
//! The workload is a ladder CFG: a chain of if-then-else diamonds, which is
//! the reducible shape structured source compiles to and exercises the LCA
//! folding on every join point.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flowdom::prelude::*;

/// Builds a chain of `rungs` if-then-else diamonds between START and END.
fn ladder(rungs: usize) -> FlowGraph<()> {
    let mut cfg = FlowGraph::with_endpoints();
    let start = cfg.start().unwrap();
    let end = cfg.end().unwrap();
    cfg.clear_successors(start).unwrap();

    let mut previous = start;
    for rung in 0..rungs {
        let cond = cfg.add_node(format!("cond{rung}")).unwrap();
        let then = cfg.add_node(format!("then{rung}")).unwrap();
        let els = cfg.add_node(format!("else{rung}")).unwrap();
        let join = cfg.add_node(format!("join{rung}")).unwrap();
        cfg.add_edge(previous, cond).unwrap();
        cfg.add_edges(cond, &[then, els]).unwrap();
        cfg.add_edge(then, join).unwrap();
        cfg.add_edge(els, join).unwrap();
        previous = join;
    }
    cfg.add_edge(previous, end).unwrap();
    cfg
}

fn bench_traversal(c: &mut Criterion) {
    let cfg = ladder(256);
    let start = cfg.start().unwrap();

    c.bench_function("post_order/ladder_256", |b| {
        b.iter(|| post_order(black_box(&cfg), black_box(start)));
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_dominator_tree");
    for rungs in [16usize, 64, 256] {
        let cfg = ladder(rungs);
        group.bench_with_input(BenchmarkId::new("single_pass", rungs), &cfg, |b, cfg| {
            b.iter(|| build_dominator_tree_with(black_box(cfg), DominatorMethod::SinglePass));
        });
        group.bench_with_input(BenchmarkId::new("fixpoint", rungs), &cfg, |b, cfg| {
            b.iter(|| build_dominator_tree_with(black_box(cfg), DominatorMethod::Fixpoint));
        });
    }
    group.finish();
}

fn bench_post_dominators(c: &mut Criterion) {
    let cfg = ladder(64);

    c.bench_function("post_dominators/ladder_64", |b| {
        b.iter(|| build_dominator_tree(black_box(&cfg.reverse_edges())));
    });
}

criterion_group!(benches, bench_traversal, bench_build, bench_post_dominators);
criterion_main!(benches);
