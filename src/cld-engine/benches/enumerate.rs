// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Benchmarks for loop enumeration and scoring on dense diagrams.
//!
//! Complete digraphs have far more simple cycles than any real diagram,
//! so these measure how well the length and count limits bound the search.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cld_engine::cycles::{SearchBounds, enumerate};
use cld_engine::{AnalysisOptions, CausalGraph, Edge, LinkPolarity, Node, analyze_diagram};

/// Every ordered pair of distinct nodes linked, alternating signs.
fn complete_diagram(n: usize) -> (Vec<Node>, Vec<Edge>) {
    let ids: Vec<String> = (0..n).map(|i| format!("n{i:03}")).collect();
    let nodes = ids.iter().map(|id| Node::new(id, "")).collect();
    let mut edges = Vec::with_capacity(n * n);
    for (i, a) in ids.iter().enumerate() {
        for (j, b) in ids.iter().enumerate() {
            if i == j {
                continue;
            }
            let sign = if (i + j) % 2 == 0 {
                LinkPolarity::Positive
            } else {
                LinkPolarity::Negative
            };
            let impact = 1.0 + (i * j % 5) as f64;
            edges.push(Edge::new(a, b, Some(sign)).with_weights(Some(impact), Some(1.0)));
        }
    }
    (nodes, edges)
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    for size in [6, 10, 20, 40] {
        let (nodes, edges) = complete_diagram(size);
        let graph = CausalGraph::new(nodes, edges);
        let bounds = SearchBounds::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(enumerate(graph, bounds)));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let options = AnalysisOptions {
        steering_factors: ["n000".to_owned(), "n001".to_owned()].into_iter().collect(),
        ..AnalysisOptions::default()
    };

    for size in [6, 20] {
        let diagram = complete_diagram(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &diagram, |b, diagram| {
            b.iter(|| {
                let (nodes, edges) = diagram.clone();
                black_box(analyze_diagram(nodes, edges, &options))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enumerate, bench_analyze);
criterion_main!(benches);
