//! Benchmarks for consistency validation over generated layered graphs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use weft_core::graph::Graph;

/// Build a layered graph: `layers` rows of `width` operations, each
/// operation depending on every operation in the previous row.
fn layered_graph(layers: usize, width: usize) -> Graph {
    let mut graph = Graph::new();
    let entity = graph.add_entity("bench");
    let component = graph.add_component(entity, "ops");

    let mut previous = Vec::new();
    for layer in 0..layers {
        let mut current = Vec::with_capacity(width);
        for column in 0..width {
            let op = graph.add_operation(component, format!("op-{layer}-{column}"));
            for &upstream in &previous {
                graph.add_relation(upstream, op, "layer link");
            }
            current.push(op);
        }
        previous = current;
    }
    graph
}

fn bench_link_symmetry(c: &mut Criterion) {
    let graph = layered_graph(16, 16);
    c.bench_function("validate_link_symmetry", |b| {
        b.iter(|| black_box(&graph).validate_link_symmetry().is_ok())
    });
}

fn bench_valency(c: &mut Criterion) {
    c.bench_function("validate_valency", |b| {
        b.iter_batched(
            || layered_graph(16, 16),
            |mut graph| graph.validate_valency().is_ok(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_link_symmetry, bench_valency);
criterion_main!(benches);
