#[macro_use]
extern crate criterion;

extern crate weighted_sokoban;

use criterion::{Benchmark, Criterion};

use weighted_sokoban::{LoadWarehouse, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_corridor(c: &mut Criterion) {
    // one box, forced path
    bench_level(c, "levels/01-corridor.txt", 100);
}

#[allow(unused)]
fn bench_two_boxes(c: &mut Criterion) {
    // two weighted boxes
    bench_level(c, "levels/02-two-boxes.txt", 100);
}

#[allow(unused)]
fn bench_no_solution(c: &mut Criterion) {
    // exhausts the whole state space
    bench_level(c, "levels/03-no-solution.txt", 100);
}

fn bench_level(c: &mut Criterion, level_path: &str, samples: usize) {
    let warehouse = level_path.load_warehouse().unwrap();

    c.bench(
        "solve",
        Benchmark::new(level_path, move |b| {
            b.iter(|| criterion::black_box(warehouse.solve(criterion::black_box(false))))
        }).sample_size(samples),
    );
}

criterion_group!(
    benches,
    bench_corridor,
    bench_two_boxes,
    //bench_no_solution,
);
criterion_main!(benches);
