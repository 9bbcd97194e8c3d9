use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use term_automata::{ConwayState, Coordinate, Neighborhood, Pattern, Simulation, Topology};

const SEED: u64 = 42;

fn soup(size: u32, neighborhood: Neighborhood, topology: Topology) -> Simulation<ConwayState> {
    let pattern = Pattern::random(size - 1, size - 1, 0.3, Some(SEED)).unwrap();
    let mut sim = Simulation::new(size - 1, size - 1)
        .unwrap()
        .with_neighborhood(neighborhood)
        .with_topology(topology);
    sim.seed(&pattern, Coordinate::ORIGIN, ConwayState).unwrap();
    sim
}

/// Cell updates per second for square random soups of growing sides.
fn step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simulation step");

    for size in [64, 128, 256] {
        group.throughput(Throughput::Elements(u64::from(size * size)));
        for (neighborhood, topology) in [
            (Neighborhood::Moore, Topology::Bounded),
            (Neighborhood::Moore, Topology::Torus),
            (Neighborhood::VonNeumann, Topology::Bounded),
        ] {
            let mut sim = soup(size, neighborhood, topology);
            group.bench_with_input(
                BenchmarkId::new(format!("{}/{:?}", neighborhood, topology), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        sim.step().unwrap();
                        black_box(sim.population())
                    });
                },
            );
        }
    }

    group.finish();
}

fn snapshot_benchmark(c: &mut Criterion) {
    let sim = soup(256, Neighborhood::Moore, Topology::Bounded);
    c.bench_function("snapshot 256x256", |b| b.iter(|| black_box(sim.snapshot())));
}

criterion_group!(benches, step_benchmark, snapshot_benchmark);
criterion_main!(benches);
