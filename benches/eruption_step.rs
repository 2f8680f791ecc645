//! Benchmarks for the per-frame simulation step and software rendering.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use volcano::{Canvas, Eruptor, FrameDriver, SimulationConfig};

/// A driver in steady state: a continuous eruption with `per_frame` particles
/// spawned every frame, run long enough that culling keeps pace with spawning.
fn steady_driver(per_frame: u32) -> FrameDriver<volcano::EruptionController> {
    let config = SimulationConfig {
        frequency: 1,
        duration: 1_000_000,
        downtime: 0,
        concurrent_expulsions: per_frame,
        seed: Some(7),
        ..Default::default()
    };
    let mut driver = FrameDriver::from_config(&config).expect("valid bench config");
    driver.run(200);
    driver
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for per_frame in [10, 100, 1_000] {
        let driver = steady_driver(per_frame);
        let live = driver.planet().eruptor().particles().len();
        group.bench_with_input(BenchmarkId::new("live", live), &driver, |b, driver| {
            b.iter_batched(
                || driver.clone(),
                |mut driver| black_box(driver.advance()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_draw");

    for per_frame in [10, 1_000] {
        let driver = steady_driver(per_frame);
        let mut canvas = Canvas::for_planet(driver.planet());
        let live = driver.planet().eruptor().particles().len();
        group.bench_function(BenchmarkId::new("live", live), |b| {
            b.iter(|| {
                canvas.draw(black_box(driver.planet()));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_draw);
criterion_main!(benches);
