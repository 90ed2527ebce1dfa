//! Benchmarks for per-sample path regeneration at full window

use breathscope_chart::{
    Capabilities, ChartConfig, ContainerRegistry, StreamingChart, SvgSurface,
};
use breathscope_core::ManualClock;
use breathscope_anim::{ImmediateScheduler, TweenEngine};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec2;

fn full_chart(capacity: usize, caps: Capabilities) -> (StreamingChart<SvgSurface>, ManualClock) {
    let mut registry = ContainerRegistry::new();
    registry.create("#breathChart", Vec2::new(800.0, 200.0));
    let clock = ManualClock::new();
    let mut chart = StreamingChart::attach(
        &registry,
        "#breathChart",
        ChartConfig::default().with_max_data_points(capacity),
        caps.with_clock(clock.clone()),
    )
    .expect("chart");

    for i in 0..capacity {
        clock.advance_millis(150);
        let t = i as f64 * 0.1;
        chart.add_data_point(22.0 + t.sin(), 33.0 + t.cos());
    }
    chart.on_frame(1.0);
    (chart, clock)
}

fn bench_ingest_full_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_full_window");

    for capacity in [100, 400, 1000] {
        group.throughput(Throughput::Elements(capacity as u64));

        group.bench_with_input(
            BenchmarkId::new("immediate", capacity),
            &capacity,
            |b, &capacity| {
                let (mut chart, clock) = full_chart(capacity, Capabilities::immediate());
                let mut t = 0.0f64;
                b.iter(|| {
                    t += 0.1;
                    clock.advance_millis(150);
                    black_box(chart.add_data_point(22.0 + t.sin(), 33.0 + t.cos()))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("animated", capacity),
            &capacity,
            |b, &capacity| {
                let caps = Capabilities::immediate()
                    .with_tweener(TweenEngine::new())
                    .with_scheduler(ImmediateScheduler);
                let (mut chart, clock) = full_chart(capacity, caps);
                let mut t = 0.0f64;
                b.iter(|| {
                    t += 0.1;
                    clock.advance_millis(150);
                    let outcome = chart.add_data_point(22.0 + t.sin(), 33.0 + t.cos());
                    chart.on_frame(1.0);
                    black_box(outcome)
                });
            },
        );
    }

    group.finish();
}

fn bench_segment_tick(c: &mut Criterion) {
    let caps = Capabilities::immediate()
        .with_tweener(TweenEngine::new())
        .with_scheduler(ImmediateScheduler);
    let (mut chart, clock) = full_chart(400, caps);

    c.bench_function("segment_tick_400", |b| {
        b.iter(|| {
            clock.advance_millis(150);
            chart.add_data_point(black_box(22.5), black_box(33.5));
            for _ in 0..18 {
                chart.on_frame(1.0 / 60.0);
            }
            black_box(chart.last_path_length())
        });
    });
}

criterion_group!(benches, bench_ingest_full_window, bench_segment_tick);
criterion_main!(benches);
