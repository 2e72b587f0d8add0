//! Criterion benchmarks for the hot paths of the pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logfunnel::prelude::*;

fn bench_emit(c: &mut Criterion) {
    let queue = SharedQueue::new();
    let emitter = EmitterHandle::new(queue.clone(), LogLevel::Info);

    c.bench_function("emit_plain", |b| {
        b.iter(|| {
            emitter.info(black_box("worker.bench"), black_box("benchmark record"));
        });
    });

    c.bench_function("emit_deferred_args", |b| {
        b.iter(|| {
            emitter.emit(
                LogLevel::Info,
                black_box("worker.bench"),
                black_box("batch {} took {} ms"),
                vec![ArgValue::from(42i64), ArgValue::from(7i64)],
            );
        });
    });

    c.bench_function("emit_filtered_out", |b| {
        b.iter(|| {
            emitter.debug(black_box("worker.bench"), black_box("below threshold"));
        });
    });
}

fn bench_format(c: &mut Criterion) {
    let formatter = LineFormatter::new();
    let record = LogRecord::new(
        "worker.depth.matcher",
        LogLevel::Warning,
        Message::new(
            "gap of {} events on {}",
            vec![ArgValue::from(17i64), ArgValue::from("bitstamp")],
        ),
    );

    c.bench_function("format_line", |b| {
        b.iter(|| formatter.format(black_box(&record)).unwrap());
    });
}

fn bench_monitor(c: &mut Criterion) {
    let mut monitor = BackpressureMonitor::new(SharedQueue::new(), "bench queue", 100).unwrap();

    c.bench_function("monitor_observe", |b| {
        let mut size = 0usize;
        b.iter(|| {
            size = (size + 37) % 1000;
            monitor.observe(black_box(size))
        });
    });
}

criterion_group!(benches, bench_emit, bench_format, bench_monitor);
criterion_main!(benches);
