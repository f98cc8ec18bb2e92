use criterion::{criterion_group, criterion_main, Criterion};
use gapedit::document::Document;
use std::hint::black_box;

fn buffer_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_edit");

    group.bench_function("insert_sequential", |b| {
        b.iter_batched(
            Document::new,
            |mut doc| {
                for _ in 0..10_000 {
                    let at = doc.cursor();
                    doc.insert(at, b"x");
                }
                black_box(doc.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("insert_scattered", |b| {
        b.iter_batched(
            || Document::from_bytes(&vec![b'a'; 64 * 1024]),
            |mut doc| {
                // Alternate ends to force gap moves between inserts
                for i in 0..1_000 {
                    let at = if i % 2 == 0 { 0 } else { doc.len() };
                    doc.insert(at, b"x");
                }
                black_box(doc.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("delete_backward", |b| {
        b.iter_batched(
            || {
                let mut doc = Document::from_bytes(&vec![b'a'; 16 * 1024]);
                doc.navigate(doc.len(), false);
                doc
            },
            |mut doc| {
                for _ in 0..10_000 {
                    let cursor = doc.cursor();
                    if cursor == 0 {
                        break;
                    }
                    black_box(doc.delete_range(cursor - 1, cursor));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn buffer_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_navigation");

    group.bench_function("navigate_far", |b| {
        b.iter_batched(
            || Document::from_bytes(&vec![b'a'; 1024 * 1024]),
            |mut doc| {
                // Bounce the gap across the whole buffer
                for _ in 0..100 {
                    let end = doc.len();
                    doc.navigate(end, false);
                    doc.navigate(0, false);
                }
                black_box(doc.cursor());
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, buffer_edit, buffer_navigation);
criterion_main!(benches);
