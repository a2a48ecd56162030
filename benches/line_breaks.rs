use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use edittrack::{EditableTextModel, LineBreakIndexer, SoftWrapOffsets, TextValue};
use std::time::Duration;

/// 行区切り計算のベンチマーク
fn bench_compute_breaks(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_breaks");
    group.measurement_time(Duration::from_secs(10));

    // 短い行が大量にあるテキスト
    let many_lines = TextValue::new("line of text\n".repeat(5000));
    let no_soft = SoftWrapOffsets::new();
    group.bench_function("many_hard_lines", |b| {
        b.iter_batched(
            LineBreakIndexer::new,
            |mut indexer| {
                indexer.compute_breaks(black_box(&many_lines), &no_soft);
            },
            BatchSize::SmallInput,
        )
    });

    // 1段落を折り返しで区切ったテキスト
    let paragraph = TextValue::new("word ".repeat(10000));
    let soft: SoftWrapOffsets = (0..paragraph.len()).step_by(80).collect();
    group.bench_function("soft_wrapped_paragraph", |b| {
        b.iter_batched(
            LineBreakIndexer::new,
            |mut indexer| {
                indexer.compute_breaks(black_box(&paragraph), &soft);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// キャッシュ済みの行クエリ
fn bench_line_queries(c: &mut Criterion) {
    let text = TextValue::new("line of text\n".repeat(5000));
    let mut indexer = LineBreakIndexer::new();
    indexer.compute_breaks(&text, &SoftWrapOffsets::new());

    c.bench_function("line_index_of", |b| {
        b.iter(|| {
            for offset in (0..text.len()).step_by(97) {
                black_box(indexer.line_index_of(black_box(offset)));
            }
        })
    });
}

/// カーソル移動イベントの処理
fn bench_cursor_updates(c: &mut Criterion) {
    let text = "line of text\n".repeat(1000);
    c.bench_function("caret_walk", |b| {
        b.iter_batched(
            || EditableTextModel::initialize(text.clone(), 0, 0, false, true),
            |mut model| {
                for caret in (0..13_000).step_by(13) {
                    black_box(model.update(text.as_str(), caret, caret));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_compute_breaks, bench_line_queries, bench_cursor_updates);
criterion_main!(benches);
