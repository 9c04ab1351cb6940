use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_engine::Engine;
use editor_engine::fold_levels::{SC_FOLDLEVELBASE, SC_FOLDLEVELHEADERFLAG};
use editor_engine::messages::*;

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (editor-engine benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn engine_with(text: &str) -> Engine {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, text);
    engine
}

fn bench_set_text(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("set_text/50k_lines", |b| {
        b.iter(|| {
            let engine = engine_with(black_box(&text));
            black_box(engine.dispatch(SCI_GETLINECOUNT, 0, 0));
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("typing_middle/100_chars", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with(&text);
                let middle = engine.dispatch(SCI_GETLENGTH, 0, 0).as_int() / 2;
                engine.dispatch(SCI_GOTOPOS, middle, 0);
                engine
            },
            |mut engine| {
                for _ in 0..100 {
                    engine.type_char('x');
                }
                black_box(engine.dispatch(SCI_GETLENGTH, 0, 0));
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_search_in_target(c: &mut Criterion) {
    let text = large_text(50_000);
    let mut engine = engine_with(&text);
    c.bench_function("search_in_target/last_line", |b| {
        b.iter(|| {
            engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
            black_box(engine.dispatch(SCI_SEARCHINTARGET, 0, "049999 the"));
        })
    });
}

fn bench_indicator_fill(c: &mut Criterion) {
    let text = large_text(20_000);
    c.bench_function("indicator_fill/every_other_word", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with(&text);
                engine.dispatch(SCI_SETINDICATORCURRENT, 8, 0);
                engine
            },
            |mut engine| {
                let len = engine.dispatch(SCI_GETLENGTH, 0, 0).as_int();
                let mut position = 0;
                while position < len {
                    engine.dispatch(SCI_INDICATORFILLRANGE, position, 5);
                    position += 12;
                }
                black_box(engine.dispatch(SCI_INDICATORVALUEAT, 8, len / 2));
            },
            BatchSize::LargeInput,
        )
    });
}

/// Every tenth line becomes a header over the nine lines after it.
fn fold_every_tenth(engine: &mut Engine, line_count: usize) {
    for line in 0..line_count {
        let level = if line % 10 == 0 {
            SC_FOLDLEVELBASE | SC_FOLDLEVELHEADERFLAG
        } else {
            SC_FOLDLEVELBASE + 1
        };
        engine.dispatch(SCI_SETFOLDLEVEL, line, level);
    }
}

fn bench_fold_all(c: &mut Criterion) {
    let text = large_text(20_000);
    let mut engine = engine_with(&text);
    fold_every_tenth(&mut engine, 20_000);
    c.bench_function("fold_all/20k_lines", |b| {
        b.iter(|| {
            engine.dispatch(SCI_FOLDALL, 0, 0);
            engine.dispatch(SCI_FOLDALL, 1, 0);
            black_box(engine.contraction().lines_displayed());
        })
    });
}

fn bench_line_breaks_with_folds(c: &mut Criterion) {
    let text = large_text(100_000);
    c.bench_function("line_breaks/100k_lines_folded", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with(&text);
                fold_every_tenth(&mut engine, 100_000);
                engine.dispatch(SCI_FOLDALL, 0, 0);
                let middle = engine.dispatch(SCI_POSITIONFROMLINE, 50_001, 0).as_int();
                (engine, middle)
            },
            |(mut engine, middle)| {
                for _ in 0..200 {
                    engine.dispatch(SCI_INSERTTEXT, middle, "\n");
                    engine.dispatch(SCI_DELETERANGE, middle, 1);
                }
                black_box(engine.contraction().lines_displayed());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_set_text,
    bench_typing_in_middle,
    bench_search_in_target,
    bench_indicator_fill,
    bench_fold_all,
    bench_line_breaks_with_folds
);
criterion_main!(benches);
