use criterion::{Criterion, criterion_group, criterion_main};
use rem_rewriter::{Options, rewrite_value};
use std::hint::black_box;

/// Typical declaration text with nothing to rewrite.
const PLAIN_VALUE: &str = "1px solid rgba(33, 37, 41, 0.25) url(corner.png) no-repeat";

/// A shorthand with several literals, the hot path of real sheets.
const LITERAL_VALUE: &str = "0.1875rem 0.375rem 1.5rem 2rem";

/// Protected spans that force the scanner through every alternative.
const PROTECTED_VALUE: &str = "var(--example-2rem, 3rem) url(2rem.png) \"2rem\"";

fn bench_rewrite_value(criterion: &mut Criterion) {
    let options = Options::default();
    criterion.bench_function("rewrite_value_short_circuit", |bencher| {
        bencher.iter(|| black_box(rewrite_value(black_box(PLAIN_VALUE), &options)));
    });
    criterion.bench_function("rewrite_value_literals", |bencher| {
        bencher.iter(|| black_box(rewrite_value(black_box(LITERAL_VALUE), &options)));
    });
    criterion.bench_function("rewrite_value_protected", |bencher| {
        bencher.iter(|| black_box(rewrite_value(black_box(PROTECTED_VALUE), &options)));
    });
}

criterion_group!(rewrite_benches, bench_rewrite_value);
criterion_main!(rewrite_benches);
