extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use themecast_lib::css::parse_stylesheet;
use themecast_lib::{Options, ThemeExtractor};

fn large_flat_stylesheet() -> String {
    let mut css = String::with_capacity(1_000_000);
    for i in 0..5_000 {
        css.push_str(&format!(
            ".widget-{i} {{ color: #3a7bd5; padding: {}px; border: 1px solid #ddd; }}\n",
            i % 32
        ));
    }
    css
}

fn bench_large_stylesheet(c: &mut Criterion) {
    let css = large_flat_stylesheet();
    let extractor = ThemeExtractor::new(Options::default()).unwrap();

    c.bench_function("large_stylesheet", |b| {
        b.iter(|| extractor.process(&css, None).unwrap())
    });
}

fn bench_media_heavy(c: &mut Criterion) {
    let mut css = String::with_capacity(1_000_000);
    for i in 0..1_000 {
        css.push_str(&format!(
            "@media (min-width: {}px) {{ .m-{i} {{ background: hsl({}, 40%, 50%); margin: 0 }} }}\n",
            300 + i,
            i % 360
        ));
    }
    let extractor = ThemeExtractor::new(Options::default()).unwrap();

    c.bench_function("media_heavy", |b| {
        b.iter(|| extractor.process(&css, None).unwrap())
    });
}

fn bench_parse_only(c: &mut Criterion) {
    let css = large_flat_stylesheet();

    c.bench_function("parse_only", |b| {
        b.iter(|| parse_stylesheet(&css).unwrap())
    });
}

criterion_group!(
    benches,
    bench_large_stylesheet,
    bench_media_heavy,
    bench_parse_only
);
criterion_main!(benches);
