//! Renderer throughput over a generated class-heavy program.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use minify_bench::program;
use minify_syntax::{RenderConfig, render_program};

fn bench_render(c: &mut Criterion) {
    let tree = program(50, 20);
    c.bench_function("render_readable", |b| {
        b.iter(|| render_program(black_box(&tree), RenderConfig::readable()).unwrap())
    });
    c.bench_function("render_compact", |b| {
        b.iter(|| render_program(black_box(&tree), RenderConfig::compact()).unwrap())
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
