//! Benchmark for runeword catalog lookups.
//!
//! Run with: cargo bench --package warden_items --bench catalog_benchmark

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use warden_items::{nip_name, RunewordCatalog};

fn benchmark_candidates(c: &mut Criterion) {
    let catalog = RunewordCatalog::builtin();
    let bases = ["swor", "tors", "pole", "shie", "helm", "staf"];

    c.bench_function("candidates_for_base", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % bases.len();
            let sockets = 2 + (i % 5) as u8;
            black_box(catalog.candidates_for(bases[i], sockets).count())
        });
    });
}

fn benchmark_nip_name(c: &mut Criterion) {
    c.bench_function("nip_name_normalize", |b| {
        b.iter(|| black_box(nip_name(black_box("Colossus Blade"))));
    });
}

criterion_group!(benches, benchmark_candidates, benchmark_nip_name);
criterion_main!(benches);
