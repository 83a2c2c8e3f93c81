// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spkb::assembly::{grid_tester, Margins};
use spkb::ast::Evaluator;
use spkb::catalog::Part;
use spkb::io;
use spkb::keyswitch::Keyswitch;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let switch = Keyswitch::mx();

    for part in [Part::Plate, Part::PlateWithBackplate, Part::BlackpillMount] {
        group.bench_with_input(BenchmarkId::new("part", part), &part, |b, part| {
            b.iter(|| part.build(black_box(&switch)).unwrap());
        });
    }

    for units in [2u32, 6, 12] {
        group.bench_with_input(BenchmarkId::new("grid_tester", units), &units, |b, &units| {
            b.iter(|| grid_tester(&switch, black_box(units), black_box(units), Margins::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let tester = grid_tester(&Keyswitch::choc(), 6, 6, Margins::default()).unwrap();
    let source = io::to_scad(&tester);

    group.bench_function("to_scad", |b| {
        b.iter(|| io::to_scad(black_box(&tester)));
    });

    group.bench_function("parse_scad", |b| {
        b.iter(|| io::parse_scad(black_box(&source)).unwrap());
    });

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let tester = grid_tester(&Keyswitch::mx(), 6, 6, Margins::default()).unwrap();
    let evaluator = Evaluator::new();

    c.bench_function("bounds/grid_tester_6x6", |b| {
        b.iter(|| evaluator.bounds(black_box(&tester)));
    });
}

criterion_group!(benches, bench_build, bench_serialize, bench_bounds);
criterion_main!(benches);
