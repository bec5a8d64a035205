use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::IVec2;
use particle_renderer::{blend, BlueChannel};
use particle_simulation::*;

fn bench_advance(c: &mut Criterion) {
    let config = SwarmConfig::default()
        .with_particle_count(100_000)
        .with_seed(1);
    let mut session = Session::new(config, 800, 600).expect("session");
    let target = IVec2::new(400, 300);

    c.bench_function("advance_100k", |b| b.iter(|| session.advance(black_box(target))));
}

fn bench_blend(c: &mut Criterion) {
    c.bench_function("blend_salmon_over_gray", |b| {
        b.iter(|| blend(black_box(0xff20_2020), black_box(0xffff_a07a), BlueChannel::Literal))
    });
}

criterion_group!(benches, bench_advance, bench_blend);
criterion_main!(benches);
