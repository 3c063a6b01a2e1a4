// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_collision::CollisionEngine;
use thicket_scene::{Circle, NodeId, Polygon, Rect, Tree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `count` shapes scattered over a `size` square: circles, rects, and triangles
/// with random rotation and scale.
fn gen_scene(count: usize, size: f64) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::default();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let id = match i % 3 {
            0 => tree.insert_shape(Circle::new(4.0 + rng.next_f64() * 8.0).unwrap()),
            1 => tree.insert_shape(Rect::new(8.0, 4.0 + rng.next_f64() * 12.0).unwrap()),
            _ => tree.insert_shape(Polygon::new([(0.0, -6.0), (6.0, 6.0), (-6.0, 6.0)]).unwrap()),
        };
        let t = tree.transform_mut(id).unwrap();
        t.set_translation((rng.next_f64() * size, rng.next_f64() * size))
            .unwrap();
        t.set_rotation(rng.next_f64() * core::f64::consts::TAU).unwrap();
        t.set_scale((0.5 + rng.next_f64(), 0.5 + rng.next_f64()))
            .unwrap();
        ids.push(id);
    }
    (tree, ids)
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for &n in &[32usize, 128, 512] {
        let (tree, ids) = gen_scene(n, 400.0);
        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
        group.bench_function(format!("buffer_and_sweep_n{}", n), |b| {
            b.iter_batched(
                CollisionEngine::new,
                |mut engine| {
                    engine.buffer_shapes(&tree, ids.iter().copied()).unwrap();
                    let mut hits = 0_usize;
                    while let Some(info) = engine.next_collision_info(&tree).unwrap() {
                        hits += usize::from(info.colliding);
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("unbuffered_pairs_n{}", n), |b| {
            let mut engine = CollisionEngine::new();
            b.iter(|| {
                let mut hits = 0_usize;
                for (i, &a) in ids.iter().enumerate() {
                    for &other in &ids[..i] {
                        hits += usize::from(engine.test(&tree, a, other).unwrap());
                    }
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_global_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_transform");
    for &depth in &[4usize, 16, 64] {
        let mut tree = Tree::default();
        let mut chain = Vec::with_capacity(depth);
        for i in 0..depth {
            let id = tree.insert_actor();
            let t = tree.transform_mut(id).unwrap();
            t.set_translation((i as f64, 1.0)).unwrap();
            t.set_rotation(0.01 * i as f64).unwrap();
            if let Some(&parent) = chain.last() {
                tree.add_child(parent, id).unwrap();
            }
            chain.push(id);
        }
        let leaf = *chain.last().unwrap();
        group.bench_function(format!("cached_depth{}", depth), |b| {
            b.iter(|| black_box(tree.global_transform(leaf).unwrap()));
        });
        group.bench_function(format!("dirty_depth{}", depth), |b| {
            let mut angle = 0.0;
            b.iter(|| {
                angle += 0.001;
                for &id in &chain {
                    tree.transform_mut(id).unwrap().set_rotation(angle).unwrap();
                }
                black_box(tree.global_transform(leaf).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_global_transform);
criterion_main!(benches);
