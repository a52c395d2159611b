// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for the visibility and clustering stages
//!
//! Run with: cargo bench -p roomseg --bench segmentation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use roomseg::{compute_fingerprints, subsample, ClusterEngine, Mask, NoopObserver};

/// `rooms` x `rooms` grid of square rooms, each `room` cells wide, with
/// one-cell doorways in every interior wall
fn generate_plan(rooms: usize, room: usize) -> (Mask, Mask) {
    let side = rooms * (room + 1) + 1;
    let walls = Mask::from_fn(side, side, |x, y| {
        let on_x = x % (room + 1) == 0;
        let on_y = y % (room + 1) == 0;
        let border = x == 0 || y == 0 || x == side - 1 || y == side - 1;
        let door = !border && (x % (room + 1) == room / 2 || y % (room + 1) == room / 2);
        (on_x || on_y) && !door
    });
    let free = walls.map(|&w| !w);
    (walls, free)
}

fn bench_visibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility");

    let scenarios = [
        // (rooms per side, room width, stride, name)
        (2, 20, 3, "2x2_rooms_stride3"),
        (3, 30, 3, "3x3_rooms_stride3"),
        (3, 30, 5, "3x3_rooms_stride5"),
        (4, 40, 5, "4x4_rooms_stride5"),
    ];

    for (rooms, room, stride, name) in scenarios {
        let (walls, free) = generate_plan(rooms, room);
        let samples = subsample(&walls, &free, stride);

        group.throughput(Throughput::Elements(
            (samples.free.len() * samples.walls.len()) as u64,
        ));
        group.bench_with_input(BenchmarkId::new("fingerprints", name), &samples, |b, samples| {
            b.iter(|| compute_fingerprints(black_box(&walls), black_box(samples), 2))
        });
    }

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");

    for (rooms, room, stride, name) in [(2, 20, 3, "2x2_rooms"), (3, 30, 5, "3x3_rooms")] {
        let (walls, free) = generate_plan(rooms, room);
        let samples = subsample(&walls, &free, stride);
        let fingerprints = compute_fingerprints(&walls, &samples, 2);

        group.throughput(Throughput::Elements(fingerprints.len() as u64));
        group.bench_with_input(BenchmarkId::new("medoids", name), &fingerprints, |b, prints| {
            b.iter(|| {
                let mut engine = ClusterEngine::new(black_box(prints), 0.6, 20);
                engine.run(50, 0, &mut NoopObserver).ok();
                engine.into_state()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_visibility, bench_clustering);
criterion_main!(benches);
