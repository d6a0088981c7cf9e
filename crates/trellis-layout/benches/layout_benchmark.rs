//! Stack and grid benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis_core::Vec2;
use trellis_layout::{
    CellRequest, Grid, GridOptions, HeadlessBackend, ItemRequest, Stack, StackOptions, TrackSize,
};

fn vstack_hundred_items(c: &mut Criterion) {
    c.bench_function("vstack_100_items", |b| {
        b.iter(|| {
            let mut backend = HeadlessBackend::new(Vec2::new(800.0, 10_000.0));
            let mut stack = Stack::vertical(&mut backend, StackOptions::new());
            for i in 0..100 {
                let width = 40.0 + (i % 7) as f32 * 10.0;
                stack
                    .item(ItemRequest::new().with_estimated_height(18.0), |b| {
                        b.item(Vec2::new(width, 18.0))
                    })
                    .unwrap();
            }
            black_box(stack.close())
        })
    });
}

fn grid_growing_columns(c: &mut Criterion) {
    c.bench_function("grid_4x25_growing", |b| {
        b.iter(|| {
            let mut backend = HeadlessBackend::new(Vec2::new(800.0, 10_000.0));
            let options = GridOptions::new([
                TrackSize::Fixed(120.0),
                TrackSize::Weighted(1.0),
                TrackSize::Weighted(2.0),
                TrackSize::Auto(40.0),
            ]);
            let mut grid = Grid::begin(&mut backend, options).unwrap();
            for row in 0..25 {
                for column in 0..4 {
                    let width = 60.0 + ((row * 4 + column) % 11) as f32 * 15.0;
                    grid.place(column, row, CellRequest::new(), |b| {
                        b.item(Vec2::new(width, 20.0))
                    })
                    .unwrap();
                }
            }
            black_box(grid.close())
        })
    });
}

criterion_group!(benches, vstack_hundred_items, grid_growing_columns);
criterion_main!(benches);
