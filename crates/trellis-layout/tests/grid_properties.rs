//! Laws the grid engine keeps while cells report their sizes.

use proptest::prelude::*;
use trellis_core::Vec2;
use trellis_layout::{CellRequest, Grid, GridOptions, HeadlessBackend, TrackSize};

fn track() -> impl Strategy<Value = TrackSize> {
    prop_oneof![
        (0.0f32..150.0).prop_map(TrackSize::Fixed),
        (0.1f32..4.0).prop_map(TrackSize::Weighted),
        (0.0f32..80.0).prop_map(TrackSize::Auto),
    ]
}

fn cell() -> impl Strategy<Value = (usize, usize, usize, f32, f32)> {
    (0usize..4, 0usize..4, 1usize..3, 0.0f32..400.0, 0.0f32..120.0)
}

proptest! {
    #[test]
    fn columns_only_grow_and_offsets_stay_consistent(
        columns in prop::collection::vec(track(), 1..5),
        cells in prop::collection::vec(cell(), 1..16),
        spacing in 0.0f32..16.0,
    ) {
        let mut backend = HeadlessBackend::new(Vec2::new(600.0, 2000.0));
        let count = columns.len();
        let mut grid = Grid::begin(&mut backend, GridOptions::new(columns).with_spacing(spacing)).unwrap();

        for plan in grid.columns() {
            prop_assert!(plan.size >= plan.min);
        }

        let mut previous = grid.column_widths();
        for (column, row, span, w, h) in cells {
            let column = column % count;
            let span = span.min(count - column);
            grid.place(column, row, CellRequest::new().with_column_span(span), |b| {
                b.item(Vec2::new(w, h));
            })
            .unwrap();

            let widths = grid.column_widths();
            for (before, after) in previous.iter().zip(&widths) {
                prop_assert!(after >= before);
            }
            for plan in grid.columns() {
                prop_assert!(plan.size >= plan.min);
            }
            let offsets = grid.column_offsets();
            for i in 1..offsets.len() {
                let expected = offsets[i - 1] + widths[i - 1] + spacing;
                prop_assert!((offsets[i] - expected).abs() < 0.01);
            }
            let row_offsets = grid.row_offsets();
            let heights = grid.row_heights();
            for i in 1..row_offsets.len() {
                let expected = row_offsets[i - 1] + heights[i - 1] + spacing;
                prop_assert!((row_offsets[i] - expected).abs() < 0.01);
            }
            previous = widths;
        }
    }

    #[test]
    fn out_of_range_columns_are_rejected(columns in 1usize..6, column in 0usize..10, span in 0usize..4) {
        let mut backend = HeadlessBackend::new(Vec2::new(600.0, 600.0));
        let mut grid = Grid::begin(
            &mut backend,
            GridOptions::new(vec![TrackSize::Auto(0.0); columns]),
        )
        .unwrap();
        let fits = column + span.max(1) <= columns;
        let result = grid.place(column, 0, CellRequest::new().with_column_span(span), |_| ());
        prop_assert_eq!(result.is_ok(), fits);
    }
}

#[test]
fn fixed_columns_scope_available_width() {
    let mut backend = HeadlessBackend::new(Vec2::new(600.0, 600.0));
    let mut grid = Grid::begin(
        &mut backend,
        GridOptions::new([TrackSize::Fixed(100.0), TrackSize::Fixed(100.0)]).with_spacing(8.0),
    )
    .unwrap();
    let first = grid.cell(0, 0, CellRequest::new()).unwrap();
    assert_eq!(first.available().x, 100.0);
    first.close();
    let second = grid.cell(1, 0, CellRequest::new()).unwrap();
    assert_eq!(second.available().x, 100.0);
}

#[test]
fn spanning_cell_grows_weighted_columns() {
    let mut backend = HeadlessBackend::new(Vec2::new(168.0, 600.0));
    let mut grid = Grid::begin(
        &mut backend,
        GridOptions::new([TrackSize::Weighted(1.0), TrackSize::Weighted(1.0)]).with_spacing(8.0),
    )
    .unwrap();
    let mut scope = grid.cell(0, 0, CellRequest::new().with_column_span(2)).unwrap();
    assert_eq!(scope.available().x, 168.0);
    scope.item(Vec2::new(250.0, 30.0));
    scope.close();

    assert_eq!(grid.column_widths(), vec![125.0, 125.0]);
    assert_eq!(grid.column_offsets(), &[0.0, 133.0]);
}
