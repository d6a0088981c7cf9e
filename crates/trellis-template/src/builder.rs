//! Fluent builders for layout trees.
//!
//! ```
//! use trellis_template::{grid, leaf, row, vertical};
//! use trellis_layout::{HeadlessBackend, TrackSize};
//! use trellis_core::Vec2;
//!
//! let tree = vertical::<HeadlessBackend>()
//!     .spacing(4.0)
//!     .child(leaf(|b: &mut HeadlessBackend| { b.item(Vec2::new(120.0, 20.0)); }))
//!     .child(row().child(leaf(|b: &mut HeadlessBackend| { b.item(Vec2::new(40.0, 20.0)); })))
//!     .build();
//! assert_eq!(tree.kind(), "vertical stack");
//!
//! let table = grid::<HeadlessBackend>([TrackSize::Weighted(1.0), TrackSize::Weighted(2.0)])
//!     .cell(1, 0, leaf(|b: &mut HeadlessBackend| { b.item(Vec2::new(10.0, 10.0)); }))
//!     .build()
//!     .unwrap();
//! assert_eq!(table.kind(), "grid");
//! ```

use trellis_constraint::Placement;
use trellis_core::{LayoutError, Padding};
use trellis_layout::{
    Alignment, CrossFill, Direction, GridOptions, Spacing, StackOptions, TrackSize,
};

use crate::node::{Cell, GridNode, LayoutNode, RenderLeaf, Slot, StackNode};

/// Start a top-to-bottom stack.
pub fn vertical<B>() -> StackBuilder<B> {
    StackBuilder::new(Direction::Vertical)
}

/// Start a left-to-right stack.
pub fn row<B>() -> StackBuilder<B> {
    StackBuilder::new(Direction::Horizontal)
}

/// Start a grid with the given column definitions.
pub fn grid<B>(columns: impl IntoIterator<Item = TrackSize>) -> GridBuilder<B> {
    GridBuilder {
        options: GridOptions::new(columns),
        cells: Vec::new(),
    }
}

/// A leaf that draws through `draw`.
pub fn leaf<B>(draw: impl Fn(&mut B) + 'static) -> LayoutNode<B> {
    LayoutNode::Leaf(RenderLeaf::new(draw))
}

pub struct StackBuilder<B> {
    direction: Direction,
    options: StackOptions,
    children: Vec<Slot<B>>,
}

impl<B> StackBuilder<B> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            options: StackOptions::new(),
            children: Vec::new(),
        }
    }

    pub fn spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.options = self.options.with_spacing(spacing);
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.options = self.options.with_padding(padding);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.options = self.options.with_alignment(alignment);
        self
    }

    pub fn cross_fill(mut self, cross_fill: CrossFill) -> Self {
        self.options = self.options.with_cross_fill(cross_fill);
        self
    }

    pub fn cross_size(mut self, cross_size: f32) -> Self {
        self.options = self.options.with_cross_size(cross_size);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.options = self.options.with_placement(placement);
        self
    }

    /// Append a child with no size hints.
    pub fn child(mut self, node: impl Into<LayoutNode<B>>) -> Self {
        self.children.push(Slot::new(node));
        self
    }

    /// Append a child with size hints.
    pub fn slot(mut self, slot: Slot<B>) -> Self {
        self.children.push(slot);
        self
    }

    pub fn build(self) -> LayoutNode<B> {
        LayoutNode::Stack(StackNode {
            direction: self.direction,
            options: self.options,
            children: self.children,
        })
    }
}

impl<B> From<StackBuilder<B>> for LayoutNode<B> {
    fn from(builder: StackBuilder<B>) -> Self {
        builder.build()
    }
}

pub struct GridBuilder<B> {
    options: GridOptions,
    cells: Vec<Cell<B>>,
}

impl<B> GridBuilder<B> {
    pub fn rows(mut self, rows: impl IntoIterator<Item = TrackSize>) -> Self {
        self.options = self.options.with_rows(rows);
        self
    }

    pub fn spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.options = self.options.with_spacing(spacing);
        self
    }

    pub fn column_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.options = self.options.with_column_spacing(spacing);
        self
    }

    pub fn row_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.options = self.options.with_row_spacing(spacing);
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.options = self.options.with_max_rows(max_rows);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.options = self.options.with_placement(placement);
        self
    }

    /// Put `node` in a single cell.
    pub fn cell(mut self, column: usize, row: usize, node: impl Into<LayoutNode<B>>) -> Self {
        self.cells.push(Cell::new(column, row, node));
        self
    }

    /// Add a cell with spans or size hints.
    pub fn place(mut self, cell: Cell<B>) -> Self {
        self.cells.push(cell);
        self
    }

    /// Finish the grid, rejecting cells that cannot fit its columns or
    /// row limit.
    pub fn build(self) -> Result<LayoutNode<B>, LayoutError> {
        let columns = self.options.columns.len();
        if columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        for cell in &self.cells {
            let column_span = cell.request.column_span.max(1);
            if cell.column.saturating_add(column_span) > columns {
                return Err(LayoutError::ColumnOutOfRange {
                    column: cell.column,
                    span: column_span,
                    columns,
                });
            }
            let row_span = cell.request.row_span.max(1);
            let max_rows = self.options.max_rows.unwrap_or(usize::MAX);
            match cell.row.checked_add(row_span) {
                Some(end) if end <= max_rows => {}
                _ => {
                    return Err(LayoutError::RowOutOfRange {
                        row: cell.row,
                        span: row_span,
                        max_rows,
                    })
                }
            }
        }

        Ok(LayoutNode::Grid(GridNode {
            options: self.options,
            cells: self.cells,
        }))
    }
}
