//! Immutable layout tree.
//!
//! Nodes are built once (see [`crate::builder`]) and only read afterwards;
//! the renderer drives fresh engines over them on every walk.

use std::fmt;

use trellis_constraint::Placement;
use trellis_layout::{CellRequest, Direction, GridOptions, ItemRequest, StackOptions};

/// Draw callback of a leaf.
pub type DrawFn<B> = Box<dyn Fn(&mut B)>;

/// A node of the layout tree.
pub enum LayoutNode<B> {
    Stack(StackNode<B>),
    Grid(GridNode<B>),
    Leaf(RenderLeaf<B>),
}

impl<B> LayoutNode<B> {
    /// Whether this is a leaf that draws nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, LayoutNode::Leaf(leaf) if leaf.is_empty())
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutNode::Stack(stack) => match stack.direction {
                Direction::Vertical => "vertical stack",
                Direction::Horizontal => "row",
            },
            LayoutNode::Grid(_) => "grid",
            LayoutNode::Leaf(_) => "leaf",
        }
    }
}

impl<B> From<StackNode<B>> for LayoutNode<B> {
    fn from(node: StackNode<B>) -> Self {
        LayoutNode::Stack(node)
    }
}

impl<B> From<GridNode<B>> for LayoutNode<B> {
    fn from(node: GridNode<B>) -> Self {
        LayoutNode::Grid(node)
    }
}

impl<B> From<RenderLeaf<B>> for LayoutNode<B> {
    fn from(leaf: RenderLeaf<B>) -> Self {
        LayoutNode::Leaf(leaf)
    }
}

impl<B> fmt::Debug for LayoutNode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutNode::Stack(stack) => fmt::Debug::fmt(stack, f),
            LayoutNode::Grid(grid) => fmt::Debug::fmt(grid, f),
            LayoutNode::Leaf(leaf) => fmt::Debug::fmt(leaf, f),
        }
    }
}

/// A stack of slots along one axis.
pub struct StackNode<B> {
    pub direction: Direction,
    pub options: StackOptions,
    pub children: Vec<Slot<B>>,
}

impl<B> fmt::Debug for StackNode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackNode")
            .field("direction", &self.direction)
            .field("options", &self.options)
            .field("children", &self.children)
            .finish()
    }
}

/// A grid of positioned cells.
pub struct GridNode<B> {
    pub options: GridOptions,
    pub cells: Vec<Cell<B>>,
}

impl<B> fmt::Debug for GridNode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridNode")
            .field("options", &self.options)
            .field("cells", &self.cells)
            .finish()
    }
}

/// Leaf that hands the backend to a draw callback.
pub struct RenderLeaf<B> {
    draw: Option<DrawFn<B>>,
}

impl<B> RenderLeaf<B> {
    pub fn new(draw: impl Fn(&mut B) + 'static) -> Self {
        Self {
            draw: Some(Box::new(draw)),
        }
    }

    /// A leaf that draws nothing and occupies no space.
    pub fn empty() -> Self {
        Self { draw: None }
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_none()
    }

    pub(crate) fn callback(&self) -> Option<&DrawFn<B>> {
        self.draw.as_ref()
    }
}

impl<B> fmt::Debug for RenderLeaf<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderLeaf")
            .field("empty", &self.is_empty())
            .finish()
    }
}

/// A stack child with what is known about its size before it draws.
pub struct Slot<B> {
    pub node: LayoutNode<B>,
    pub request: ItemRequest,
}

impl<B> Slot<B> {
    pub fn new(node: impl Into<LayoutNode<B>>) -> Self {
        Self {
            node: node.into(),
            request: ItemRequest::new(),
        }
    }

    /// A slot that renders nothing and occupies zero space.
    pub fn empty() -> Self {
        Self::new(RenderLeaf::empty())
    }

    pub fn with_estimate(mut self, width: f32, height: f32) -> Self {
        self.request = self.request.with_estimate(width, height);
        self
    }

    pub fn with_size_hint(mut self, placement: Placement) -> Self {
        self.request = self.request.with_size_hint(placement);
        self
    }

    pub fn fill_width(mut self) -> Self {
        self.request = self.request.fill_width();
        self
    }
}

impl<B> fmt::Debug for Slot<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("node", &self.node)
            .field("request", &self.request)
            .finish()
    }
}

/// A grid child at a column and row.
pub struct Cell<B> {
    pub node: LayoutNode<B>,
    pub column: usize,
    pub row: usize,
    pub request: CellRequest,
}

impl<B> Cell<B> {
    pub fn new(column: usize, row: usize, node: impl Into<LayoutNode<B>>) -> Self {
        Self {
            node: node.into(),
            column,
            row,
            request: CellRequest::new(),
        }
    }

    /// A cell that renders nothing and occupies zero space.
    pub fn empty(column: usize, row: usize) -> Self {
        Self::new(column, row, RenderLeaf::empty())
    }

    pub fn with_span(mut self, columns: usize, rows: usize) -> Self {
        self.request = self.request.with_span(columns, rows);
        self
    }

    pub fn with_estimate(mut self, width: f32, height: f32) -> Self {
        self.request = self.request.with_estimate(width, height);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.request = self.request.with_placement(placement);
        self
    }

    pub fn fill_width(mut self) -> Self {
        self.request = self.request.fill_width();
        self
    }
}

impl<B> fmt::Debug for Cell<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("column", &self.column)
            .field("row", &self.row)
            .field("node", &self.node)
            .field("request", &self.request)
            .finish()
    }
}
