//! Walks a layout tree through fresh engines.

use trellis_core::sanitize;
use trellis_core::{LayoutError, Vec2};
use trellis_layout::{Backend, Grid, Stack};

use crate::node::{GridNode, LayoutNode, RenderLeaf, StackNode};

/// Render `node` at the backend cursor and return the size it occupied.
///
/// Composite nodes drive a new [`Stack`] or [`Grid`] each call; leaves
/// call their callback. Empty leaves occupy zero space. The first
/// configuration error aborts the walk; scopes opened so far still close,
/// so the backend is left consistent.
pub fn render<B: Backend>(node: &LayoutNode<B>, backend: &mut B) -> Result<Vec2, LayoutError> {
    match node {
        LayoutNode::Stack(stack) => render_stack(stack, backend),
        LayoutNode::Grid(grid) => render_grid(grid, backend),
        LayoutNode::Leaf(leaf) => Ok(render_leaf(leaf, backend)),
    }
}

fn render_stack<B: Backend>(node: &StackNode<B>, backend: &mut B) -> Result<Vec2, LayoutError> {
    log::trace!("rendering {:?} stack with {} children", node.direction, node.children.len());
    let mut stack = Stack::begin(backend, node.direction, node.options.clone());
    for slot in &node.children {
        let mut scope = stack.next(slot.request.clone())?;
        if slot.node.is_empty() {
            scope.mark_empty();
        }
        render(&slot.node, &mut *scope)?;
        scope.close();
    }
    Ok(stack.close())
}

fn render_grid<B: Backend>(node: &GridNode<B>, backend: &mut B) -> Result<Vec2, LayoutError> {
    log::trace!("rendering grid with {} cells", node.cells.len());
    let mut grid = Grid::begin(backend, node.options.clone())?;
    for cell in &node.cells {
        let mut scope = grid.cell(cell.column, cell.row, cell.request.clone())?;
        if cell.node.is_empty() {
            scope.mark_empty();
        }
        render(&cell.node, &mut *scope)?;
        scope.close();
    }
    Ok(grid.close())
}

fn render_leaf<B: Backend>(leaf: &RenderLeaf<B>, backend: &mut B) -> Vec2 {
    let Some(draw) = leaf.callback() else {
        return Vec2::ZERO;
    };
    backend.begin_group();
    draw(&mut *backend);
    backend.end_group();
    sanitize::size(backend.last_item_rect_size(), Vec2::ZERO)
}
