//! Stack and grid engines for immediate-mode UIs.
//!
//! An immediate-mode child only knows its size after it has drawn. The
//! engines here place each child at a predicted position, let it draw
//! inside a backend group, then measure the group and fold the real size
//! into their running state before the next sibling is placed.
//!
//! # Architecture
//!
//! 1. **Backend**: the cursor and measurement primitives of the host UI
//! 2. **Context/cursor**: region snapshots and manual placement
//! 3. **Stacks**: single-axis sequencing with alignment and padding
//! 4. **Grids**: column/row plans that grow with measured content
//!
//! # Example
//!
//! ```
//! use trellis_layout::{HeadlessBackend, ItemRequest, Stack, StackOptions};
//! use trellis_core::Vec2;
//!
//! let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
//! let mut row = Stack::horizontal(&mut backend, StackOptions::new().with_spacing(8.0));
//! for width in [40.0, 60.0, 30.0] {
//!     row.item(ItemRequest::new(), |b| b.item(Vec2::new(width, 20.0))).unwrap();
//! }
//! assert_eq!(row.close(), Vec2::new(146.0, 20.0));
//! ```

mod backend;
mod context;
mod cursor;
mod grid;
mod options;
mod stack;

pub use backend::{Backend, HeadlessBackend};
pub use context::{FrameOverrides, LayoutContext};
pub use cursor::{Cursor, IndentGuard};
pub use grid::{
    distribute, CellRequest, CellScope, Grid, GridOptions, TrackPlan, TrackSize, ROW_GROWTH_LIMIT,
};
pub use options::{Alignment, CrossFill, Direction, ItemRequest, Spacing, StackOptions};
pub use stack::{ItemScope, Stack};
