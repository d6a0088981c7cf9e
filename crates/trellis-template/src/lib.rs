//! Declarative layout templates.
//!
//! A template is an immutable tree of stacks, grids and leaves, built with
//! [`vertical`], [`row`], [`grid`] and [`leaf`]. [`render`] walks it once per
//! frame, driving fresh `trellis-layout` engines for composite nodes and
//! calling leaf callbacks with the backend.
//!
//! ```
//! use trellis_template::{leaf, render, row};
//! use trellis_layout::HeadlessBackend;
//! use trellis_core::Vec2;
//!
//! let toolbar = row()
//!     .spacing(8.0)
//!     .child(leaf(|b: &mut HeadlessBackend| { b.item(Vec2::new(40.0, 20.0)); }))
//!     .child(leaf(|b: &mut HeadlessBackend| { b.item(Vec2::new(60.0, 20.0)); }))
//!     .build();
//!
//! let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
//! let size = render(&toolbar, &mut backend).unwrap();
//! assert_eq!(size, Vec2::new(108.0, 20.0));
//! ```

pub mod builder;
pub mod node;
mod render;

pub use builder::{grid, leaf, row, vertical, GridBuilder, StackBuilder};
pub use node::{Cell, DrawFn, GridNode, LayoutNode, RenderLeaf, Slot, StackNode};
pub use render::render;
