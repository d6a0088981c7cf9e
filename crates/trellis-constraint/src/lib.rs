//! Constraint solving for Trellis layouts.
//!
//! A [`Placement`] describes how an element's width, height and position
//! derive from the region its parent offers (a [`LayoutFrame`]). [`resolve`]
//! turns the two into concrete pixel geometry.
//!
//! # Example
//!
//! ```
//! use trellis_constraint::{resolve, Constraint, LayoutFrame, Placement};
//! use trellis_core::Vec2;
//!
//! let placement = Placement::builder()
//!     .width(Constraint::aspect(2.0))
//!     .height(100.0)
//!     .x(Constraint::Center)
//!     .build()?;
//! let frame = LayoutFrame::new(Vec2::new(600.0, 400.0), Vec2::ZERO, Vec2::ZERO);
//!
//! let result = resolve(&placement, &frame);
//! assert_eq!((result.x, result.width, result.height), (200.0, 200.0, 100.0));
//! # Ok::<(), trellis_core::LayoutError>(())
//! ```

mod constraint;
mod solver;

pub use constraint::{Constraint, Placement, PlacementBuilder};
pub use solver::{resolve, LayoutFrame, LayoutResult};
