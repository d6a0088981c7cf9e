//! Snapshot of the drawing region, captured once per layout operation.

use trellis_constraint::LayoutFrame;
use trellis_core::sanitize;
use trellis_core::Vec2;

use crate::backend::Backend;

/// The region a layout operation works in, read from the backend once.
///
/// Passed explicitly through every call that needs it; nothing in the
/// engine reads the backend region behind the caller's back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutContext {
    /// Cursor at capture time
    pub cursor: Vec2,
    /// Space from the cursor to the region's edges
    pub available: Vec2,
    /// Size of the whole drawing surface
    pub content: Vec2,
}

/// Per-call replacements for parts of a captured context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOverrides {
    pub available_width: Option<f32>,
    pub available_height: Option<f32>,
    pub content_width: Option<f32>,
    pub content_height: Option<f32>,
    pub target: Option<Vec2>,
}

impl FrameOverrides {
    /// Override both available and content size, e.g. with a grid cell span.
    pub fn region(size: Vec2) -> Self {
        Self {
            available_width: Some(size.x),
            available_height: Some(size.y),
            content_width: Some(size.x),
            content_height: Some(size.y),
            target: None,
        }
    }

    pub fn with_target(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }
}

impl LayoutContext {
    /// Read cursor and regions from the backend.
    pub fn capture<B: Backend + ?Sized>(backend: &B) -> Self {
        Self {
            cursor: sanitize::point(backend.cursor_position(), Vec2::ZERO),
            available: sanitize::size(backend.available_region(), Vec2::ZERO),
            content: sanitize::size(backend.content_region(), Vec2::ZERO),
        }
    }

    /// Frame for the solver, unchanged.
    pub fn frame(&self) -> LayoutFrame {
        LayoutFrame::new(self.available, self.content, self.cursor)
    }

    /// Frame for the solver with caller-supplied replacements merged in.
    pub fn to_layout_frame(&self, overrides: FrameOverrides) -> LayoutFrame {
        let available = Vec2::new(
            overrides.available_width.map_or(self.available.x, |w| sanitize::extent(w, self.available.x)),
            overrides.available_height.map_or(self.available.y, |h| sanitize::extent(h, self.available.y)),
        );
        let content = Vec2::new(
            overrides.content_width.map_or(self.content.x, |w| sanitize::extent(w, self.content.x)),
            overrides.content_height.map_or(self.content.y, |h| sanitize::extent(h, self.content.y)),
        );
        let target = overrides
            .target
            .map_or(self.cursor, |t| sanitize::point(t, self.cursor));
        LayoutFrame::new(available, content, target)
    }
}
