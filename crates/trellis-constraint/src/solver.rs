//! Constraint resolution against a parent frame.
//!
//! [`resolve`] is a pure function: the same placement and frame always
//! produce the same result, and every component of the result is finite
//! with non-negative extents.

use trellis_core::sanitize;
use trellis_core::{Axis, Rect, Vec2};

use crate::constraint::{Constraint, Placement};

/// What the parent offers: the region a placement is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutFrame {
    /// Space remaining from the target position to the region's edge
    pub available: Vec2,
    /// Preferred content extent, used when an axis has no size constraint
    pub content: Vec2,
    /// Current flow position; explicit positions are offsets from here
    pub target: Vec2,
}

impl LayoutFrame {
    pub fn new(available: Vec2, content: Vec2, target: Vec2) -> Self {
        Self { available, content, target }
    }

    pub fn available_width(&self) -> f32 {
        self.available.x
    }

    pub fn available_height(&self) -> f32 {
        self.available.y
    }

    pub fn content_width(&self) -> f32 {
        self.content.x
    }

    pub fn content_height(&self) -> f32 {
        self.content.y
    }
}

/// Resolved geometry. Never partially populated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutResult {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        axis.of(self.size())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Resolve a placement against a frame.
///
/// Sizes come first. When one axis is aspect-ratio linked the other axis is
/// resolved on its own and the linked axis derives from it; otherwise both
/// resolve independently. Positions are resolved once sizes are known.
pub fn resolve(placement: &Placement, frame: &LayoutFrame) -> LayoutResult {
    let available = sanitize::size(frame.available, Vec2::ZERO);
    let content = sanitize::size(frame.content, Vec2::ZERO);

    let size_of = |axis: Axis, linked: Option<f32>| {
        resolve_extent(
            placement.size_on(axis),
            placement.range_on(axis).copied(),
            axis.of(available),
            axis.of(content),
            linked,
        )
    };

    let width_linked = placement.width().is_some_and(Constraint::is_aspect_linked);
    let height_linked = placement.height().is_some_and(Constraint::is_aspect_linked);

    let (width, height) = match (width_linked, height_linked) {
        (true, false) => {
            let height = size_of(Axis::Vertical, None);
            (size_of(Axis::Horizontal, Some(height)), height)
        }
        (false, true) => {
            let width = size_of(Axis::Horizontal, None);
            (width, size_of(Axis::Vertical, Some(width)))
        }
        _ => (size_of(Axis::Horizontal, None), size_of(Axis::Vertical, None)),
    };

    let x = resolve_offset(placement.x(), available.x, width, frame.target.x);
    let y = resolve_offset(placement.y(), available.y, height, frame.target.y);

    LayoutResult { x, y, width, height }
}

/// Extent used when an axis carries no usable size strategy.
fn default_extent(content: f32) -> f32 {
    sanitize::positive(content).unwrap_or(0.0)
}

fn resolve_extent(
    constraint: Option<&Constraint>,
    range: Option<trellis_core::SizeRange>,
    available: f32,
    content: f32,
    linked: Option<f32>,
) -> f32 {
    let fallback = default_extent(content);
    let raw = match constraint {
        Some(c) => extent_of(c, available, fallback, linked),
        None => fallback,
    };
    let clamped = match range {
        Some(range) => range.clamp(raw),
        None => raw,
    };
    sanitize::extent(clamped, fallback)
}

fn extent_of(constraint: &Constraint, available: f32, fallback: f32, linked: Option<f32>) -> f32 {
    match constraint {
        Constraint::Pixels(value) => *value,
        Constraint::PercentOfParent(fraction) => fraction * available,
        Constraint::Center => fallback,
        Constraint::AspectRatioLinked(ratio) => match linked {
            Some(other) => other * ratio,
            None => fallback,
        },
        Constraint::Min(inner, bound) => {
            clamp_finite(extent_of(inner, available, fallback, linked), *bound, f32::max)
        }
        Constraint::Max(inner, bound) => {
            clamp_finite(extent_of(inner, available, fallback, linked), *bound, f32::min)
        }
    }
}

fn resolve_offset(constraint: Option<&Constraint>, available: f32, size: f32, target: f32) -> f32 {
    let position = match constraint {
        Some(c) => target + offset_of(c, available, size),
        None => target,
    };
    sanitize::coordinate(position, target)
}

fn offset_of(constraint: &Constraint, available: f32, size: f32) -> f32 {
    match constraint {
        Constraint::Pixels(value) => *value,
        Constraint::PercentOfParent(fraction) => fraction * available,
        Constraint::Center => ((available - size) / 2.0).max(0.0),
        // Rejected when the placement is built.
        Constraint::AspectRatioLinked(_) => 0.0,
        Constraint::Min(inner, bound) => {
            clamp_finite(offset_of(inner, available, size), *bound, f32::max)
        }
        Constraint::Max(inner, bound) => {
            clamp_finite(offset_of(inner, available, size), *bound, f32::min)
        }
    }
}

/// Apply a bound unless either side is degenerate; a degenerate inner value
/// stays degenerate so sanitization replaces it with the fallback.
fn clamp_finite(value: f32, bound: f32, op: fn(f32, f32) -> f32) -> f32 {
    if value.is_finite() && bound.is_finite() {
        op(value, bound)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::SizeRange;

    fn frame(available: (f32, f32), content: (f32, f32)) -> LayoutFrame {
        LayoutFrame::new(
            Vec2::new(available.0, available.1),
            Vec2::new(content.0, content.1),
            Vec2::new(10.0, 20.0),
        )
    }

    #[test]
    fn test_pixels_and_percent() {
        let placement = Placement::builder()
            .width(Constraint::px(120.0))
            .height(Constraint::percent(0.25))
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((800.0, 400.0), (0.0, 0.0)));
        assert_eq!(result.width, 120.0);
        assert_eq!(result.height, 100.0);
    }

    #[test]
    fn test_absent_size_uses_content() {
        let result = resolve(&Placement::default(), &frame((800.0, 400.0), (300.0, -5.0)));
        assert_eq!(result.width, 300.0);
        assert_eq!(result.height, 0.0);
    }

    #[test]
    fn test_width_linked_to_height() {
        let placement = Placement::builder()
            .width(Constraint::aspect(2.0))
            .height(100.0)
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((1000.0, 1000.0), (0.0, 0.0)));
        assert_eq!(result.height, 100.0);
        assert_eq!(result.width, 200.0);
    }

    #[test]
    fn test_height_linked_to_percent_width() {
        let placement = Placement::builder()
            .width(Constraint::percent(0.1))
            .height(Constraint::aspect(0.5))
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((1000.0, 1000.0), (0.0, 0.0)));
        assert_eq!(result.width, 100.0);
        assert_eq!(result.height, 50.0);
    }

    #[test]
    fn test_linked_axis_respects_bounds() {
        let placement = Placement::builder()
            .width(Constraint::aspect(4.0).at_most(150.0))
            .height(50.0)
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((1000.0, 1000.0), (0.0, 0.0)));
        assert_eq!(result.width, 150.0);
    }

    #[test]
    fn test_min_and_max() {
        let placement = Placement::builder()
            .width(Constraint::percent(0.1).at_least(200.0))
            .height(Constraint::percent(1.0).at_most(40.0))
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((1000.0, 1000.0), (0.0, 0.0)));
        assert_eq!(result.width, 200.0);
        assert_eq!(result.height, 40.0);
    }

    #[test]
    fn test_size_range_clamps() {
        let placement = Placement::builder()
            .width(500.0)
            .width_range(SizeRange::new(0.0, 320.0))
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((1000.0, 1000.0), (0.0, 0.0)));
        assert_eq!(result.width, 320.0);
    }

    #[test]
    fn test_center_position() {
        let placement = Placement::builder()
            .width(100.0)
            .height(300.0)
            .x(Constraint::Center)
            .y(Constraint::Center)
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((400.0, 200.0), (0.0, 0.0)));
        assert_eq!(result.x, 10.0 + 150.0);
        // Wider than available: clamped to the target.
        assert_eq!(result.y, 20.0);
    }

    #[test]
    fn test_absent_position_flows() {
        let result = resolve(&Placement::fixed(5.0, 5.0), &frame((100.0, 100.0), (0.0, 0.0)));
        assert_eq!(result.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_pixel_position_offsets_target() {
        let placement = Placement::builder().x(4.0).y(Constraint::percent(0.5)).build().unwrap();
        let result = resolve(&placement, &frame((100.0, 60.0), (0.0, 0.0)));
        assert_eq!(result.x, 14.0);
        assert_eq!(result.y, 50.0);
    }

    #[test]
    fn test_degenerate_values_sanitized() {
        let placement = Placement::builder()
            .width(Constraint::aspect(f32::INFINITY))
            .height(0.0)
            .x(f32::NAN)
            .build()
            .unwrap();
        let result = resolve(&placement, &frame((100.0, 100.0), (30.0, 0.0)));
        // inf * 0 is NaN: falls back to the content width.
        assert_eq!(result.width, 30.0);
        assert_eq!(result.height, 0.0);
        assert_eq!(result.x, 10.0);

        let negative = resolve(&Placement::fixed(-10.0, f32::NEG_INFINITY), &frame((1.0, 1.0), (0.0, 0.0)));
        assert_eq!(negative.size(), Vec2::ZERO);
    }

    #[test]
    fn test_degenerate_frame() {
        let bad = LayoutFrame::new(
            Vec2::new(f32::NAN, -50.0),
            Vec2::new(f32::INFINITY, 20.0),
            Vec2::new(f32::NAN, 3.0),
        );
        let result = resolve(&Placement::percent(0.5, 0.5), &bad);
        assert_eq!(result, LayoutResult { x: 0.0, y: 3.0, width: 0.0, height: 0.0 });
    }
}
