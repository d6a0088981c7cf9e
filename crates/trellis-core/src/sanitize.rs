//! Numeric sanitization.
//!
//! Geometry from any source (constraints, backend measurements, caller
//! estimates) is passed through these helpers before it reaches running
//! totals, so one bad frame cannot poison later placement.

use glam::Vec2;

/// Return `value` if finite, otherwise `fallback`.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Sanitize an extent: non-finite becomes `fallback`, negative becomes 0.
///
/// A non-finite or negative fallback is itself treated as 0.
#[inline]
pub fn extent(value: f32, fallback: f32) -> f32 {
    let fallback = if fallback.is_finite() { fallback.max(0.0) } else { 0.0 };
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

/// Sanitize a coordinate: non-finite becomes `fallback`, or 0 if the
/// fallback is unusable too.
#[inline]
pub fn coordinate(value: f32, fallback: f32) -> f32 {
    finite_or(value, finite_or(fallback, 0.0))
}

/// `value` if it is a finite, strictly positive extent.
#[inline]
pub fn positive(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Component-wise [`extent`] for a size vector.
pub fn size(value: Vec2, fallback: Vec2) -> Vec2 {
    Vec2::new(extent(value.x, fallback.x), extent(value.y, fallback.y))
}

/// Component-wise [`coordinate`] for a position vector.
pub fn point(value: Vec2, fallback: Vec2) -> Vec2 {
    Vec2::new(coordinate(value.x, fallback.x), coordinate(value.y, fallback.y))
}
