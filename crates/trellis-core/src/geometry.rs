//! Geometry primitives shared by the solver and the layout engines.

pub use glam::Vec2;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The x axis (widths, columns)
    Horizontal,
    /// The y axis (heights, rows)
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Read this axis' component of a vector.
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    /// Build a vector from a main-axis and a cross-axis component.
    #[inline]
    pub fn pack(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(main, cross),
            Axis::Vertical => Vec2::new(cross, main),
        }
    }
}

/// Axis-aligned rectangle in backend pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from position and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Bounding box of both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Rect::from_min_size(min, max - min)
    }
}

/// Inclusive lower/upper bound for a resolved extent.
///
/// Either bound may be absent. An inverted range (`min > max`) favours the
/// minimum, the same way `f32::max(f32::min(v, max), min)` would.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRange {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl SizeRange {
    /// Range with both bounds set.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Range with only a lower bound.
    pub fn at_least(min: f32) -> Self {
        Self { min: Some(min), max: None }
    }

    /// Range with only an upper bound.
    pub fn at_most(max: f32) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// Clamp a value into the range. Non-finite bounds are ignored.
    pub fn clamp(&self, value: f32) -> f32 {
        let mut v = value;
        if let Some(max) = self.max.filter(|m| m.is_finite()) {
            v = v.min(max);
        }
        if let Some(min) = self.min.filter(|m| m.is_finite()) {
            v = v.max(min);
        }
        v
    }
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create symmetric padding.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Top-left inset as a vector.
    pub fn leading(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Bottom-right inset as a vector.
    pub fn trailing(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_pack_round_trip() {
        let v = Axis::Horizontal.pack(3.0, 4.0);
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(Axis::Horizontal.of(v), 3.0);

        let v = Axis::Vertical.pack(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 3.0));
        assert_eq!(Axis::Vertical.of(v), 3.0);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }

    #[test]
    fn test_size_range_clamp() {
        let range = SizeRange::new(10.0, 20.0);
        assert_eq!(range.clamp(5.0), 10.0);
        assert_eq!(range.clamp(15.0), 15.0);
        assert_eq!(range.clamp(25.0), 20.0);

        assert_eq!(SizeRange::at_least(10.0).clamp(500.0), 500.0);
        assert_eq!(SizeRange::at_most(10.0).clamp(-5.0), -5.0);
    }

    #[test]
    fn test_size_range_inverted_favours_min() {
        let range = SizeRange::new(30.0, 10.0);
        assert_eq!(range.clamp(20.0), 30.0);
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 15.0, 25.0));
    }

    #[test]
    fn test_padding_totals() {
        let padding = Padding::symmetric(4.0, 2.0);
        assert_eq!(padding.horizontal(), 8.0);
        assert_eq!(padding.vertical(), 4.0);
        assert_eq!(padding.leading(), Vec2::new(4.0, 2.0));
    }
}
