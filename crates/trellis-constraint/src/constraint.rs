//! Declarative constraints and the placement description built from them.

use trellis_core::{Axis, LayoutError, SizeRange};

/// Strategy for resolving one axis' size or position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Fixed pixel value
    Pixels(f32),
    /// Fraction of the parent's available extent (0.5 = half)
    PercentOfParent(f32),
    /// Centered in the available extent (positions); content extent (sizes)
    Center,
    /// This axis' size is the other axis' resolved size times the ratio
    AspectRatioLinked(f32),
    /// Inner strategy, but never less than the bound
    Min(Box<Constraint>, f32),
    /// Inner strategy, but never more than the bound
    Max(Box<Constraint>, f32),
}

impl Constraint {
    pub fn px(value: f32) -> Self {
        Constraint::Pixels(value)
    }

    pub fn percent(fraction: f32) -> Self {
        Constraint::PercentOfParent(fraction)
    }

    pub fn aspect(ratio: f32) -> Self {
        Constraint::AspectRatioLinked(ratio)
    }

    /// Wrap this constraint with a lower bound.
    pub fn at_least(self, bound: f32) -> Self {
        Constraint::Min(Box::new(self), bound)
    }

    /// Wrap this constraint with an upper bound.
    pub fn at_most(self, bound: f32) -> Self {
        Constraint::Max(Box::new(self), bound)
    }

    /// The aspect ratio if this constraint (or the strategy it wraps) is
    /// aspect-ratio linked.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match self {
            Constraint::AspectRatioLinked(ratio) => Some(*ratio),
            Constraint::Min(inner, _) | Constraint::Max(inner, _) => inner.aspect_ratio(),
            _ => None,
        }
    }

    pub fn is_aspect_linked(&self) -> bool {
        self.aspect_ratio().is_some()
    }
}

impl From<f32> for Constraint {
    fn from(value: f32) -> Self {
        Constraint::Pixels(value)
    }
}

/// Complete constraint description for one element: size and position on
/// both axes, plus optional per-axis size clamps.
///
/// Only obtainable through [`PlacementBuilder::build`] (or the infallible
/// shorthands), so a `Placement` with both axes aspect-linked cannot exist.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PlacementBuilder"))]
pub struct Placement {
    width: Option<Constraint>,
    height: Option<Constraint>,
    x: Option<Constraint>,
    y: Option<Constraint>,
    width_range: Option<SizeRange>,
    height_range: Option<SizeRange>,
}

impl Placement {
    pub fn builder() -> PlacementBuilder {
        PlacementBuilder::default()
    }

    /// Fixed pixel size, flow position.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            width: Some(Constraint::Pixels(width)),
            height: Some(Constraint::Pixels(height)),
            ..Default::default()
        }
    }

    /// Fractions of the available region, flow position.
    pub fn percent(width: f32, height: f32) -> Self {
        Self {
            width: Some(Constraint::PercentOfParent(width)),
            height: Some(Constraint::PercentOfParent(height)),
            ..Default::default()
        }
    }

    /// Centered on both axes, content-sized.
    pub fn centered() -> Self {
        Self {
            x: Some(Constraint::Center),
            y: Some(Constraint::Center),
            ..Default::default()
        }
    }

    pub fn width(&self) -> Option<&Constraint> {
        self.width.as_ref()
    }

    pub fn height(&self) -> Option<&Constraint> {
        self.height.as_ref()
    }

    pub fn x(&self) -> Option<&Constraint> {
        self.x.as_ref()
    }

    pub fn y(&self) -> Option<&Constraint> {
        self.y.as_ref()
    }

    /// Size constraint along an axis.
    pub fn size_on(&self, axis: Axis) -> Option<&Constraint> {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    /// Position constraint along an axis.
    pub fn position_on(&self, axis: Axis) -> Option<&Constraint> {
        match axis {
            Axis::Horizontal => self.x(),
            Axis::Vertical => self.y(),
        }
    }

    /// Size clamp along an axis.
    pub fn range_on(&self, axis: Axis) -> Option<&SizeRange> {
        match axis {
            Axis::Horizontal => self.width_range.as_ref(),
            Axis::Vertical => self.height_range.as_ref(),
        }
    }

    /// Whether any position constraint is present.
    pub fn positions(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Reopen this placement for modification.
    pub fn to_builder(&self) -> PlacementBuilder {
        PlacementBuilder {
            width: self.width.clone(),
            height: self.height.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            width_range: self.width_range,
            height_range: self.height_range,
        }
    }
}

/// Builder for [`Placement`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementBuilder {
    width: Option<Constraint>,
    height: Option<Constraint>,
    x: Option<Constraint>,
    y: Option<Constraint>,
    width_range: Option<SizeRange>,
    height_range: Option<SizeRange>,
}

impl PlacementBuilder {
    pub fn width(mut self, constraint: impl Into<Constraint>) -> Self {
        self.width = Some(constraint.into());
        self
    }

    pub fn height(mut self, constraint: impl Into<Constraint>) -> Self {
        self.height = Some(constraint.into());
        self
    }

    pub fn x(mut self, constraint: impl Into<Constraint>) -> Self {
        self.x = Some(constraint.into());
        self
    }

    pub fn y(mut self, constraint: impl Into<Constraint>) -> Self {
        self.y = Some(constraint.into());
        self
    }

    pub fn width_range(mut self, range: SizeRange) -> Self {
        self.width_range = Some(range);
        self
    }

    pub fn height_range(mut self, range: SizeRange) -> Self {
        self.height_range = Some(range);
        self
    }

    /// Validate and freeze the placement.
    pub fn build(self) -> Result<Placement, LayoutError> {
        let width_linked = self.width.as_ref().is_some_and(Constraint::is_aspect_linked);
        let height_linked = self.height.as_ref().is_some_and(Constraint::is_aspect_linked);
        if width_linked && height_linked {
            return Err(LayoutError::BothAxesAspectLinked);
        }
        if self.x.as_ref().is_some_and(Constraint::is_aspect_linked) {
            return Err(LayoutError::AspectLinkedPosition { axis: "x" });
        }
        if self.y.as_ref().is_some_and(Constraint::is_aspect_linked) {
            return Err(LayoutError::AspectLinkedPosition { axis: "y" });
        }

        Ok(Placement {
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
            width_range: self.width_range,
            height_range: self.height_range,
        })
    }
}

impl TryFrom<PlacementBuilder> for Placement {
    type Error = LayoutError;

    fn try_from(builder: PlacementBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_sees_through_bounds() {
        let c = Constraint::aspect(2.0).at_least(10.0).at_most(50.0);
        assert_eq!(c.aspect_ratio(), Some(2.0));
        assert!(!Constraint::px(3.0).at_least(1.0).is_aspect_linked());
    }

    #[test]
    fn test_dual_aspect_rejected() {
        let err = Placement::builder()
            .width(Constraint::aspect(2.0))
            .height(Constraint::aspect(0.5).at_most(100.0))
            .build()
            .unwrap_err();
        assert_eq!(err, LayoutError::BothAxesAspectLinked);
    }

    #[test]
    fn test_aspect_position_rejected() {
        let err = Placement::builder()
            .y(Constraint::aspect(1.0))
            .build()
            .unwrap_err();
        assert_eq!(err, LayoutError::AspectLinkedPosition { axis: "y" });
    }

    #[test]
    fn test_single_aspect_accepted() {
        let placement = Placement::builder()
            .width(Constraint::aspect(2.0))
            .height(100.0)
            .build()
            .unwrap();
        assert!(placement.width().is_some_and(Constraint::is_aspect_linked));
        assert_eq!(placement.height(), Some(&Constraint::Pixels(100.0)));
        assert!(!placement.positions());
    }

    #[test]
    fn test_to_builder_preserves_fields() {
        let placement = Placement::builder()
            .width(40.0)
            .x(Constraint::Center)
            .width_range(SizeRange::at_most(30.0))
            .build()
            .unwrap();
        let rebuilt = placement.to_builder().build().unwrap();
        assert_eq!(placement, rebuilt);
    }
}
