//! Configuration for the stack engines.
//!
//! Everything here is a plain value with `with_*` setters, so hosts can
//! build options inline or persist them (with the `serde` feature).

use trellis_constraint::Placement;
use trellis_core::sanitize;
use trellis_core::{Axis, Padding};

/// Direction a stack flows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Top to bottom
    #[default]
    Vertical,
    /// Left to right
    Horizontal,
}

impl Direction {
    /// The main (flow) axis.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Vertical => Axis::Vertical,
            Direction::Horizontal => Axis::Horizontal,
        }
    }
}

/// Placement of items on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Left in a vertical stack, top in a horizontal one
    #[default]
    Start,
    Center,
    /// Right in a vertical stack, bottom in a horizontal one
    End,
}

impl Alignment {
    pub const LEFT: Alignment = Alignment::Start;
    pub const TOP: Alignment = Alignment::Start;
    pub const RIGHT: Alignment = Alignment::End;
    pub const BOTTOM: Alignment = Alignment::End;

    /// Fraction of the free cross space placed before the item.
    pub fn factor(self) -> f32 {
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => 0.5,
            Alignment::End => 1.0,
        }
    }
}

/// How a stack reports (and predicts) its cross-axis extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossFill {
    /// As wide (or tall) as the largest item
    #[default]
    MatchWidest,
    /// Every item shares this cross extent; larger items still widen the stack
    Uniform(f32),
    /// At least the cross extent available when the stack began
    FillAvailable,
}

/// Gap between consecutive items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spacing {
    /// Whatever the backend uses between items
    #[default]
    BackendDefault,
    /// Fixed pixels
    Pixels(f32),
    /// Multiples of the backend font size
    Em(f32),
}

impl Spacing {
    /// Spacing in pixels; never negative or non-finite.
    pub fn resolve(self, backend_default: f32, font_size: f32) -> f32 {
        let default = sanitize::extent(backend_default, 0.0);
        let px = match self {
            Spacing::BackendDefault => default,
            Spacing::Pixels(px) => px,
            Spacing::Em(em) => em * font_size,
        };
        sanitize::extent(px, default)
    }
}

impl From<f32> for Spacing {
    fn from(px: f32) -> Self {
        Spacing::Pixels(px)
    }
}

/// Options for [`Stack::begin`](crate::Stack::begin).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackOptions {
    /// Gap between items along the main axis
    pub spacing: Spacing,
    /// Cross-axis alignment of each item
    pub alignment: Alignment,
    /// Cross-axis extent policy
    pub cross_fill: CrossFill,
    /// Cross extent items are aligned within; derived from `cross_fill` when absent
    pub cross_size: Option<f32>,
    /// Inset applied around the items
    pub padding: Padding,
    /// Where to move the cursor before the stack starts
    pub placement: Option<Placement>,
}

impl StackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.spacing = spacing.into();
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_cross_fill(mut self, cross_fill: CrossFill) -> Self {
        self.cross_fill = cross_fill;
        self
    }

    pub fn with_cross_size(mut self, cross_size: f32) -> Self {
        self.cross_size = Some(cross_size);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }
}

/// What is known about the next item before it draws.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemRequest {
    /// Size constraints, resolved against the space left in the stack
    pub size_hint: Option<Placement>,
    pub estimated_width: Option<f32>,
    pub estimated_height: Option<f32>,
    /// Take all remaining width this frame
    pub fill_available_width: bool,
}

impl ItemRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size_hint(mut self, placement: Placement) -> Self {
        self.size_hint = Some(placement);
        self
    }

    pub fn with_estimate(mut self, width: f32, height: f32) -> Self {
        self.estimated_width = Some(width);
        self.estimated_height = Some(height);
        self
    }

    pub fn with_estimated_width(mut self, width: f32) -> Self {
        self.estimated_width = Some(width);
        self
    }

    pub fn with_estimated_height(mut self, height: f32) -> Self {
        self.estimated_height = Some(height);
        self
    }

    pub fn fill_width(mut self) -> Self {
        self.fill_available_width = true;
        self
    }
}
