//! Vertical and horizontal stacks.
//!
//! An immediate-mode child only knows its size after it has drawn, so a
//! stack places each child at a predicted position, lets it draw inside a
//! backend group, then measures the group and folds the real size into its
//! running totals before the next child is placed.
//!
//! ```text
//! begin -> (next -> draw -> ItemScope::close)* -> close
//! ```

use std::ops::{Deref, DerefMut};

use trellis_constraint::{resolve, LayoutFrame};
use trellis_core::sanitize;
use trellis_core::{Axis, LayoutError, Padding, Vec2};

use crate::backend::Backend;
use crate::context::LayoutContext;
use crate::cursor::Cursor;
use crate::options::{Alignment, CrossFill, Direction, ItemRequest, StackOptions};

/// A single-axis composer over a borrowed backend.
///
/// Closing is idempotent, and a stack dropped while open closes itself.
pub struct Stack<'b, B: Backend + ?Sized> {
    backend: &'b mut B,
    axis: Axis,
    alignment: Alignment,
    cross_fill: CrossFill,
    cross_size: Option<f32>,
    padding: Padding,
    /// Cursor position when the stack began (outside the padding)
    outer_origin: Vec2,
    /// First item position
    origin: Vec2,
    /// Region left for items at `origin`
    available: Vec2,
    spacing: f32,
    offset: f32,
    cross_extent: f32,
    item_count: usize,
    closed: bool,
}

impl<'b, B: Backend + ?Sized> Stack<'b, B> {
    /// Open a stack at the backend cursor.
    pub fn begin(backend: &'b mut B, direction: Direction, options: StackOptions) -> Self {
        if let Some(placement) = &options.placement {
            let ctx = LayoutContext::capture(&*backend);
            Cursor::new(&mut *backend).move_to_placement(placement, &ctx);
        }

        let ctx = LayoutContext::capture(&*backend);
        let axis = direction.axis();
        let padding = options.padding;
        let origin = ctx.cursor + padding.leading();
        let available =
            (ctx.available - padding.leading() - padding.trailing()).max(Vec2::ZERO);
        let spacing = options
            .spacing
            .resolve(axis.of(backend.default_item_spacing()), backend.font_size());

        log::trace!(
            "{:?} stack at ({}, {}), spacing {}, available {}x{}",
            direction,
            origin.x,
            origin.y,
            spacing,
            available.x,
            available.y
        );

        Self {
            backend,
            axis,
            alignment: options.alignment,
            cross_fill: options.cross_fill,
            cross_size: options.cross_size.and_then(|s| s.is_finite().then_some(s.max(0.0))),
            padding,
            outer_origin: ctx.cursor,
            origin,
            available,
            spacing,
            offset: 0.0,
            cross_extent: 0.0,
            item_count: 0,
            closed: false,
        }
    }

    /// Open a top-to-bottom stack.
    pub fn vertical(backend: &'b mut B, options: StackOptions) -> Self {
        Self::begin(backend, Direction::Vertical, options)
    }

    /// Open a left-to-right stack.
    pub fn horizontal(backend: &'b mut B, options: StackOptions) -> Self {
        Self::begin(backend, Direction::Horizontal, options)
    }

    /// Place the next item and open its measuring scope.
    pub fn next(&mut self, request: ItemRequest) -> Result<ItemScope<'_, 'b, B>, LayoutError> {
        if self.closed {
            return Err(LayoutError::ScopeClosed { scope: "stack" });
        }
        if self.item_count > 0 {
            self.offset += self.spacing;
        }
        self.item_count += 1;

        let predicted = self.predict(&request);
        let cross = self.axis.cross();
        let free = (self.target_cross() - cross.of(predicted)).max(0.0);
        let position = self.origin + self.axis.pack(self.offset, free * self.alignment.factor());

        log::trace!(
            "stack item {} at ({}, {}), predicted {}x{}",
            self.item_count,
            position.x,
            position.y,
            predicted.x,
            predicted.y
        );

        self.backend.set_cursor_position(position);
        self.backend.begin_group();

        Ok(ItemScope {
            stack: self,
            predicted,
            position,
            empty: false,
            open: true,
        })
    }

    /// Place, draw and measure one item.
    pub fn item<R>(
        &mut self,
        request: ItemRequest,
        draw: impl FnOnce(&mut B) -> R,
    ) -> Result<R, LayoutError> {
        let mut scope = self.next(request)?;
        let out = draw(scope.backend());
        scope.close();
        Ok(out)
    }

    /// Finish the stack and leave the cursor just past it.
    ///
    /// A stack without items leaves the cursor untouched. Repeated calls do
    /// nothing.
    pub fn close(&mut self) -> Vec2 {
        if self.closed {
            return self.size();
        }
        self.closed = true;
        if self.item_count == 0 {
            return Vec2::ZERO;
        }

        let main = self.axis.of(self.padding.leading()) + self.offset + self.axis.of(self.padding.trailing());
        let end = self.outer_origin + self.axis.pack(main, 0.0);
        self.backend.set_cursor_position(end);

        let size = self.size();
        log::trace!("stack closed at ({}, {}), size {}x{}", end.x, end.y, size.x, size.y);
        size
    }

    /// Extent occupied so far, padding included. Zero while empty.
    pub fn size(&self) -> Vec2 {
        if self.item_count == 0 {
            return Vec2::ZERO;
        }
        let cross_axis = self.axis.cross();
        let cross = match self.cross_fill {
            CrossFill::MatchWidest => self.cross_extent,
            CrossFill::Uniform(px) => self.cross_extent.max(sanitize::extent(px, 0.0)),
            CrossFill::FillAvailable => self.cross_extent.max(cross_axis.of(self.available)),
        };
        let padding = self.padding.leading() + self.padding.trailing();
        self.axis.pack(
            self.offset + self.axis.of(padding),
            cross + cross_axis.of(padding),
        )
    }

    /// Accumulated main-axis extent of the items and the gaps between them.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest measured cross extent (never below a uniform extent).
    pub fn cross_extent(&self) -> f32 {
        self.cross_extent
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Position of the first item.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The borrowed backend, for drawing between items.
    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    fn uniform_cross(&self) -> Option<f32> {
        match self.cross_fill {
            CrossFill::Uniform(px) => sanitize::positive(px),
            _ => None,
        }
    }

    /// Cross extent items are aligned within.
    fn target_cross(&self) -> f32 {
        if let Some(size) = self.cross_size {
            return size;
        }
        let available = self.axis.cross().of(self.available);
        match (self.cross_fill, self.axis) {
            (CrossFill::Uniform(px), _) => self.cross_extent.max(sanitize::extent(px, 0.0)),
            (CrossFill::FillAvailable, _) | (CrossFill::MatchWidest, Axis::Vertical) => available,
            // A horizontal row aligns against the tallest item so far.
            (CrossFill::MatchWidest, Axis::Horizontal) => self.cross_extent,
        }
    }

    /// Space an item at the current offset may occupy.
    fn item_region(&self) -> Vec2 {
        let main = (self.axis.of(self.available) - self.offset).max(0.0);
        self.axis.pack(main, self.axis.cross().of(self.available))
    }

    fn predict(&self, request: &ItemRequest) -> Vec2 {
        let region = self.item_region();
        let hinted = request.size_hint.as_ref().map(|placement| {
            let frame = LayoutFrame::new(region, region, self.origin);
            (placement, resolve(placement, &frame))
        });

        let predict_axis = |axis: Axis, estimate: Option<f32>, fill: bool| -> f32 {
            hinted
                .as_ref()
                .filter(|(placement, _)| placement.size_on(axis).is_some())
                .map(|(_, result)| result.extent(axis))
                .or_else(|| estimate.filter(|e| e.is_finite() && *e >= 0.0))
                .or_else(|| fill.then(|| axis.of(region)))
                .or_else(|| {
                    (axis == self.axis.cross())
                        .then(|| self.uniform_cross())
                        .flatten()
                })
                .unwrap_or(0.0)
        };

        Vec2::new(
            predict_axis(Axis::Horizontal, request.estimated_width, request.fill_available_width),
            predict_axis(Axis::Vertical, request.estimated_height, false),
        )
    }

    fn fold(&mut self, measured: Vec2) {
        let cross_axis = self.axis.cross();
        self.offset += self.axis.of(measured);
        self.cross_extent = self
            .cross_extent
            .max(cross_axis.of(measured))
            .max(self.uniform_cross().unwrap_or(0.0));
    }
}

impl<B: Backend + ?Sized> Drop for Stack<'_, B> {
    fn drop(&mut self) {
        if !self.closed {
            log::debug!("stack dropped while open, closing");
            self.close();
        }
    }
}

/// Measuring scope for one stack item.
///
/// Derefs to the backend so the item draws through it. Closing (or
/// dropping) the scope ends the backend group and feeds the measured size
/// back into the stack.
pub struct ItemScope<'s, 'b, B: Backend + ?Sized> {
    stack: &'s mut Stack<'b, B>,
    predicted: Vec2,
    position: Vec2,
    empty: bool,
    open: bool,
}

impl<B: Backend + ?Sized> ItemScope<'_, '_, B> {
    pub fn backend(&mut self) -> &mut B {
        &mut *self.stack.backend
    }

    /// Size assumed before the item drew.
    pub fn predicted(&self) -> Vec2 {
        self.predicted
    }

    /// Where the item was placed.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Declare the item intentionally empty: a zero measurement is kept
    /// instead of falling back to the prediction.
    pub fn mark_empty(&mut self) {
        self.empty = true;
    }

    /// Measure the item and fold it into the stack. Returns the size used.
    pub fn close(mut self) -> Vec2 {
        self.finish()
    }

    fn finish(&mut self) -> Vec2 {
        if !self.open {
            return Vec2::ZERO;
        }
        self.open = false;

        self.stack.backend.end_group();
        let raw = self.stack.backend.last_item_rect_size();
        let measured = settle_measurement(raw, self.predicted, self.empty);
        self.stack.fold(measured);

        log::trace!(
            "stack item measured {}x{} (reported {}x{}), offset now {}",
            measured.x,
            measured.y,
            raw.x,
            raw.y,
            self.stack.offset
        );
        measured
    }
}

impl<B: Backend + ?Sized> Deref for ItemScope<'_, '_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.stack.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for ItemScope<'_, '_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.stack.backend
    }
}

impl<B: Backend + ?Sized> Drop for ItemScope<'_, '_, B> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Pick the size to fold for a measured child.
///
/// Components that are non-finite or not positive fall back to the
/// prediction, unless the child was declared empty.
pub(crate) fn settle_measurement(raw: Vec2, predicted: Vec2, empty: bool) -> Vec2 {
    if empty {
        return sanitize::size(raw, Vec2::ZERO);
    }
    if !raw.is_finite() {
        log::debug!("backend reported a non-finite rect {}x{}, using prediction", raw.x, raw.y);
    }
    let settle = |measured: f32, predicted: f32| sanitize::positive(measured).unwrap_or(predicted);
    sanitize::size(
        Vec2::new(settle(raw.x, predicted.x), settle(raw.y, predicted.y)),
        Vec2::ZERO,
    )
}
