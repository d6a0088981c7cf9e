//! Imperative cursor placement outside of stacks and grids.
//!
//! None of these measure anything; they only command the backend cursor.
//! Inputs are sanitized, so nothing here fails.

use std::ops::{Deref, DerefMut};

use trellis_constraint::{resolve, LayoutResult, Placement};
use trellis_core::sanitize;
use trellis_core::Vec2;

use crate::backend::Backend;
use crate::context::LayoutContext;

/// Cursor commands over a borrowed backend.
pub struct Cursor<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: Backend + ?Sized> Cursor<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    pub fn position(&self) -> Vec2 {
        self.backend.cursor_position()
    }

    /// Absolute move. Non-finite components keep the current coordinate.
    pub fn move_to(&mut self, position: Vec2) {
        let current = self.backend.cursor_position();
        self.backend.set_cursor_position(sanitize::point(position, current));
    }

    /// Resolve a placement against a captured context and move there.
    pub fn move_to_placement(&mut self, placement: &Placement, context: &LayoutContext) -> LayoutResult {
        let result = resolve(placement, &context.frame());
        self.move_to(result.position());
        result
    }

    /// Relative move. Non-finite deltas are ignored per component.
    pub fn move_by(&mut self, delta: Vec2) {
        let delta = sanitize::point(delta, Vec2::ZERO);
        let current = self.backend.cursor_position();
        self.move_to(current + delta);
    }

    /// Indent until the returned guard is closed or dropped.
    pub fn indent(&mut self, amount: f32) -> IndentGuard<'_, B> {
        let amount = sanitize::finite_or(amount, 0.0);
        self.backend.indent(amount);
        IndentGuard {
            backend: &mut *self.backend,
            amount,
            active: true,
        }
    }

    /// Raw unindent for hosts that bracket indentation themselves.
    pub fn unindent(&mut self, amount: f32) {
        self.backend.unindent(sanitize::finite_or(amount, 0.0));
    }

    /// Start a new line.
    pub fn line(&mut self) {
        self.backend.new_line();
    }

    /// Stay on the previous item's line. `offset` is measured from the line
    /// start; `spacing` replaces the default gap after the previous item.
    pub fn same_line(&mut self, offset: Option<f32>, spacing: Option<f32>) {
        let offset = offset.and_then(sanitize::positive).unwrap_or(0.0);
        let spacing = spacing
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(-1.0);
        self.backend.same_line(offset, spacing);
    }
}

/// Scoped indentation. Unindents by the same amount exactly once.
///
/// Derefs to the backend so indented content can be drawn through it.
pub struct IndentGuard<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
    amount: f32,
    active: bool,
}

impl<B: Backend + ?Sized> IndentGuard<'_, B> {
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// End the indentation now.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.active {
            self.active = false;
            self.backend.unindent(self.amount);
        }
    }
}

impl<B: Backend + ?Sized> Deref for IndentGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for IndentGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.backend
    }
}

impl<B: Backend + ?Sized> Drop for IndentGuard<'_, B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use trellis_constraint::Constraint;

    fn backend() -> HeadlessBackend {
        HeadlessBackend::new(Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_move_to_keeps_current_on_nan() {
        let mut backend = backend();
        let mut cursor = Cursor::new(&mut backend);
        cursor.move_to(Vec2::new(20.0, 30.0));
        cursor.move_to(Vec2::new(f32::NAN, 50.0));
        assert_eq!(cursor.position(), Vec2::new(20.0, 50.0));
        cursor.move_by(Vec2::new(5.0, f32::INFINITY));
        assert_eq!(cursor.position(), Vec2::new(25.0, 50.0));
    }

    #[test]
    fn test_move_to_placement_centers() {
        let mut backend = backend();
        let ctx = LayoutContext::capture(&backend);
        let placement = Placement::builder()
            .width(100.0)
            .height(50.0)
            .x(Constraint::Center)
            .y(Constraint::Center)
            .build()
            .unwrap();
        let result = Cursor::new(&mut backend).move_to_placement(&placement, &ctx);
        assert_eq!(result.position(), Vec2::new(150.0, 125.0));
        assert_eq!(backend.cursor_position(), Vec2::new(150.0, 125.0));
    }

    #[test]
    fn test_indent_guard_unindents_once() {
        let mut backend = backend();
        {
            let mut cursor = Cursor::new(&mut backend);
            let mut guard = cursor.indent(24.0);
            assert_eq!(guard.current_indent(), 24.0);
            guard.item(Vec2::new(10.0, 10.0));
            guard.close();
        }
        assert_eq!(backend.current_indent(), 0.0);
        assert_eq!(backend.items()[0].x, 24.0);

        {
            let mut cursor = Cursor::new(&mut backend);
            let _guard = cursor.indent(f32::NAN);
        }
        assert_eq!(backend.current_indent(), 0.0);
    }

    #[test]
    fn test_same_line_sanitizes() {
        let mut backend = backend();
        backend.item(Vec2::new(40.0, 10.0));
        let mut cursor = Cursor::new(&mut backend);
        cursor.same_line(Some(f32::NAN), Some(-3.0));
        assert_eq!(cursor.position(), Vec2::new(48.0, 0.0));
        cursor.same_line(None, Some(2.0));
        assert_eq!(cursor.position(), Vec2::new(42.0, 0.0));
        cursor.line();
        assert_eq!(cursor.position(), Vec2::new(0.0, 17.0));
    }
}
