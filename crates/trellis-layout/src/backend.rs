//! The rendering-backend contract and an in-memory implementation of it.

use trellis_core::sanitize;
use trellis_core::{Rect, Vec2};

/// What the layout engines need from an immediate-mode renderer.
///
/// Everything here is a cursor or measurement primitive; the engines never
/// draw. Implement this for the host UI library (or use
/// [`HeadlessBackend`] for tests and offline measurement).
pub trait Backend {
    /// Current draw position.
    fn cursor_position(&self) -> Vec2;

    /// Move the draw position.
    fn set_cursor_position(&mut self, position: Vec2);

    /// Space from the cursor to the edges of the drawing surface.
    fn available_region(&self) -> Vec2;

    /// Size of the whole drawing surface.
    fn content_region(&self) -> Vec2;

    /// Start bracketing draw calls so their combined rect can be measured.
    fn begin_group(&mut self);

    /// Close the innermost bracket; it becomes the last item.
    fn end_group(&mut self);

    /// Size of the most recently completed item or group. May be zero or
    /// non-finite for empty content.
    fn last_item_rect_size(&self) -> Vec2;

    /// Spacing the backend puts between items by default.
    fn default_item_spacing(&self) -> Vec2;

    fn indent(&mut self, amount: f32);

    fn unindent(&mut self, amount: f32);

    /// Move to the start of a fresh line.
    fn new_line(&mut self);

    /// Continue on the line of the previous item.
    ///
    /// `offset > 0` positions relative to the line start; otherwise the
    /// cursor follows the previous item with `spacing`, or the default
    /// spacing when `spacing < 0`.
    fn same_line(&mut self, offset: f32, spacing: f32);

    /// Font size used to resolve em-based spacing.
    fn font_size(&self) -> f32 {
        13.0
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenGroup {
    start: Vec2,
    bounds: Option<Rect>,
    outer_indent: f32,
}

/// Backend that keeps all state in memory and records every drawn item.
///
/// Items are "drawn" with [`item`](Self::item); cursor movement after an
/// item follows the usual immediate-mode rule of starting a new line below
/// it at the current indentation.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    surface: Rect,
    cursor: Vec2,
    indent: f32,
    spacing: Vec2,
    font_size: f32,
    line_end: Vec2,
    groups: Vec<OpenGroup>,
    last_item: Rect,
    items: Vec<Rect>,
    group_override: Option<Vec2>,
}

impl HeadlessBackend {
    /// Surface of the given size at the origin, spacing (8, 4), 13px font.
    pub fn new(size: Vec2) -> Self {
        Self {
            surface: Rect::from_min_size(Vec2::ZERO, size),
            cursor: Vec2::ZERO,
            indent: 0.0,
            spacing: Vec2::new(8.0, 4.0),
            font_size: 13.0,
            line_end: Vec2::ZERO,
            groups: Vec::new(),
            last_item: Rect::default(),
            items: Vec::new(),
            group_override: None,
        }
    }

    pub fn with_spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Move the surface (and the cursor) to a new origin.
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.surface.x = origin.x;
        self.surface.y = origin.y;
        self.cursor = origin;
        self.line_end = origin;
        self
    }

    /// Resize the drawing surface, as a host window resize would.
    pub fn resize(&mut self, size: Vec2) {
        self.surface.width = size.x;
        self.surface.height = size.y;
    }

    /// Draw an item of the given size at the cursor.
    pub fn item(&mut self, size: Vec2) -> Rect {
        let rect = Rect::from_min_size(self.cursor, sanitize::size(size, Vec2::ZERO));
        self.items.push(rect);
        self.submit(rect);
        rect
    }

    /// Make the next `end_group` report `size` instead of the measured rect.
    ///
    /// Lets tests reproduce backends that report degenerate rects.
    pub fn override_next_group_size(&mut self, size: Vec2) {
        self.group_override = Some(size);
    }

    /// Every item drawn so far, in draw order.
    pub fn items(&self) -> &[Rect] {
        &self.items
    }

    pub fn last_item_rect(&self) -> Rect {
        self.last_item
    }

    /// Number of groups currently open.
    pub fn open_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn current_indent(&self) -> f32 {
        self.indent
    }

    fn line_start_x(&self) -> f32 {
        self.surface.x + self.indent
    }

    fn submit(&mut self, rect: Rect) {
        self.last_item = rect;
        if let Some(group) = self.groups.last_mut() {
            group.bounds = Some(match group.bounds {
                Some(bounds) => bounds.union(&rect),
                None => rect,
            });
        }
        self.line_end = Vec2::new(rect.right(), rect.y);
        self.cursor = Vec2::new(self.line_start_x(), rect.bottom() + self.spacing.y);
    }
}

impl Backend for HeadlessBackend {
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn set_cursor_position(&mut self, position: Vec2) {
        self.cursor = position;
    }

    fn available_region(&self) -> Vec2 {
        (self.surface.max() - self.cursor).max(Vec2::ZERO)
    }

    fn content_region(&self) -> Vec2 {
        self.surface.size()
    }

    fn begin_group(&mut self) {
        self.groups.push(OpenGroup {
            start: self.cursor,
            bounds: None,
            outer_indent: self.indent,
        });
        // Lines inside the group start at the group's left edge.
        self.indent = self.cursor.x - self.surface.x;
    }

    fn end_group(&mut self) {
        let Some(group) = self.groups.pop() else {
            return;
        };
        self.indent = group.outer_indent;
        let size = match (self.group_override.take(), group.bounds) {
            (Some(size), _) => size,
            (None, Some(bounds)) => (bounds.max() - group.start).max(Vec2::ZERO),
            (None, None) => Vec2::ZERO,
        };
        let rect = Rect::from_min_size(group.start, size);
        if group.bounds.is_some() {
            self.submit(Rect::from_min_size(group.start, sanitize::size(size, Vec2::ZERO)));
        }
        // Report the raw size, degenerate or not.
        self.last_item = rect;
    }

    fn last_item_rect_size(&self) -> Vec2 {
        self.last_item.size()
    }

    fn default_item_spacing(&self) -> Vec2 {
        self.spacing
    }

    fn indent(&mut self, amount: f32) {
        self.indent += amount;
        self.cursor.x += amount;
    }

    fn unindent(&mut self, amount: f32) {
        self.indent -= amount;
        self.cursor.x -= amount;
    }

    fn new_line(&mut self) {
        self.cursor = Vec2::new(self.line_start_x(), self.cursor.y + self.font_size + self.spacing.y);
    }

    fn same_line(&mut self, offset: f32, spacing: f32) {
        let x = if offset > 0.0 {
            self.line_start_x() + offset
        } else if spacing < 0.0 {
            self.line_end.x + self.spacing.x
        } else {
            self.line_end.x + spacing
        };
        self.cursor = Vec2::new(x, self.line_end.y);
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }
}
