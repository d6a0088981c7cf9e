//! Two-dimensional composer with measured track growth.
//!
//! Columns are planned once from their [`TrackSize`] definitions and the
//! width available when the grid begins. Rows start at their fixed size
//! or minimum and follow content. Every closed cell feeds its measured size
//! back into the non-fixed tracks it spans, so later cells see the grown
//! offsets.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;
use trellis_constraint::{resolve, LayoutFrame, Placement};
use trellis_core::sanitize;
use trellis_core::{Axis, LayoutError, Vec2};

use crate::backend::Backend;
use crate::context::{FrameOverrides, LayoutContext};
use crate::cursor::Cursor;
use crate::options::Spacing;
use crate::stack::settle_measurement;

type Tracks = SmallVec<[TrackPlan; 8]>;
type Offsets = SmallVec<[f32; 8]>;

/// Rows a single cell may add past the ones that already exist when no
/// `max_rows` is configured.
pub const ROW_GROWTH_LIMIT: usize = 4096;

/// Track sizing for columns and rows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackSize {
    /// Fixed size in pixels; never grows
    Fixed(f32),
    /// Share of the space left after fixed tracks
    Weighted(f32),
    /// Leftover space, split evenly, never below the given minimum
    Auto(f32),
}

impl Default for TrackSize {
    fn default() -> Self {
        TrackSize::Auto(0.0)
    }
}

impl TrackSize {
    pub fn is_fixed(&self) -> bool {
        matches!(self, TrackSize::Fixed(_))
    }

    /// Smallest size the track may take.
    pub fn min(&self) -> f32 {
        match *self {
            TrackSize::Fixed(px) => sanitize::extent(px, 0.0),
            TrackSize::Auto(min) => sanitize::extent(min, 0.0),
            TrackSize::Weighted(_) => 0.0,
        }
    }

    fn weight(&self) -> f32 {
        match *self {
            TrackSize::Weighted(w) => sanitize::positive(w).unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Resolved state of one column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPlan {
    pub kind: TrackSize,
    /// Current size in pixels
    pub size: f32,
    /// Floor from the definition
    pub min: f32,
    /// Largest per-track share any cell has measured
    pub content: f32,
}

impl TrackPlan {
    fn new(kind: TrackSize, size: f32) -> Self {
        let min = kind.min();
        Self {
            kind,
            size: sanitize::extent(size, min).max(min),
            min,
            content: 0.0,
        }
    }

    /// Grow to hold `share`. Fixed tracks never change.
    fn grow(&mut self, share: f32) -> bool {
        if self.kind.is_fixed() {
            return false;
        }
        let share = sanitize::extent(share, 0.0);
        self.content = self.content.max(share);
        let next = self.size.max(self.min).max(share);
        let grew = next > self.size;
        self.size = next;
        grew
    }
}

/// Split `available` among column definitions.
///
/// Fixed tracks and the gaps between tracks are taken first. When any
/// track is weighted, auto tracks sit at their minimum and the weighted
/// tracks share what is left by weight; otherwise auto tracks split the
/// remainder evenly.
pub fn distribute(kinds: &[TrackSize], available: f32, spacing: f32) -> SmallVec<[TrackPlan; 8]> {
    let available = sanitize::extent(available, 0.0);
    let spacing = sanitize::extent(spacing, 0.0);
    let gaps = spacing * kinds.len().saturating_sub(1) as f32;

    let fixed: f32 = kinds
        .iter()
        .filter(|k| k.is_fixed())
        .map(TrackSize::min)
        .sum();
    let weights: f32 = kinds.iter().map(TrackSize::weight).sum();
    let autos = kinds.iter().filter(|k| matches!(k, TrackSize::Auto(_))).count();
    let remaining = (available - gaps - fixed).max(0.0);
    let auto_floor: f32 = kinds
        .iter()
        .filter(|k| matches!(k, TrackSize::Auto(_)))
        .map(TrackSize::min)
        .sum();
    let weighted_pool = (remaining - auto_floor).max(0.0);

    kinds
        .iter()
        .map(|kind| {
            let size = match *kind {
                TrackSize::Fixed(_) => kind.min(),
                TrackSize::Weighted(_) if weights > 0.0 => weighted_pool * kind.weight() / weights,
                TrackSize::Weighted(_) => 0.0,
                TrackSize::Auto(min) if weights == 0.0 && autos > 0 => {
                    (remaining / autos as f32).max(sanitize::extent(min, 0.0))
                }
                TrackSize::Auto(min) => min,
            };
            TrackPlan::new(*kind, size)
        })
        .collect()
}

fn prefix_offsets(tracks: &[TrackPlan], spacing: f32) -> Offsets {
    let mut offsets = Offsets::with_capacity(tracks.len());
    let mut current = 0.0;
    for track in tracks {
        offsets.push(current);
        current += track.size + spacing;
    }
    offsets
}

fn span_extent(tracks: &[TrackPlan], spacing: f32) -> f32 {
    let sizes: f32 = tracks.iter().map(|t| t.size).sum();
    sizes + spacing * tracks.len().saturating_sub(1) as f32
}

/// Options for [`Grid::begin`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Column definitions; at least one is required
    pub columns: Vec<TrackSize>,
    /// Row definitions; rows past the end are `Auto(0)`
    pub rows: Vec<TrackSize>,
    pub column_spacing: Spacing,
    pub row_spacing: Spacing,
    /// Where to move the cursor before the grid starts
    pub placement: Option<Placement>,
    /// Available-width drift (px) that triggers column re-distribution
    pub resize_tolerance: f32,
    /// Upper bound on the row count. When absent, one cell may add at most
    /// [`ROW_GROWTH_LIMIT`] rows past the existing ones.
    pub max_rows: Option<usize>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            column_spacing: Spacing::BackendDefault,
            row_spacing: Spacing::BackendDefault,
            placement: None,
            resize_tolerance: 0.5,
            max_rows: None,
        }
    }
}

impl GridOptions {
    pub fn new(columns: impl IntoIterator<Item = TrackSize>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = TrackSize>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    /// Same spacing between columns and between rows.
    pub fn with_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        let spacing = spacing.into();
        self.column_spacing = spacing;
        self.row_spacing = spacing;
        self
    }

    pub fn with_column_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.column_spacing = spacing.into();
        self
    }

    pub fn with_row_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.row_spacing = spacing.into();
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_resize_tolerance(mut self, tolerance: f32) -> Self {
        self.resize_tolerance = tolerance;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// What is known about a cell before it draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CellRequest {
    /// Size (and offset) constraints, resolved against the spanned area
    pub placement: Option<Placement>,
    /// Columns covered; values below 1 count as 1
    pub column_span: usize,
    /// Rows covered; values below 1 count as 1
    pub row_span: usize,
    pub estimated_width: Option<f32>,
    pub estimated_height: Option<f32>,
    /// Take the whole spanned width
    pub fill_width: bool,
}

impl Default for CellRequest {
    fn default() -> Self {
        Self {
            placement: None,
            column_span: 1,
            row_span: 1,
            estimated_width: None,
            estimated_height: None,
            fill_width: false,
        }
    }
}

impl CellRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_span(mut self, columns: usize, rows: usize) -> Self {
        self.column_span = columns;
        self.row_span = rows;
        self
    }

    pub fn with_column_span(mut self, columns: usize) -> Self {
        self.column_span = columns;
        self
    }

    pub fn with_row_span(mut self, rows: usize) -> Self {
        self.row_span = rows;
        self
    }

    pub fn with_estimate(mut self, width: f32, height: f32) -> Self {
        self.estimated_width = Some(width);
        self.estimated_height = Some(height);
        self
    }

    pub fn fill_width(mut self) -> Self {
        self.fill_width = true;
        self
    }
}

/// A grid over a borrowed backend.
///
/// Column widths and row heights never shrink while the grid is open,
/// except when the available width drifts and the columns are planned
/// again (measured content still acts as a floor then).
pub struct Grid<'b, B: Backend + ?Sized> {
    backend: &'b mut B,
    column_kinds: SmallVec<[TrackSize; 8]>,
    columns: Tracks,
    column_offsets: Offsets,
    row_kinds: Vec<TrackSize>,
    rows: Tracks,
    row_offsets: Offsets,
    column_spacing: f32,
    row_spacing: f32,
    origin: Vec2,
    /// Available width and content width when the grid began
    base_available: f32,
    base_content: f32,
    /// Width the current column plan was distributed over
    planned_width: f32,
    resize_tolerance: f32,
    max_rows: Option<usize>,
    rows_touched: usize,
    cell_count: usize,
    closed: bool,
}

impl<'b, B: Backend + ?Sized> Grid<'b, B> {
    /// Open a grid at the backend cursor.
    pub fn begin(backend: &'b mut B, options: GridOptions) -> Result<Self, LayoutError> {
        if options.columns.is_empty() {
            return Err(LayoutError::NoColumns);
        }

        if let Some(placement) = &options.placement {
            let ctx = LayoutContext::capture(&*backend);
            Cursor::new(&mut *backend).move_to_placement(placement, &ctx);
        }

        let ctx = LayoutContext::capture(&*backend);
        let default_spacing = backend.default_item_spacing();
        let font_size = backend.font_size();
        let column_spacing = options.column_spacing.resolve(default_spacing.x, font_size);
        let row_spacing = options.row_spacing.resolve(default_spacing.y, font_size);

        let column_kinds: SmallVec<[TrackSize; 8]> = options.columns.iter().copied().collect();
        let columns = distribute(&column_kinds, ctx.available.x, column_spacing);
        let column_offsets = prefix_offsets(&columns, column_spacing);

        log::debug!(
            "grid at ({}, {}): {} columns over {}px, widths {:?}",
            ctx.cursor.x,
            ctx.cursor.y,
            columns.len(),
            ctx.available.x,
            columns.iter().map(|c| c.size).collect::<Vec<_>>()
        );

        Ok(Self {
            backend,
            column_kinds,
            columns,
            column_offsets,
            row_kinds: options.rows,
            rows: Tracks::new(),
            row_offsets: Offsets::new(),
            column_spacing,
            row_spacing,
            origin: ctx.cursor,
            base_available: ctx.available.x,
            base_content: ctx.content.x,
            planned_width: ctx.available.x,
            resize_tolerance: sanitize::extent(options.resize_tolerance, 0.5),
            max_rows: options.max_rows,
            rows_touched: 0,
            cell_count: 0,
            closed: false,
        })
    }

    /// Place a cell at `(column, row)` and open its measuring scope.
    pub fn cell(
        &mut self,
        column: usize,
        row: usize,
        request: CellRequest,
    ) -> Result<CellScope<'_, 'b, B>, LayoutError> {
        if self.closed {
            return Err(LayoutError::ScopeClosed { scope: "grid" });
        }
        let column_span = request.column_span.max(1);
        let row_span = request.row_span.max(1);

        let columns = self.columns.len();
        if column.saturating_add(column_span) > columns {
            return Err(LayoutError::ColumnOutOfRange {
                column,
                span: column_span,
                columns,
            });
        }
        let max_rows = self.row_limit();
        let row_end = match row.checked_add(row_span) {
            Some(end) if end <= max_rows => end,
            _ => {
                return Err(LayoutError::RowOutOfRange {
                    row,
                    span: row_span,
                    max_rows,
                })
            }
        };

        self.follow_resize();
        self.ensure_rows(row_end);
        self.cell_count += 1;

        let available = Vec2::new(
            span_extent(&self.columns[column..column + column_span], self.column_spacing),
            span_extent(&self.rows[row..row_end], self.row_spacing),
        );
        let cell_origin =
            self.origin + Vec2::new(self.column_offsets[column], self.row_offsets[row]);
        let frame = LayoutContext::capture(&*self.backend)
            .to_layout_frame(FrameOverrides::region(available).with_target(cell_origin));
        let (position, planned) = plan_cell(&request, &frame);

        log::trace!(
            "grid cell ({}, {}) span {}x{} at ({}, {}), available {}x{}, planned {}x{}",
            column,
            row,
            column_span,
            row_span,
            position.x,
            position.y,
            available.x,
            available.y,
            planned.x,
            planned.y
        );

        self.backend.set_cursor_position(position);
        self.backend.begin_group();

        Ok(CellScope {
            grid: self,
            column,
            row,
            column_span,
            row_span,
            available,
            planned,
            position,
            empty: false,
            open: true,
        })
    }

    /// Place, draw and measure one cell.
    pub fn place<R>(
        &mut self,
        column: usize,
        row: usize,
        request: CellRequest,
        draw: impl FnOnce(&mut B) -> R,
    ) -> Result<R, LayoutError> {
        let mut scope = self.cell(column, row, request)?;
        let out = draw(scope.backend());
        scope.close();
        Ok(out)
    }

    /// Finish the grid and leave the cursor below the touched rows.
    ///
    /// A grid without cells leaves the cursor untouched. Repeated calls do
    /// nothing.
    pub fn close(&mut self) -> Vec2 {
        if self.closed {
            return self.size();
        }
        self.closed = true;
        if self.cell_count == 0 {
            return Vec2::ZERO;
        }

        let size = self.size();
        self.backend.set_cursor_position(self.origin + Vec2::new(0.0, size.y));
        log::debug!(
            "grid closed: {} cells, {} rows, size {}x{}",
            self.cell_count,
            self.rows_touched,
            size.x,
            size.y
        );
        size
    }

    /// Extent of all columns and of the rows touched so far.
    pub fn size(&self) -> Vec2 {
        let width = span_extent(&self.columns, self.column_spacing);
        let height = match self.rows_touched {
            0 => 0.0,
            n => self.row_offsets[n - 1] + self.rows[n - 1].size,
        };
        Vec2::new(width, height)
    }

    pub fn columns(&self) -> &[TrackPlan] {
        &self.columns
    }

    pub fn rows(&self) -> &[TrackPlan] {
        &self.rows
    }

    pub fn column_widths(&self) -> Vec<f32> {
        self.columns.iter().map(|c| c.size).collect()
    }

    /// Column starts relative to the grid origin.
    pub fn column_offsets(&self) -> &[f32] {
        &self.column_offsets
    }

    pub fn row_heights(&self) -> Vec<f32> {
        self.rows.iter().map(|r| r.size).collect()
    }

    /// Row starts relative to the grid origin.
    pub fn row_offsets(&self) -> &[f32] {
        &self.row_offsets
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    /// Row count a cell may reach right now.
    fn row_limit(&self) -> usize {
        self.max_rows.unwrap_or_else(|| {
            self.rows
                .len()
                .max(self.row_kinds.len())
                .saturating_add(ROW_GROWTH_LIMIT)
        })
    }

    /// Re-plan columns when the surface width moved since the grid began.
    fn follow_resize(&mut self) {
        let content = sanitize::extent(self.backend.content_region().x, self.base_content);
        let width = (self.base_available + content - self.base_content).max(0.0);
        if (width - self.planned_width).abs() <= self.resize_tolerance {
            return;
        }

        log::debug!(
            "grid available width drifted from {} to {}, re-planning columns",
            self.planned_width,
            width
        );
        let fresh = distribute(&self.column_kinds, width, self.column_spacing);
        for (plan, fresh) in self.columns.iter_mut().zip(fresh) {
            plan.size = fresh.size.max(plan.content);
        }
        self.planned_width = width;
        self.column_offsets = prefix_offsets(&self.columns, self.column_spacing);
    }

    fn ensure_rows(&mut self, count: usize) {
        if self.rows.len() >= count {
            return;
        }
        while self.rows.len() < count {
            let kind = self.row_kinds.get(self.rows.len()).copied().unwrap_or_default();
            // Rows follow content; weights have nothing to divide.
            let size = match kind {
                TrackSize::Weighted(_) => 0.0,
                other => other.min(),
            };
            self.rows.push(TrackPlan::new(kind, size));
        }
        self.row_offsets = prefix_offsets(&self.rows, self.row_spacing);
    }

    fn fold(&mut self, scope: &CellFold, measured: Vec2) {
        let span = scope.column..scope.column + scope.column_span;
        let share = measured.x / scope.column_span as f32;
        let mut grew = false;
        for plan in &mut self.columns[span] {
            grew |= plan.grow(share);
        }
        if grew {
            self.column_offsets = prefix_offsets(&self.columns, self.column_spacing);
        }

        let span = scope.row..scope.row + scope.row_span;
        let share = measured.y / scope.row_span as f32;
        for plan in &mut self.rows[span.clone()] {
            plan.grow(share);
        }
        let covered = span_extent(&self.rows[span.clone()], self.row_spacing);
        let growable = self.rows[span.clone()].iter().filter(|r| !r.kind.is_fixed()).count();
        if covered < measured.y && growable > 0 {
            let bonus = (measured.y - covered) / growable as f32;
            for plan in self.rows[span].iter_mut().filter(|r| !r.kind.is_fixed()) {
                plan.size += bonus;
            }
        }
        self.row_offsets = prefix_offsets(&self.rows, self.row_spacing);
        self.rows_touched = self.rows_touched.max(scope.row + scope.row_span);
    }
}

impl<B: Backend + ?Sized> Drop for Grid<'_, B> {
    fn drop(&mut self) {
        if !self.closed {
            log::debug!("grid dropped while open, closing");
            self.close();
        }
    }
}

/// Resolve where a cell goes and how large it is expected to be.
fn plan_cell(request: &CellRequest, frame: &LayoutFrame) -> (Vec2, Vec2) {
    let available = frame.available;
    let resolved = request
        .placement
        .as_ref()
        .map(|placement| (placement, resolve(placement, frame)));

    let plan_axis = |axis: Axis, estimate: Option<f32>, fill: bool| -> f32 {
        resolved
            .as_ref()
            .filter(|(placement, _)| placement.size_on(axis).is_some())
            .map(|(_, result)| result.extent(axis))
            .or_else(|| estimate.filter(|e| e.is_finite() && *e >= 0.0))
            .or_else(|| fill.then(|| axis.of(available)))
            .unwrap_or(0.0)
    };

    let planned = Vec2::new(
        plan_axis(Axis::Horizontal, request.estimated_width, request.fill_width),
        plan_axis(Axis::Vertical, request.estimated_height, false),
    );
    let position = resolved.map_or(frame.target, |(_, result)| result.position());
    (position, planned)
}

/// Coordinates of a cell, kept apart from the scope's borrow of the grid.
struct CellFold {
    column: usize,
    row: usize,
    column_span: usize,
    row_span: usize,
}

/// Measuring scope for one grid cell. Derefs to the backend.
pub struct CellScope<'g, 'b, B: Backend + ?Sized> {
    grid: &'g mut Grid<'b, B>,
    column: usize,
    row: usize,
    column_span: usize,
    row_span: usize,
    available: Vec2,
    planned: Vec2,
    position: Vec2,
    empty: bool,
    open: bool,
}

impl<B: Backend + ?Sized> CellScope<'_, '_, B> {
    pub fn backend(&mut self) -> &mut B {
        &mut *self.grid.backend
    }

    /// Size of the spanned tracks, spacing included.
    pub fn available(&self) -> Vec2 {
        self.available
    }

    pub fn planned(&self) -> Vec2 {
        self.planned
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Spans after clamping, as `(columns, rows)`.
    pub fn span(&self) -> (usize, usize) {
        (self.column_span, self.row_span)
    }

    /// Keep a zero measurement instead of the planned size.
    pub fn mark_empty(&mut self) {
        self.empty = true;
    }

    /// Measure the cell and grow the tracks it spans.
    pub fn close(mut self) -> Vec2 {
        self.finish()
    }

    fn finish(&mut self) -> Vec2 {
        if !self.open {
            return Vec2::ZERO;
        }
        self.open = false;

        self.grid.backend.end_group();
        let raw = self.grid.backend.last_item_rect_size();
        let measured = settle_measurement(raw, self.planned, self.empty);
        let cell = CellFold {
            column: self.column,
            row: self.row,
            column_span: self.column_span,
            row_span: self.row_span,
        };
        self.grid.fold(&cell, measured);

        log::trace!(
            "grid cell ({}, {}) measured {}x{}",
            self.column,
            self.row,
            measured.x,
            measured.y
        );
        measured
    }
}

impl<B: Backend + ?Sized> Deref for CellScope<'_, '_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.grid.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for CellScope<'_, '_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.grid.backend
    }
}

impl<B: Backend + ?Sized> Drop for CellScope<'_, '_, B> {
    fn drop(&mut self) {
        self.finish();
    }
}
