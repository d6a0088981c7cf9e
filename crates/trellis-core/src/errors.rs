//! Error types for the Trellis layout engine.
//!
//! Only caller logic errors surface here. Numeric degeneracies are
//! sanitized (see [`crate::sanitize`]) and never become errors.

use thiserror::Error;

/// Errors raised by the solver, the layout engines and the template renderer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Width and height cannot both be aspect-ratio linked")]
    BothAxesAspectLinked,

    #[error("Aspect-ratio linking is only valid on a size axis, not on position {axis}")]
    AspectLinkedPosition { axis: &'static str },

    #[error("Grid column {column} with span {span} exceeds the {columns} declared columns")]
    ColumnOutOfRange {
        column: usize,
        span: usize,
        columns: usize,
    },

    #[error("Grid row {row} with span {span} exceeds the row limit of {max_rows}")]
    RowOutOfRange {
        row: usize,
        span: usize,
        max_rows: usize,
    },

    #[error("Grid declared without columns")]
    NoColumns,

    #[error("Cannot add children to a closed {scope}")]
    ScopeClosed { scope: &'static str },
}

impl LayoutError {
    /// Whether this error stems from an invalid layout description rather
    /// than from driving an engine out of order.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LayoutError::ScopeClosed { .. })
    }
}

/// Result alias used throughout the workspace.
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
