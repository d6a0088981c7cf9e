//! Core types and utilities for the Trellis layout engine.
//!
//! This crate provides the foundational types used across all other trellis crates:
//! - Geometry primitives (vectors, rectangles, size ranges, padding)
//! - Sanitization helpers for degenerate geometry
//! - Error types

pub mod errors;
pub mod geometry;
pub mod sanitize;

pub use errors::*;
pub use geometry::*;
