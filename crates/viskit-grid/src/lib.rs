#![deny(missing_docs)]
//! Column-major dense grid types for numeric image processing.

/// sample grid representation for vision pipelines.
pub mod grid;

/// numeric element traits with saturating conversions.
pub mod element;

/// Error types for the grid module.
pub mod error;

/// grid-wide conversion passes.
pub mod ops;

pub use crate::element::GridElement;
pub use crate::error::GridError;
pub use crate::grid::{Grid, GridSize};
