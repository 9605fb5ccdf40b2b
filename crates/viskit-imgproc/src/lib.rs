#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// border extrapolation policies and index resolution.
pub mod border;

/// Error types for the imgproc module.
pub mod error;

/// convolution filters and kernel builders.
pub mod filter;

/// integral (prefix-sum) image builders.
pub mod integral;

/// sub-pixel patch extraction.
pub mod patch;

/// gaussian pyramid downsampling.
pub mod pyramid;

/// fixed-capacity sliding window buffer.
pub mod ring;

pub use crate::error::ImgprocError;
