#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use viskit_grid as grid;

#[doc(inline)]
pub use viskit_imgproc as imgproc;

#[doc(inline)]
pub use viskit_capture as capture;
