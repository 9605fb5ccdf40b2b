/// An error type for the imgproc module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImgprocError {
    /// Error when a kernel is empty or otherwise unusable.
    #[error("Invalid kernel lengths ({0}, {1})")]
    InvalidKernelLength(usize, usize),

    /// Error when the source and destination extents disagree.
    #[error("Source size ({0}x{1}) does not match the destination size ({2}x{3})")]
    InvalidGridSize(usize, usize, usize, usize),

    /// Error when a Gaussian sigma is not strictly positive.
    #[error("Sigma must be strictly positive, got {0}")]
    InvalidSigma(f32),
}
