/// An error type for the capture module.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    /// Error when the given path does not exist.
    #[error("Path does not exist: {0}")]
    PathDoesNotExist(std::path::PathBuf),

    /// Error when a directory holds no decodable frames.
    #[error("Nothing to fetch from: {0}")]
    NoFramesFound(std::path::PathBuf),

    /// Error to manipulate the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error when retrieving before any frame was grabbed.
    #[error("No frame has been grabbed yet")]
    NoFrameGrabbed,

    /// Error to create the grid.
    #[error("Failed to create grid. {0}")]
    GridCreationError(#[from] viskit_grid::GridError),
}
