/// An error type for the grid module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GridError {
    /// Error when the data length does not match the grid extents.
    #[error("Data length ({0}) does not match the grid size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when an element cannot be represented in the target type.
    #[error("Failed to cast grid element")]
    CastError,
}
