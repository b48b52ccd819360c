use thiserror::Error;

/// Errors produced when decoding a packed voxel grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("packed grid has wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}
