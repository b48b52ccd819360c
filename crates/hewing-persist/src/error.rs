/// Errors that can occur while saving or loading an instance snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected HEWN)")]
    InvalidMagic,

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u16),

    #[error("snapshot too small ({0} bytes, minimum {1})")]
    TooSmall(usize, usize),

    #[error("truncated snapshot: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("{field} is not valid UTF-8")]
    InvalidString { field: &'static str },

    #[error("{field} is {len} bytes long, max {max}")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("invalid voxel block size: expected {expected}, got {actual}")]
    InvalidBlockSize { expected: usize, actual: usize },

    #[error("voxel grid decode failed: {0}")]
    Grid(#[from] hewing_core::DecodeError),

    #[error("invalid fill block (expected 4 bytes)")]
    InvalidFillBlock,
}
