use glam::IVec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NetError {
    #[error("frame too short: {0} bytes (minimum 7)")]
    FrameTooShort(usize),
    #[error("protocol version {got} does not match {expected}")]
    VersionMismatch { got: u16, expected: u16 },
    #[error("incomplete frame: expected {expected} bytes, got {actual}")]
    IncompleteFrame { expected: usize, actual: usize },
    #[error("frame tag {tag} does not match a {kind} message")]
    TagMismatch { tag: u8, kind: &'static str },
    #[error("failed to serialize message: {0}")]
    Serialize(String),
    #[error("failed to deserialize message: {0}")]
    Deserialize(String),
    #[error("invalid face index {0}")]
    InvalidFace(u8),
    #[error("recipe code is {len} bytes, max {max}")]
    RecipeCodeTooLong { len: usize, max: usize },
    #[error("packed grid is {0} bytes, expected 1024")]
    BadGridLength(usize),
    #[error("requester is too far from {position} (distance squared {distance_sq})")]
    TooFar { position: IVec3, distance_sq: f32 },
    #[error("no carving station at {0}")]
    UnknownStation(IVec3),
    #[error("held item is not a carving tool")]
    NotATool,
}
