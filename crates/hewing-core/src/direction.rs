use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the six faces of a voxel or block.
/// Indices follow the wire order used by face-index payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Face {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    Up = 4,
    Down = 5,
}

/// All six faces in index order.
pub const ALL_FACES: [Face; 6] = [
    Face::North,
    Face::East,
    Face::South,
    Face::West,
    Face::Up,
    Face::Down,
];

impl Face {
    /// Decode a wire face index. Returns None for indices above 5.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_FACES.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Offset vector for this face. Y-up convention: Down = (0,-1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            Face::North => IVec3::new(0, 0, -1),
            Face::East => IVec3::new(1, 0, 0),
            Face::South => IVec3::new(0, 0, 1),
            Face::West => IVec3::new(-1, 0, 0),
            Face::Up => IVec3::new(0, 1, 0),
            Face::Down => IVec3::new(0, -1, 0),
        }
    }
}
