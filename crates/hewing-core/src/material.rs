use serde::{Deserialize, Serialize};

/// Material held by one voxel of the carving grid.
/// Values fit in two bits; the discriminant is the packed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum WoodMaterial {
    #[default]
    Empty = 0,
    Heartwood = 1,
    Sapwood = 2,
    Bark = 3,
}

impl WoodMaterial {
    /// All materials in discriminant order.
    pub const ALL: [WoodMaterial; 4] = [
        WoodMaterial::Empty,
        WoodMaterial::Heartwood,
        WoodMaterial::Sapwood,
        WoodMaterial::Bark,
    ];

    /// Decode from the low two bits of `bits`. Every 2-bit value is valid.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => WoodMaterial::Empty,
            1 => WoodMaterial::Heartwood,
            2 => WoodMaterial::Sapwood,
            _ => WoodMaterial::Bark,
        }
    }

    /// The 2-bit encoding of this material.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether this voxel still holds wood of any kind.
    pub fn is_wood(self) -> bool {
        self != WoodMaterial::Empty
    }
}
