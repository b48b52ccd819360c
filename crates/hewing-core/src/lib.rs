pub mod constants;
pub mod direction;
pub mod error;
pub mod grid;
pub mod mask;
pub mod material;
pub mod types;

pub use direction::Face;
pub use error::DecodeError;
pub use grid::{Region, VoxelGrid};
pub use mask::VoxelMask;
pub use material::WoodMaterial;
pub use types::{ItemStack, VoxelCoord};
