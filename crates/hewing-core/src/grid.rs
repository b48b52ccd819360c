use glam::IVec3;

use crate::constants::{GRID_SIZE, GRID_VOLUME, PACKED_GRID_BYTES, VOXELS_PER_BYTE};
use crate::error::DecodeError;
use crate::material::WoodMaterial;
use crate::types::{in_grid, VoxelCoord};

/// Axis-aligned box of voxel coordinates, `min` inclusive, `max` exclusive.
///
/// A region may extend past the grid; [`VoxelGrid::fill`] skips the cells
/// that fall outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min: IVec3,
    pub max: IVec3,
}

impl Region {
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// The single-voxel region at `coord`.
    pub fn voxel(coord: VoxelCoord) -> Self {
        Self::new(coord, coord + IVec3::ONE)
    }

    /// The whole grid.
    pub fn full() -> Self {
        Self::new(IVec3::ZERO, IVec3::splat(GRID_SIZE as i32))
    }

    /// Intersection with the grid bounds. May be empty.
    pub fn clamped(self) -> Self {
        let hi = IVec3::splat(GRID_SIZE as i32);
        let min = self.min.clamp(IVec3::ZERO, hi);
        let max = self.max.clamp(IVec3::ZERO, hi);
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y || self.max.z <= self.min.z
    }
}

/// The fixed 16x16x16 material array of one carving instance.
///
/// Storage order is x, then y, then z innermost, matching the packed form.
/// Accessing a coordinate outside `[0, 16)` is a caller bug and panics.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: Vec<WoodMaterial>,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("wood_voxels", &self.wood_count())
            .finish()
    }
}

impl VoxelGrid {
    /// A grid with every voxel empty.
    pub fn new() -> Self {
        Self {
            cells: vec![WoodMaterial::Empty; GRID_VOLUME],
        }
    }

    fn index(coord: VoxelCoord) -> usize {
        assert!(in_grid(coord), "voxel coordinate {coord} outside grid");
        let n = GRID_SIZE;
        (coord.x as usize * n + coord.y as usize) * n + coord.z as usize
    }

    fn coord_of(index: usize) -> VoxelCoord {
        let n = GRID_SIZE;
        IVec3::new((index / (n * n)) as i32, ((index / n) % n) as i32, (index % n) as i32)
    }

    pub fn get(&self, coord: VoxelCoord) -> WoodMaterial {
        self.cells[Self::index(coord)]
    }

    pub fn set(&mut self, coord: VoxelCoord, material: WoodMaterial) {
        let idx = Self::index(coord);
        self.cells[idx] = material;
    }

    /// Whether the voxel at `coord` still holds wood.
    pub fn has_wood(&self, coord: VoxelCoord) -> bool {
        self.get(coord).is_wood()
    }

    /// Set every voxel of `region` that lies inside the grid.
    /// Returns how many voxels actually changed.
    pub fn fill(&mut self, region: Region, material: WoodMaterial) -> usize {
        let region = region.clamped();
        if region.is_empty() {
            return 0;
        }
        let mut changed = 0;
        for x in region.min.x..region.max.x {
            for y in region.min.y..region.max.y {
                for z in region.min.z..region.max.z {
                    let idx = Self::index(IVec3::new(x, y, z));
                    if self.cells[idx] != material {
                        self.cells[idx] = material;
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Reset every voxel to empty.
    pub fn clear(&mut self) {
        self.cells.fill(WoodMaterial::Empty);
    }

    /// Whether no voxel holds wood.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|m| !m.is_wood())
    }

    /// Number of voxels holding wood.
    pub fn wood_count(&self) -> usize {
        self.cells.iter().filter(|m| m.is_wood()).count()
    }

    /// Iterate all voxels in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, WoodMaterial)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &m)| (Self::coord_of(i), m))
    }

    /// Pack into the 2-bit wire/storage form.
    ///
    /// Byte `i` holds voxels `4i..4i+4` in storage order, the first voxel in
    /// the lowest two bits.
    pub fn pack(&self) -> [u8; PACKED_GRID_BYTES] {
        let mut out = [0u8; PACKED_GRID_BYTES];
        for (i, chunk) in self.cells.chunks_exact(VOXELS_PER_BYTE).enumerate() {
            let mut byte = 0u8;
            for (k, mat) in chunk.iter().enumerate() {
                byte |= mat.bits() << (k * 2);
            }
            out[i] = byte;
        }
        out
    }

    /// Decode the packed form produced by [`VoxelGrid::pack`].
    pub fn unpack(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != PACKED_GRID_BYTES {
            return Err(DecodeError::WrongLength {
                expected: PACKED_GRID_BYTES,
                actual: bytes.len(),
            });
        }
        let mut cells = Vec::with_capacity(GRID_VOLUME);
        for &byte in bytes {
            for k in 0..VOXELS_PER_BYTE {
                cells.push(WoodMaterial::from_bits(byte >> (k * 2)));
            }
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = VoxelGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.wood_count(), 0);
    }

    #[test]
    fn test_set_get() {
        let mut grid = VoxelGrid::new();
        let c = IVec3::new(3, 9, 15);
        grid.set(c, WoodMaterial::Sapwood);
        assert_eq!(grid.get(c), WoodMaterial::Sapwood);
        assert_eq!(grid.wood_count(), 1);
        assert!(grid.has_wood(c));
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn test_out_of_range_get_panics() {
        let grid = VoxelGrid::new();
        grid.get(IVec3::new(16, 0, 0));
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn test_negative_set_panics() {
        let mut grid = VoxelGrid::new();
        grid.set(IVec3::new(0, -1, 0), WoodMaterial::Bark);
    }

    #[test]
    fn test_pack_layout_z_innermost() {
        let mut grid = VoxelGrid::new();
        // Voxels 0..4 in storage order are (0,0,0..4) and share byte 0.
        grid.set(IVec3::new(0, 0, 0), WoodMaterial::Heartwood);
        grid.set(IVec3::new(0, 0, 1), WoodMaterial::Sapwood);
        grid.set(IVec3::new(0, 0, 3), WoodMaterial::Bark);
        // (0,1,0) is storage index 16 -> byte 4.
        grid.set(IVec3::new(0, 1, 0), WoodMaterial::Bark);
        // (1,0,0) is storage index 256 -> byte 64.
        grid.set(IVec3::new(1, 0, 0), WoodMaterial::Heartwood);

        let packed = grid.pack();
        assert_eq!(packed.len(), PACKED_GRID_BYTES);
        assert_eq!(packed[0], 0b11_00_10_01);
        assert_eq!(packed[4], 0b00_00_00_11);
        assert_eq!(packed[64], 0b00_00_00_01);
        assert_eq!(packed.iter().filter(|&&b| b != 0).count(), 3);
    }

    #[test]
    fn test_unpack_wrong_length() {
        let err = VoxelGrid::unpack(&[0u8; 10]).expect_err("short buffer must fail");
        assert_eq!(
            err,
            DecodeError::WrongLength {
                expected: PACKED_GRID_BYTES,
                actual: 10
            }
        );
        assert!(VoxelGrid::unpack(&[0u8; PACKED_GRID_BYTES + 1]).is_err());
    }

    #[test]
    fn test_unpack_all_ones_is_bark() {
        let grid = VoxelGrid::unpack(&[0xFF; PACKED_GRID_BYTES]).expect("valid length");
        assert_eq!(grid.wood_count(), GRID_VOLUME);
        assert!(grid.iter().all(|(_, m)| m == WoodMaterial::Bark));
    }

    #[test]
    fn test_fill_clamps_outside_cells() {
        let mut grid = VoxelGrid::new();
        let changed = grid.fill(
            Region::new(IVec3::new(-4, 14, 14), IVec3::new(2, 20, 20)),
            WoodMaterial::Heartwood,
        );
        // x in 0..2, y in 14..16, z in 14..16
        assert_eq!(changed, 8);
        assert_eq!(grid.wood_count(), 8);
        assert!(grid.has_wood(IVec3::new(1, 15, 15)));
    }

    #[test]
    fn test_fill_fully_outside_is_noop() {
        let mut grid = VoxelGrid::new();
        let changed = grid.fill(
            Region::new(IVec3::new(20, 0, 0), IVec3::new(30, 16, 16)),
            WoodMaterial::Bark,
        );
        assert_eq!(changed, 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_fill_counts_only_changes() {
        let mut grid = VoxelGrid::new();
        grid.fill(Region::full(), WoodMaterial::Heartwood);
        let changed = grid.fill(Region::voxel(IVec3::new(5, 5, 5)), WoodMaterial::Heartwood);
        assert_eq!(changed, 0);
        let changed = grid.fill(Region::voxel(IVec3::new(5, 5, 5)), WoodMaterial::Empty);
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_iter_coords_match_storage_order() {
        let grid = VoxelGrid::new();
        let coords: Vec<_> = grid.iter().take(17).map(|(c, _)| c).collect();
        assert_eq!(coords[0], IVec3::new(0, 0, 0));
        assert_eq!(coords[1], IVec3::new(0, 0, 1));
        assert_eq!(coords[16], IVec3::new(0, 1, 0));
        assert_eq!(grid.iter().count(), GRID_VOLUME);
    }

    #[test]
    fn test_clear() {
        let mut grid = VoxelGrid::new();
        grid.fill(Region::full(), WoodMaterial::Bark);
        grid.clear();
        assert!(grid.is_empty());
    }
}
