use glam::{IVec3, UVec3};

use crate::constants::GRID_SIZE;

/// Dense 3D boolean mask. `true` marks a cell that must keep wood.
///
/// Compiled recipes always produce grid-sized masks, but masks carry their
/// own dimensions so that copies into a grid-sized target can clamp.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelMask {
    dims: UVec3,
    bits: Vec<bool>,
}

impl std::fmt::Debug for VoxelMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelMask")
            .field("dims", &self.dims)
            .field("set", &self.count())
            .finish()
    }
}

impl Default for VoxelMask {
    fn default() -> Self {
        Self::grid()
    }
}

impl VoxelMask {
    /// All-false mask of the given dimensions.
    pub fn new(dims: UVec3) -> Self {
        let len = (dims.x * dims.y * dims.z) as usize;
        Self {
            dims,
            bits: vec![false; len],
        }
    }

    /// All-false mask the size of the carving grid.
    pub fn grid() -> Self {
        Self::new(UVec3::splat(GRID_SIZE as u32))
    }

    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    fn index(&self, coord: IVec3) -> Option<usize> {
        if coord.cmplt(IVec3::ZERO).any() {
            return None;
        }
        let c = coord.as_uvec3();
        if c.cmpge(self.dims).any() {
            return None;
        }
        Some(((c.x * self.dims.y + c.y) * self.dims.z + c.z) as usize)
    }

    /// Value at `coord`; cells outside the mask read as false.
    pub fn get(&self, coord: IVec3) -> bool {
        self.index(coord).map(|i| self.bits[i]).unwrap_or(false)
    }

    /// Set the cell at `coord`. Panics if `coord` lies outside the mask.
    pub fn set(&mut self, coord: IVec3, value: bool) {
        let idx = self
            .index(coord)
            .unwrap_or_else(|| panic!("mask coordinate {coord} outside {}", self.dims));
        self.bits[idx] = value;
    }

    /// Number of true cells.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Copy into a grid-sized mask. Cells beyond either extent are dropped.
    /// Returns the copy and whether the dimensions differed.
    pub fn clamped_to_grid(&self) -> (VoxelMask, bool) {
        let grid = UVec3::splat(GRID_SIZE as u32);
        let mut out = VoxelMask::grid();
        let bound = self.dims.min(grid);
        for x in 0..bound.x {
            for y in 0..bound.y {
                for z in 0..bound.z {
                    let c = IVec3::new(x as i32, y as i32, z as i32);
                    if self.get(c) {
                        out.set(c, true);
                    }
                }
            }
        }
        (out, self.dims != grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_mask_all_false() {
        let mask = VoxelMask::grid();
        assert_eq!(mask.dims(), UVec3::splat(16));
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_out_of_range_reads_false() {
        let mut mask = VoxelMask::new(UVec3::new(2, 2, 2));
        mask.set(IVec3::new(1, 1, 1), true);
        assert!(mask.get(IVec3::new(1, 1, 1)));
        assert!(!mask.get(IVec3::new(2, 0, 0)));
        assert!(!mask.get(IVec3::new(-1, 0, 0)));
    }

    #[test]
    fn test_clamp_smaller_mask() {
        let mut mask = VoxelMask::new(UVec3::new(4, 4, 4));
        mask.set(IVec3::new(3, 0, 2), true);
        let (grid, mismatch) = mask.clamped_to_grid();
        assert!(mismatch);
        assert_eq!(grid.dims(), UVec3::splat(16));
        assert!(grid.get(IVec3::new(3, 0, 2)));
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn test_clamp_larger_mask_drops_excess() {
        let mut mask = VoxelMask::new(UVec3::new(20, 16, 16));
        mask.set(IVec3::new(19, 0, 0), true);
        mask.set(IVec3::new(15, 0, 0), true);
        let (grid, mismatch) = mask.clamped_to_grid();
        assert!(mismatch);
        assert_eq!(grid.count(), 1);
        assert!(grid.get(IVec3::new(15, 0, 0)));
    }

    #[test]
    fn test_clamp_same_size_no_mismatch() {
        let mut mask = VoxelMask::grid();
        mask.set(IVec3::new(7, 7, 7), true);
        let (grid, mismatch) = mask.clamped_to_grid();
        assert!(!mismatch);
        assert_eq!(grid, mask);
    }
}
