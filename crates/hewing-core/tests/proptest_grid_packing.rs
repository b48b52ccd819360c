//! Property tests for the packed voxel grid encoding.

use glam::IVec3;
use hewing_core::constants::{GRID_SIZE, PACKED_GRID_BYTES};
use hewing_core::{Region, VoxelGrid, WoodMaterial};
use proptest::prelude::*;

fn material() -> impl Strategy<Value = WoodMaterial> {
    (0u8..4).prop_map(WoodMaterial::from_bits)
}

fn grid() -> impl Strategy<Value = VoxelGrid> {
    let n = GRID_SIZE as i32;
    prop::collection::vec(((0..n, 0..n, 0..n), material()), 0..400).prop_map(|edits| {
        let mut grid = VoxelGrid::new();
        for ((x, y, z), mat) in edits {
            grid.set(IVec3::new(x, y, z), mat);
        }
        grid
    })
}

proptest! {
    /// Property: unpack(pack(g)) == g
    #[test]
    fn pack_unpack_roundtrips(g in grid()) {
        let packed = g.pack();
        let decoded = VoxelGrid::unpack(&packed).unwrap();
        prop_assert_eq!(decoded, g);
    }

    /// Property: every 1024-byte buffer decodes and re-encodes to itself
    #[test]
    fn arbitrary_packed_bytes_roundtrip(
        bytes in prop::collection::vec(any::<u8>(), PACKED_GRID_BYTES),
    ) {
        let grid = VoxelGrid::unpack(&bytes).unwrap();
        prop_assert_eq!(grid.pack().to_vec(), bytes);
    }

    /// Property: buffers of any other length are rejected without panicking
    #[test]
    fn wrong_length_rejected(
        bytes in prop::collection::vec(any::<u8>(), 0..2048),
    ) {
        prop_assume!(bytes.len() != PACKED_GRID_BYTES);
        prop_assert!(VoxelGrid::unpack(&bytes).is_err());
    }

    /// Property: fill never touches cells outside the clamped region
    #[test]
    fn fill_stays_in_region(
        min in (-8i32..20, -8i32..20, -8i32..20),
        size in (0i32..12, 0i32..12, 0i32..12),
    ) {
        let min = IVec3::new(min.0, min.1, min.2);
        let region = Region::new(min, min + IVec3::new(size.0, size.1, size.2));
        let mut grid = VoxelGrid::new();
        let changed = grid.fill(region, WoodMaterial::Heartwood);
        prop_assert_eq!(changed, grid.wood_count());
        let clamped = region.clamped();
        for (coord, mat) in grid.iter() {
            if mat.is_wood() {
                prop_assert!(coord.cmpge(clamped.min).all() && coord.cmplt(clamped.max).all());
            }
        }
    }
}
