//! Interaction and collision volumes derived from the voxel grid.

use glam::{IVec3, Vec3};
use hewing_core::constants::{BASE_HEIGHT, GRID_SIZE, VOXEL_Y_OFFSET};
use hewing_core::direction::ALL_FACES;
use hewing_core::types::in_grid;
use hewing_core::{VoxelCoord, VoxelGrid};

/// Axis-aligned box in block units (one block = 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub min: Vec3,
    pub max: Vec3,
}

impl Cuboid {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The fixed stump the workpiece rests on.
    pub fn base() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(1.0, BASE_HEIGHT, 1.0))
    }

    /// Box spanning voxels `min..=max`, lifted above the stump.
    pub fn from_voxels(min: VoxelCoord, max: VoxelCoord) -> Self {
        let n = GRID_SIZE as f32;
        let lift = Vec3::new(0.0, VOXEL_Y_OFFSET, 0.0);
        Self::new(
            (min.as_vec3() + lift) / n,
            ((max + IVec3::ONE).as_vec3() + lift) / n,
        )
    }
}

/// Volumes derived from one grid state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedGeometry {
    /// Picking volumes. Index 0 is always the stump.
    pub selection: Vec<Cuboid>,
    /// Physics volumes: the stump plus one box around all wood, if any.
    pub collision: Vec<Cuboid>,
    /// Source voxel of each selection volume, parallel to `selection`.
    /// None marks the stump.
    pub index_map: Vec<Option<VoxelCoord>>,
}

impl DerivedGeometry {
    /// Voxel behind a picked selection index. None for the stump or an
    /// index past the end.
    pub fn voxel_at(&self, selection_index: usize) -> Option<VoxelCoord> {
        self.index_map.get(selection_index).copied().flatten()
    }
}

/// Whether a wood voxel has at least one face that is not covered by wood.
fn is_exposed(grid: &VoxelGrid, coord: VoxelCoord) -> bool {
    ALL_FACES.iter().any(|face| {
        let neighbor = coord + face.offset();
        !in_grid(neighbor) || !grid.has_wood(neighbor)
    })
}

pub fn derive_volumes(grid: &VoxelGrid) -> DerivedGeometry {
    let mut selection = vec![Cuboid::base()];
    let mut index_map = vec![None];
    let mut collision = vec![Cuboid::base()];

    let mut bounds: Option<(IVec3, IVec3)> = None;

    for (coord, material) in grid.iter() {
        if !material.is_wood() {
            continue;
        }
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(coord), hi.max(coord)),
            None => (coord, coord),
        });
        if is_exposed(grid, coord) {
            selection.push(Cuboid::from_voxels(coord, coord));
            index_map.push(Some(coord));
        }
    }

    if let Some((lo, hi)) = bounds {
        collision.push(Cuboid::from_voxels(lo, hi));
    }

    DerivedGeometry {
        selection,
        collision,
        index_map,
    }
}
