//! Read-only mirror of a station on the observing side.
//!
//! Observers never mutate carving state themselves; they apply the
//! authoritative [`StationSync`] snapshots and rebuild what rendering and
//! picking need from them.

use glam::IVec3;
use hewing_core::{ItemStack, VoxelGrid, VoxelMask};
use hewing_rules::RecipeCatalog;
use hewing_station::{derive_volumes, DerivedGeometry};

use crate::error::NetError;
use crate::protocol::StationSync;

#[derive(Debug)]
pub struct ObservedStation {
    position: IVec3,
    grid: VoxelGrid,
    work_item: Option<ItemStack>,
    recipe_code: Option<String>,
    target: Option<VoxelMask>,
    geometry: DerivedGeometry,
}

impl ObservedStation {
    pub fn new(position: IVec3) -> Self {
        let grid = VoxelGrid::new();
        let geometry = derive_volumes(&grid);
        Self {
            position,
            grid,
            work_item: None,
            recipe_code: None,
            target: None,
            geometry,
        }
    }

    /// Replace the mirrored state with an authoritative snapshot.
    ///
    /// A sync for another position or with a malformed grid is rejected and
    /// leaves the mirror untouched. An unknown recipe code is kept but shows
    /// no target overlay.
    pub fn apply_sync(&mut self, sync: &StationSync, catalog: &RecipeCatalog) -> Result<(), NetError> {
        let position = IVec3::from_array(sync.position);
        if position != self.position {
            return Err(NetError::UnknownStation(position));
        }
        let grid = VoxelGrid::unpack(&sync.voxels)
            .map_err(|_| NetError::BadGridLength(sync.voxels.len()))?;

        self.target = match sync.recipe_code.as_deref() {
            Some(code) => match catalog.get(code) {
                Some(recipe) => Some(recipe.required.clamped_to_grid().0),
                None => {
                    log::warn!("station {position} synced unknown recipe '{code}'");
                    None
                }
            },
            None => None,
        };
        self.geometry = derive_volumes(&grid);
        self.grid = grid;
        self.work_item = sync.work_item.clone();
        self.recipe_code = sync.recipe_code.clone();
        Ok(())
    }

    pub fn position(&self) -> IVec3 {
        self.position
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn work_item(&self) -> Option<&ItemStack> {
        self.work_item.as_ref()
    }

    pub fn recipe_code(&self) -> Option<&str> {
        self.recipe_code.as_deref()
    }

    pub fn target_mask(&self) -> Option<&VoxelMask> {
        self.target.as_ref()
    }

    pub fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }
}
