use hewing_core::{ItemStack, VoxelGrid};

use crate::compress;
use crate::error::PersistError;
use crate::format::*;
use crate::save::InstanceSnapshot;

/// A parsed snapshot plus any compatibility warnings.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub header: SnapshotHeader,
    pub snapshot: InstanceSnapshot,
    /// Non-fatal conditions: catalog hash mismatch, corrupt voxel block.
    pub warnings: Vec<String>,
}

fn read_string(bytes: &[u8], field: &'static str) -> Result<String, PersistError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| PersistError::InvalidString { field })
}

fn decode_grid(block: &[u8]) -> Result<VoxelGrid, PersistError> {
    let packed = compress::decode_block(block)?;
    Ok(VoxelGrid::unpack(&packed)?)
}

/// Validate a snapshot header and return any compatibility warnings.
pub fn validate_header(
    header: &SnapshotHeader,
    current_catalog_hash: u64,
) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    let mut warnings = Vec::new();
    if header.catalog_hash != current_catalog_hash {
        warnings.push(format!(
            "Recipe set has changed since this snapshot was written \
             (snapshot: {:016x}, current: {:016x}).",
            header.catalog_hash, current_catalog_hash
        ));
    }
    Ok(warnings)
}

/// Parse a snapshot from raw bytes.
///
/// Header and string errors are fatal. A voxel block that fails to decode
/// yields an empty grid and a warning, so a damaged snapshot still loads.
pub fn load(bytes: &[u8], current_catalog_hash: u64) -> Result<LoadedSnapshot, PersistError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::TooSmall(bytes.len(), HEADER_SIZE));
    }

    let header: SnapshotHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    let mut warnings = validate_header(&header, current_catalog_hash)?;

    let expected = header.expected_len();
    if bytes.len() < expected {
        return Err(PersistError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let work_end = HEADER_SIZE + header.work_item_len as usize;
    let recipe_end = work_end + header.recipe_code_len as usize;

    let work_item = if header.has_work_item() {
        let code = read_string(&bytes[HEADER_SIZE..work_end], "work item code")?;
        Some(ItemStack::new(code, header.work_item_quantity))
    } else {
        None
    };
    let recipe_code = if header.has_recipe() {
        Some(read_string(&bytes[work_end..recipe_end], "recipe code")?)
    } else {
        None
    };

    let block = &bytes[recipe_end..expected];
    let grid = match decode_grid(block) {
        Ok(grid) => grid,
        Err(e) => {
            warnings.push(format!("Voxel data could not be decoded: {e}"));
            VoxelGrid::new()
        }
    };

    Ok(LoadedSnapshot {
        header,
        snapshot: InstanceSnapshot {
            work_item,
            grid,
            recipe_code,
        },
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::save;
    use glam::IVec3;
    use hewing_core::WoodMaterial;

    fn sample() -> InstanceSnapshot {
        let mut grid = VoxelGrid::new();
        for x in 2..14 {
            for z in 3..12 {
                grid.set(IVec3::new(x, 5, z), WoodMaterial::Sapwood);
                grid.set(IVec3::new(x, 9, z), WoodMaterial::Bark);
            }
        }
        InstanceSnapshot {
            work_item: Some(ItemStack::new("game:log-placed-birch-ud", 1)),
            grid,
            recipe_code: Some("beam-birch".into()),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let snapshot = sample();
        let bytes = save(&snapshot, 0xABCD).expect("save");
        let loaded = load(&bytes, 0xABCD).expect("load should succeed");
        assert_eq!(loaded.snapshot, snapshot);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_empty_instance_roundtrip() {
        let bytes = save(&InstanceSnapshot::default(), 0).expect("save");
        let loaded = load(&bytes, 0).expect("load");
        assert_eq!(loaded.snapshot, InstanceSnapshot::default());
    }

    #[test]
    fn test_catalog_hash_mismatch_warns() {
        let bytes = save(&sample(), 0xAAAA).expect("save");
        let loaded = load(&bytes, 0xBBBB).expect("should load with warning");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Recipe set has changed"));
    }

    #[test]
    fn test_invalid_magic_rejected() {
        let mut bytes = save(&sample(), 0).expect("save");
        bytes[0..4].copy_from_slice(b"NOPE");
        assert!(matches!(load(&bytes, 0), Err(PersistError::InvalidMagic)));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut bytes = save(&sample(), 0).expect("save");
        bytes[4..6].copy_from_slice(&9u16.to_le_bytes());
        assert!(matches!(
            load(&bytes, 0),
            Err(PersistError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_too_small_rejected() {
        assert!(matches!(
            load(&[0u8; 10], 0),
            Err(PersistError::TooSmall(10, HEADER_SIZE))
        ));
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = save(&sample(), 0).expect("save");
        let result = load(&bytes[..bytes.len() - 1], 0);
        assert!(matches!(result, Err(PersistError::Truncated { .. })));
    }

    #[test]
    fn test_corrupt_voxel_block_falls_back_to_empty() {
        let snapshot = sample();
        let mut bytes = save(&snapshot, 0).expect("save");
        // Overwrite the LZ4 size prefix of the voxel block.
        let header: SnapshotHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
        let block_start = header.expected_len() - header.voxel_block_len as usize;
        bytes[block_start..block_start + 4].copy_from_slice(&5u32.to_le_bytes());

        let loaded = load(&bytes, 0).expect("corrupt grid still loads");
        assert!(loaded.snapshot.grid.is_empty());
        assert_eq!(loaded.snapshot.work_item, snapshot.work_item);
        assert_eq!(loaded.snapshot.recipe_code, snapshot.recipe_code);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let mut bytes = save(&sample(), 0).expect("save");
        bytes[HEADER_SIZE] = 0xFF;
        assert!(matches!(
            load(&bytes, 0),
            Err(PersistError::InvalidString { .. })
        ));
    }
}
