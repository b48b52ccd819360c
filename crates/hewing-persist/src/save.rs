use hewing_core::{ItemStack, VoxelGrid};

use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// The persisted state of one carving instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceSnapshot {
    pub work_item: Option<ItemStack>,
    pub grid: VoxelGrid,
    pub recipe_code: Option<String>,
}

fn string_len(field: &'static str, s: &str) -> Result<u16, PersistError> {
    u16::try_from(s.len()).map_err(|_| PersistError::StringTooLong {
        field,
        len: s.len(),
        max: u16::MAX as usize,
    })
}

/// Serialize an instance snapshot.
///
/// Layout: header (32B) + work-item code + recipe code + voxel block, where
/// the voxel block is a 4-byte fill marker or the LZ4-compressed packed grid.
pub fn save(snapshot: &InstanceSnapshot, catalog_hash: u64) -> Result<Vec<u8>, PersistError> {
    let work_code = snapshot
        .work_item
        .as_ref()
        .map(|w| w.code.as_str())
        .unwrap_or("");
    let recipe_code = snapshot.recipe_code.as_deref().unwrap_or("");

    let mut flags = 0;
    if snapshot.work_item.is_some() {
        flags |= FLAG_WORK_ITEM;
    }
    if snapshot.recipe_code.is_some() {
        flags |= FLAG_RECIPE;
    }

    let block = compress::encode_block(&snapshot.grid.pack());

    let header = SnapshotHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        flags,
        catalog_hash,
        work_item_quantity: snapshot.work_item.as_ref().map_or(0, |w| w.quantity),
        work_item_len: string_len("work item code", work_code)?,
        recipe_code_len: string_len("recipe code", recipe_code)?,
        voxel_block_len: block.len() as u32,
        _pad: 0,
    };

    let mut output = Vec::with_capacity(header.expected_len());
    output.extend_from_slice(bytemuck::bytes_of(&header));
    output.extend_from_slice(work_code.as_bytes());
    output.extend_from_slice(recipe_code.as_bytes());
    output.extend_from_slice(&block);
    Ok(output)
}
