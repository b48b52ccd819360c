/// Magic bytes identifying a carving instance snapshot.
pub const MAGIC: [u8; 4] = *b"HEWN";

/// Current snapshot format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the snapshot header in bytes.
pub const HEADER_SIZE: usize = 32;

/// Header flag: a work item follows the header.
pub const FLAG_WORK_ITEM: u16 = 1 << 0;

/// Header flag: a selected recipe code follows the work item.
pub const FLAG_RECIPE: u16 = 1 << 1;

/// Marker for a voxel block whose packed bytes are all identical (4 bytes).
pub const FILL_FLAG: u16 = 0xFFFF;

/// Snapshot header. Fixed 32 bytes, repr(C) for byte-level serialization.
///
/// Body layout after the header: work-item code, recipe code, voxel block.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    /// Content hash of the recipe catalog the snapshot was written against.
    pub catalog_hash: u64,
    pub work_item_quantity: u32,
    pub work_item_len: u16,
    pub recipe_code_len: u16,
    pub voxel_block_len: u32,
    pub _pad: u32,
}

impl SnapshotHeader {
    pub fn has_work_item(&self) -> bool {
        self.flags & FLAG_WORK_ITEM != 0
    }

    pub fn has_recipe(&self) -> bool {
        self.flags & FLAG_RECIPE != 0
    }

    /// Total snapshot size the header describes.
    pub fn expected_len(&self) -> usize {
        HEADER_SIZE
            + self.work_item_len as usize
            + self.recipe_code_len as usize
            + self.voxel_block_len as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<SnapshotHeader>(), HEADER_SIZE);
    }
}
