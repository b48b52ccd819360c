use hewing_core::constants::PACKED_GRID_BYTES;

use crate::error::PersistError;
use crate::format::FILL_FLAG;

/// Compress a packed voxel grid using LZ4.
pub fn compress_grid(packed: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(packed)
}

/// Decompress an LZ4 voxel block, validating the output size.
///
/// The declared size is checked before anything is allocated, so a corrupt
/// length prefix cannot request a huge buffer.
pub fn decompress_grid(compressed: &[u8]) -> Result<Vec<u8>, PersistError> {
    if compressed.len() < 4 {
        return Err(PersistError::DecompressError(
            "missing size prefix".to_string(),
        ));
    }
    let declared = u32::from_le_bytes([compressed[0], compressed[1], compressed[2], compressed[3]])
        as usize;
    if declared != PACKED_GRID_BYTES {
        return Err(PersistError::InvalidBlockSize {
            expected: PACKED_GRID_BYTES,
            actual: declared,
        });
    }

    let mut out = vec![0u8; PACKED_GRID_BYTES];
    let written = lz4_flex::decompress_into(&compressed[4..], &mut out)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;
    if written != PACKED_GRID_BYTES {
        return Err(PersistError::InvalidBlockSize {
            expected: PACKED_GRID_BYTES,
            actual: written,
        });
    }
    Ok(out)
}

/// Returns the shared byte if every byte of a packed grid is identical.
pub fn detect_fill(packed: &[u8]) -> Option<u8> {
    let (&first, rest) = packed.split_first()?;
    if packed.len() != PACKED_GRID_BYTES || rest.iter().any(|&b| b != first) {
        return None;
    }
    Some(first)
}

/// Encode a fill marker: 4 bytes = (byte: u8, 0: u8, FILL_FLAG: u16).
pub fn encode_fill(byte: u8) -> [u8; 4] {
    let mut buf = [0u8; 4];
    buf[0] = byte;
    buf[2..4].copy_from_slice(&FILL_FLAG.to_le_bytes());
    buf
}

/// Check if a voxel block is a fill marker (exactly 4 bytes with FILL_FLAG).
pub fn is_fill(block: &[u8]) -> bool {
    block.len() == 4 && u16::from_le_bytes([block[2], block[3]]) == FILL_FLAG
}

/// Expand a 4-byte fill marker back to a full packed grid.
pub fn expand_fill(block: &[u8]) -> Result<Vec<u8>, PersistError> {
    if !is_fill(block) {
        return Err(PersistError::InvalidFillBlock);
    }
    Ok(vec![block[0]; PACKED_GRID_BYTES])
}

/// Encode a packed grid as a fill marker when uniform, LZ4 otherwise.
pub fn encode_block(packed: &[u8]) -> Vec<u8> {
    match detect_fill(packed) {
        Some(byte) => encode_fill(byte).to_vec(),
        None => compress_grid(packed),
    }
}

/// Decode a voxel block written by [`encode_block`].
pub fn decode_block(block: &[u8]) -> Result<Vec<u8>, PersistError> {
    if is_fill(block) {
        expand_fill(block)
    } else {
        decompress_grid(block)
    }
}
