use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DOMAIN, GRID_SIZE};

/// Coordinate of one voxel inside the carving grid.
pub type VoxelCoord = IVec3;

/// Whether every axis of `coord` lies in `[0, GRID_SIZE)`.
pub fn in_grid(coord: VoxelCoord) -> bool {
    let n = GRID_SIZE as i32;
    (0..n).contains(&coord.x) && (0..n).contains(&coord.y) && (0..n).contains(&coord.z)
}

/// A resolvable item reference plus a count.
///
/// Codes are `domain:path`; a bare path is treated as belonging to
/// [`DEFAULT_DOMAIN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub code: String,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(code: impl Into<String>, quantity: u32) -> Self {
        Self {
            code: normalize_code(&code.into()),
            quantity,
        }
    }

    /// Same item with quantity normalized to one.
    pub fn single(&self) -> Self {
        Self {
            code: self.code.clone(),
            quantity: 1,
        }
    }

    /// Path portion of the code (after the domain separator).
    pub fn path(&self) -> &str {
        code_path(&self.code)
    }
}

/// Prefix `code` with the default domain if it has none.
pub fn normalize_code(code: &str) -> String {
    if code.contains(':') {
        code.to_string()
    } else {
        format!("{DEFAULT_DOMAIN}:{code}")
    }
}

/// Strip the `domain:` prefix of an item code.
pub fn code_path(code: &str) -> &str {
    match code.split_once(':') {
        Some((_, path)) => path,
        None => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_grid_bounds() {
        assert!(in_grid(IVec3::new(0, 0, 0)));
        assert!(in_grid(IVec3::new(15, 15, 15)));
        assert!(!in_grid(IVec3::new(16, 0, 0)));
        assert!(!in_grid(IVec3::new(0, -1, 0)));
        assert!(!in_grid(IVec3::new(0, 0, 99)));
    }

    #[test]
    fn test_normalize_code_adds_domain() {
        assert_eq!(normalize_code("log-placed-oak-ud"), "game:log-placed-oak-ud");
        assert_eq!(normalize_code("mymod:beam"), "mymod:beam");
    }

    #[test]
    fn test_single_normalizes_quantity() {
        let stack = ItemStack::new("log-placed-oak-ud", 12);
        let one = stack.single();
        assert_eq!(one.quantity, 1);
        assert_eq!(one.code, "game:log-placed-oak-ud");
        assert_eq!(one.path(), "log-placed-oak-ud");
    }
}
