use glam::IVec3;
use hewing_core::constants::{BARK_THRESHOLD, GRID_SIZE, LOG_CENTER, LOG_RADIUS};
use hewing_core::{Region, VoxelGrid, WoodMaterial};

/// Horizontal distance of column (x, z) from the log axis.
pub fn column_distance(x: i32, z: i32) -> f64 {
    let dx = x as f64 - LOG_CENTER;
    let dz = z as f64 - LOG_CENTER;
    (dx * dx + dz * dz).sqrt()
}

/// Whether column (x, z) lies within the log's cross-section.
pub fn inside_log(x: i32, z: i32) -> bool {
    column_distance(x, z) <= LOG_RADIUS
}

/// Material of column (x, z) in a freshly inserted log.
pub fn column_material(x: i32, z: i32) -> WoodMaterial {
    let dist = column_distance(x, z);
    if dist > LOG_RADIUS {
        WoodMaterial::Empty
    } else if dist > BARK_THRESHOLD {
        WoodMaterial::Bark
    } else {
        WoodMaterial::Heartwood
    }
}

/// Build the grid for a newly inserted log: a cylinder with a bark shell,
/// uniform along y.
pub fn generate_log() -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    let n = GRID_SIZE as i32;
    for x in 0..n {
        for z in 0..n {
            let column = Region::new(IVec3::new(x, 0, z), IVec3::new(x + 1, n, z + 1));
            grid.fill(column, column_material(x, z));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_radius_materials() {
        let grid = generate_log();
        for y in 0..16 {
            assert_eq!(grid.get(IVec3::new(0, y, 0)), WoodMaterial::Empty);
            assert_eq!(grid.get(IVec3::new(7, y, 7)), WoodMaterial::Heartwood);
            assert_eq!(grid.get(IVec3::new(1, y, 7)), WoodMaterial::Bark);
        }
    }

    #[test]
    fn test_log_is_uniform_along_y() {
        let grid = generate_log();
        for x in 0..16 {
            for z in 0..16 {
                let base = grid.get(IVec3::new(x, 0, z));
                for y in 1..16 {
                    assert_eq!(grid.get(IVec3::new(x, y, z)), base);
                }
            }
        }
    }

    #[test]
    fn test_no_sapwood_and_symmetric() {
        let grid = generate_log();
        for (coord, material) in grid.iter() {
            assert_ne!(material, WoodMaterial::Sapwood);
            let mirrored = IVec3::new(15 - coord.x, coord.y, 15 - coord.z);
            assert_eq!(grid.get(mirrored), material);
        }
    }

    #[test]
    fn test_inside_log_boundary() {
        assert!(inside_log(7, 7));
        assert!(inside_log(1, 7));
        assert!(!inside_log(0, 7));
        assert!(!inside_log(0, 0));
        assert!(!inside_log(15, 15));
    }
}
