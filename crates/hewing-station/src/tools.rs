//! Tool families, their selectable modes and the voxel regions they clear.

use glam::{IVec3, Vec3};
use hewing_core::constants::GRID_SIZE;
use hewing_core::types::code_path;
use hewing_core::{Face, Region, VoxelCoord};

/// Family of a held carving tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Axe,
    Saw,
    Chisel,
    Knife,
}

impl ToolKind {
    /// Classify a held item by its code. Returns None for non-tools.
    pub fn from_item_code(code: &str) -> Option<Self> {
        let path = code_path(code).to_ascii_lowercase();
        if path.contains("axe") {
            Some(ToolKind::Axe)
        } else if path.contains("saw") {
            Some(ToolKind::Saw)
        } else if path.contains("chisel") {
            Some(ToolKind::Chisel)
        } else if path.contains("knife") {
            Some(ToolKind::Knife)
        } else {
            None
        }
    }
}

/// A directional cutting mode of an axe or saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolMode {
    ChopVertical,
    ChopHorizontal,
    SawDown,
    SawSideways,
}

/// Descriptor shown by the mode picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolModeInfo {
    pub mode: ToolMode,
    /// Stable code, also the icon key.
    pub code: &'static str,
    pub name: &'static str,
}

const AXE_MODES: [ToolModeInfo; 2] = [
    ToolModeInfo {
        mode: ToolMode::ChopVertical,
        code: "chopping-down",
        name: "Chop down",
    },
    ToolModeInfo {
        mode: ToolMode::ChopHorizontal,
        code: "chopping-sideways",
        name: "Chop sideways",
    },
];

const SAW_MODES: [ToolModeInfo; 2] = [
    ToolModeInfo {
        mode: ToolMode::SawDown,
        code: "line-down",
        name: "Saw down",
    },
    ToolModeInfo {
        mode: ToolMode::SawSideways,
        code: "line-sideways",
        name: "Saw sideways",
    },
];

/// Capability lookup for tool modes, keyed by tool family.
///
/// The item system asks this for the modes to offer; the carving instance
/// asks it to turn a wire mode index back into a [`ToolMode`].
pub struct ToolModeProvider;

impl ToolModeProvider {
    /// Modes offered for a tool family, in wire index order.
    pub fn modes(kind: ToolKind) -> &'static [ToolModeInfo] {
        match kind {
            ToolKind::Axe => &AXE_MODES,
            ToolKind::Saw => &SAW_MODES,
            ToolKind::Chisel | ToolKind::Knife => &[],
        }
    }

    pub fn resolve(kind: ToolKind, index: u32) -> Option<ToolMode> {
        Self::modes(kind).get(index as usize).map(|info| info.mode)
    }
}

/// True when the actor stands more east/west of the center than north/south.
fn east_west(actor_offset: Vec3) -> bool {
    actor_offset.x.abs() > actor_offset.z.abs()
}

/// The plane through `coord` with the actor's more-aligned horizontal axis
/// held fixed, spanning every y.
fn vertical_plane(coord: VoxelCoord, actor_offset: Vec3) -> Region {
    let n = GRID_SIZE as i32;
    if east_west(actor_offset) {
        Region::new(IVec3::new(coord.x, 0, 0), IVec3::new(coord.x + 1, n, n))
    } else {
        Region::new(IVec3::new(0, 0, coord.z), IVec3::new(n, n, coord.z + 1))
    }
}

/// Region cleared by a directional mode striking `coord` on `face`.
///
/// `actor_offset` is the actor's position relative to the instance center.
/// Returns None when the mode does nothing for this face.
pub fn sweep_region(
    mode: ToolMode,
    coord: VoxelCoord,
    face: Face,
    actor_offset: Vec3,
) -> Option<Region> {
    let n = GRID_SIZE as i32;
    match mode {
        ToolMode::ChopVertical | ToolMode::SawDown => Some(vertical_plane(coord, actor_offset)),
        ToolMode::ChopHorizontal => Some(Region::new(
            IVec3::new(0, coord.y, 0),
            IVec3::new(n, coord.y + 1, n),
        )),
        ToolMode::SawSideways => {
            if face == Face::Up {
                return None;
            }
            let band = if east_west(actor_offset) {
                Region::new(
                    IVec3::new(coord.x, coord.y, 0),
                    IVec3::new(coord.x + 1, coord.y + 1, n),
                )
            } else {
                Region::new(
                    IVec3::new(0, coord.y, coord.z),
                    IVec3::new(n, coord.y + 1, coord.z + 1),
                )
            };
            Some(band)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_from_code() {
        assert_eq!(ToolKind::from_item_code("game:axe-felling-copper"), Some(ToolKind::Axe));
        assert_eq!(ToolKind::from_item_code("game:saw-iron"), Some(ToolKind::Saw));
        assert_eq!(ToolKind::from_item_code("game:chisel-steel"), Some(ToolKind::Chisel));
        assert_eq!(ToolKind::from_item_code("knife-flint"), Some(ToolKind::Knife));
        assert_eq!(ToolKind::from_item_code("game:hammer-iron"), None);
    }

    #[test]
    fn test_modes_and_resolve() {
        let axe: Vec<_> = ToolModeProvider::modes(ToolKind::Axe)
            .iter()
            .map(|m| m.code)
            .collect();
        assert_eq!(axe, vec!["chopping-down", "chopping-sideways"]);
        assert_eq!(
            ToolModeProvider::resolve(ToolKind::Saw, 1),
            Some(ToolMode::SawSideways)
        );
        assert_eq!(ToolModeProvider::resolve(ToolKind::Saw, 2), None);
        assert!(ToolModeProvider::modes(ToolKind::Chisel).is_empty());
        assert_eq!(ToolModeProvider::resolve(ToolKind::Knife, 0), None);
    }

    #[test]
    fn test_vertical_sweep_orientation() {
        let coord = IVec3::new(3, 9, 12);
        let east = sweep_region(ToolMode::ChopVertical, coord, Face::East, Vec3::new(4.0, 0.0, 1.0))
            .expect("chop always sweeps");
        assert_eq!(east, Region::new(IVec3::new(3, 0, 0), IVec3::new(4, 16, 16)));

        let north = sweep_region(ToolMode::SawDown, coord, Face::Up, Vec3::new(1.0, 0.0, -4.0))
            .expect("saw down ignores the face");
        assert_eq!(north, Region::new(IVec3::new(0, 0, 12), IVec3::new(16, 16, 13)));
    }

    #[test]
    fn test_horizontal_chop_is_a_slab() {
        let region = sweep_region(
            ToolMode::ChopHorizontal,
            IVec3::new(5, 4, 5),
            Face::North,
            Vec3::ZERO,
        )
        .expect("slab");
        assert_eq!(region, Region::new(IVec3::new(0, 4, 0), IVec3::new(16, 5, 16)));
    }

    #[test]
    fn test_sideways_saw() {
        let coord = IVec3::new(6, 2, 9);
        assert_eq!(
            sweep_region(ToolMode::SawSideways, coord, Face::Up, Vec3::new(5.0, 0.0, 0.0)),
            None
        );
        let band = sweep_region(ToolMode::SawSideways, coord, Face::West, Vec3::new(-5.0, 0.0, 0.0))
            .expect("band");
        assert_eq!(band, Region::new(IVec3::new(6, 2, 0), IVec3::new(7, 3, 16)));
        // A tie goes to the north/south branch.
        let band = sweep_region(ToolMode::SawSideways, coord, Face::South, Vec3::new(2.0, 0.0, 2.0))
            .expect("band");
        assert_eq!(band, Region::new(IVec3::new(0, 2, 9), IVec3::new(16, 3, 10)));
    }
}
