//! Single source of truth for shared constants.
//! Host-tunable values are mirrored in `StationConfig`, whose `Default`
//! reads them from here.

/// Side length of the carving grid in voxels.
pub const GRID_SIZE: usize = 16;

/// Total voxels in the grid (16^3).
pub const GRID_VOLUME: usize = GRID_SIZE * GRID_SIZE * GRID_SIZE;

/// Bits used per voxel in the packed encoding.
pub const BITS_PER_VOXEL: usize = 2;

/// Voxels stored in one packed byte.
pub const VOXELS_PER_BYTE: usize = 8 / BITS_PER_VOXEL;

/// Length of the packed grid encoding in bytes.
pub const PACKED_GRID_BYTES: usize = GRID_VOLUME / VOXELS_PER_BYTE;

/// Center of the log cross-section on the X and Z axes (voxel units).
pub const LOG_CENTER: f64 = 7.5;

/// Radius of the log cross-section. Columns further out are empty and
/// are never allowed to ruin a piece.
pub const LOG_RADIUS: f64 = 7.5;

/// Distance from the center beyond which a column is bark.
pub const BARK_THRESHOLD: f64 = 6.0;

/// Character that marks a required (kept) cell in a recipe pattern.
pub const PATTERN_SOLID: char = '#';

/// Canonical character for a cleared cell in a recipe pattern.
pub const PATTERN_EMPTY: char = '_';

/// Height of the stump/base volume in block units.
pub const BASE_HEIGHT: f32 = 10.0 / 16.0;

/// Vertical offset of voxel (x, 0, z) above the block origin, in voxels.
pub const VOXEL_Y_OFFSET: f32 = 10.0;

/// Item emitted when a piece is ruined.
pub const RUIN_BYPRODUCT: &str = "game:firewood";

/// Quantity of the ruin byproduct.
pub const RUIN_BYPRODUCT_QUANTITY: u32 = 2;

/// Sound cue played when a piece is finished.
pub const SUCCESS_SOUND: &str = "game:sounds/block/planks";

/// Sound cue played when a piece is ruined.
pub const RUIN_SOUND: &str = "game:sounds/block/chop2";

/// Offset from the block origin at which emitted items spawn.
pub const EMIT_OFFSET: [f32; 3] = [0.5, 1.0, 0.5];

/// Squared distance beyond which remote requests are rejected.
pub const MAX_INTERACT_DISTANCE_SQ: f32 = 100.0;

/// Domain prepended to item codes written without one.
pub const DEFAULT_DOMAIN: &str = "game";
