use hewing_core::constants::{
    EMIT_OFFSET, RUIN_BYPRODUCT, RUIN_BYPRODUCT_QUANTITY, RUIN_SOUND, SUCCESS_SOUND,
};
use serde::Deserialize;

/// Host-tunable station settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Item emitted when a piece is ruined.
    pub byproduct: String,
    pub byproduct_quantity: u32,
    pub success_sound: String,
    pub ruin_sound: String,
    /// Offset from the instance origin at which items are emitted.
    pub emit_offset: [f32; 3],
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            byproduct: RUIN_BYPRODUCT.to_string(),
            byproduct_quantity: RUIN_BYPRODUCT_QUANTITY,
            success_sound: SUCCESS_SOUND.to_string(),
            ruin_sound: RUIN_SOUND.to_string(),
            emit_offset: EMIT_OFFSET,
        }
    }
}
