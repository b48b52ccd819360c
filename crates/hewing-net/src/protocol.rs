//! Request and event payloads exchanged with remote actors.
//!
//! All messages use postcard serialization. Requests only ever flow to the
//! authoritative side; events flow back to observers.

use hewing_core::constants::PACKED_GRID_BYTES;
use hewing_core::ItemStack;
use serde::{Deserialize, Serialize};

use crate::error::NetError;

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: u16 = 1;

/// Maximum length of a recipe code in a request.
pub const MAX_RECIPE_CODE_LEN: usize = 128;

/// Block position of a carving station.
pub type StationPos = [i32; 3];

/// Strike a voxel with the held tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolAction {
    pub position: StationPos,
    pub voxel_x: i32,
    pub voxel_y: i32,
    pub voxel_z: i32,
    /// Wire face index: N, E, S, W, Up, Down.
    pub face_index: u8,
    pub tool_mode: u32,
}

/// Choose the recipe to carve towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSelect {
    pub position: StationPos,
    pub recipe_code: String,
}

/// Messages sent from an actor to the authoritative side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationRequest {
    ToolAction(ToolAction),
    RecipeSelect(RecipeSelect),
    /// The recipe menu was closed without a choice.
    CancelSelect { position: StationPos },
}

impl StationRequest {
    pub fn position(&self) -> StationPos {
        match self {
            StationRequest::ToolAction(a) => a.position,
            StationRequest::RecipeSelect(s) => s.position,
            StationRequest::CancelSelect { position } => *position,
        }
    }

    /// Reject payloads no well-behaved client produces.
    pub fn validate(&self) -> Result<(), NetError> {
        match self {
            StationRequest::ToolAction(a) if a.face_index > 5 => {
                Err(NetError::InvalidFace(a.face_index))
            }
            StationRequest::RecipeSelect(s) if s.recipe_code.len() > MAX_RECIPE_CODE_LEN => {
                Err(NetError::RecipeCodeTooLong {
                    len: s.recipe_code.len(),
                    max: MAX_RECIPE_CODE_LEN,
                })
            }
            _ => Ok(()),
        }
    }
}

/// One entry of the recipe-choice menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceEntry {
    pub recipe_code: String,
    pub output: ItemStack,
}

/// Full observable state of one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSync {
    pub position: StationPos,
    pub work_item: Option<ItemStack>,
    pub recipe_code: Option<String>,
    /// Packed 2-bit grid, 1024 bytes.
    pub voxels: Vec<u8>,
}

impl StationSync {
    pub fn validate(&self) -> Result<(), NetError> {
        if self.voxels.len() != PACKED_GRID_BYTES {
            return Err(NetError::BadGridLength(self.voxels.len()));
        }
        Ok(())
    }
}

/// Messages sent from the authoritative side to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationEvent {
    /// Ask the inserting actor to pick a recipe.
    OpenRecipeDialog {
        position: StationPos,
        choices: Vec<ChoiceEntry>,
    },
    Sync(StationSync),
    /// An item handed back to the requesting actor.
    ItemReturned { position: StationPos, stack: ItemStack },
}
