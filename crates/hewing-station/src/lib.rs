pub mod config;
pub mod effects;
pub mod geometry;
pub mod log_gen;
pub mod state_machine;
pub mod tools;

pub use config::StationConfig;
pub use effects::{RecordingEffects, StationEffect, StationEffects};
pub use geometry::{derive_volumes, Cuboid, DerivedGeometry};
pub use state_machine::{
    CarvingStateMachine, Completion, RestoreReport, StationState, ToolOutcome, ToolStrike,
};
pub use tools::{ToolKind, ToolMode, ToolModeInfo, ToolModeProvider};
