//! A scripted carving session played against a [`StationHost`].
//!
//! Every request goes through the wire codec and every event is applied to
//! an [`ObservedStation`], so the planner only sees what a remote client
//! would see.

use std::sync::Arc;

use glam::{IVec3, Vec3};
use hewing_core::constants::GRID_SIZE;
use hewing_core::{ItemStack, VoxelCoord};
use hewing_net::{
    decode_event, decode_request, encode_event, encode_request, ObservedStation, RecipeSelect,
    Requester, StationEvent, StationHost, StationRequest, ToolAction,
};
use hewing_rules::RecipeCatalog;
use hewing_station::{RecordingEffects, StationConfig, StationEffect};

use crate::error::CliError;
use crate::report::{Outcome, SessionReport};

const STATION: IVec3 = IVec3::new(0, 64, 0);
const SAW: &str = "game:saw-iron";
const CHISEL: &str = "game:chisel-iron";
const KNIFE: &str = "game:knife-flint";

/// What to carve.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    /// Held item placed on the station.
    pub log: String,
    pub recipe: String,
    /// Cut into a required voxel first, ruining the piece.
    pub ruin: bool,
}

struct Session {
    catalog: Arc<RecipeCatalog>,
    host: StationHost,
    observed: ObservedStation,
    effects: RecordingEffects,
    report: SessionReport,
}

pub fn run(
    catalog: Arc<RecipeCatalog>,
    config: StationConfig,
    plan: &SessionPlan,
) -> Result<SessionReport, CliError> {
    let mut host = StationHost::with_config(Arc::clone(&catalog), config);
    host.place(STATION);
    let mut session = Session {
        catalog,
        host,
        observed: ObservedStation::new(STATION),
        effects: RecordingEffects::new(),
        report: SessionReport::new(&plan.log, &plan.recipe),
    };
    session.play(plan)?;
    Ok(session.finish())
}

/// Actor standing east of the station, or north of it.
fn actor(from_east: bool, held: &str) -> Requester {
    let center = STATION.as_vec3() + Vec3::new(0.5, 0.0, 0.5);
    let offset = if from_east {
        Vec3::new(3.0, 1.0, 0.2)
    } else {
        Vec3::new(0.2, 1.0, -3.0)
    };
    Requester {
        position: center + offset,
        held: Some(ItemStack::new(held, 1)),
    }
}

fn strike(coord: VoxelCoord, face_index: u8, tool_mode: u32) -> StationRequest {
    StationRequest::ToolAction(ToolAction {
        position: STATION.to_array(),
        voxel_x: coord.x,
        voxel_y: coord.y,
        voxel_z: coord.z,
        face_index,
        tool_mode,
    })
}

impl Session {
    fn play(&mut self, plan: &SessionPlan) -> Result<(), CliError> {
        let events = self.host.insert_log(&actor(true, &plan.log), STATION)?;
        if events.is_empty() {
            return Err(CliError::Rejected(format!("log {}", plan.log)));
        }
        self.apply(events)?;

        let select = StationRequest::RecipeSelect(RecipeSelect {
            position: STATION.to_array(),
            recipe_code: plan.recipe.clone(),
        });
        if !self.send(&actor(true, SAW), &select)? {
            return Err(CliError::Rejected(format!("recipe {}", plan.recipe)));
        }

        if plan.ruin {
            if let Some(coord) = self.find(|required, wood| required && wood) {
                self.send(&actor(true, KNIFE), &strike(coord, 0, 0))?;
            }
        }

        // Saw away whole planes that hold no required wood, then chisel
        // whatever is left over.
        for from_east in [true, false] {
            for i in 0..GRID_SIZE as i32 {
                if !self.active() {
                    return Ok(());
                }
                if let Some(coord) = self.free_plane(from_east, i) {
                    let face = if from_east { 1 } else { 0 };
                    self.send(&actor(from_east, SAW), &strike(coord, face, 0))?;
                }
            }
        }
        while self.active() {
            let Some(coord) = self.find(|required, wood| !required && wood) else {
                break;
            };
            self.send(&actor(true, CHISEL), &strike(coord, 4, 0))?;
        }
        Ok(())
    }

    fn active(&self) -> bool {
        self.observed.work_item().is_some()
    }

    /// First voxel whose (required, has-wood) pair satisfies `pred`.
    fn find(&self, pred: impl Fn(bool, bool) -> bool) -> Option<VoxelCoord> {
        let target = self.observed.target_mask()?;
        self.observed
            .grid()
            .iter()
            .find(|(c, m)| pred(target.get(*c), m.is_wood()))
            .map(|(c, _)| c)
    }

    /// A wood voxel in plane `i` (x = i from the east, z = i from the north),
    /// if that plane can be cleared without touching required wood.
    fn free_plane(&self, from_east: bool, i: i32) -> Option<VoxelCoord> {
        let target = self.observed.target_mask()?;
        let mut hit = None;
        for (c, m) in self.observed.grid().iter() {
            let fixed = if from_east { c.x } else { c.z };
            if fixed != i || !m.is_wood() {
                continue;
            }
            if target.get(c) {
                return None;
            }
            hit.get_or_insert(c);
        }
        hit
    }

    /// Round-trip a request through the codec and hand it to the host.
    /// Returns whether the station changed.
    fn send(&mut self, requester: &Requester, request: &StationRequest) -> Result<bool, CliError> {
        let decoded = decode_request(&encode_request(request)?)?;
        let events = self.host.handle(requester, &decoded, &mut self.effects)?;
        if matches!(decoded, StationRequest::ToolAction(_)) {
            self.report.strikes += 1;
        }
        let changed = !events.is_empty();
        self.apply(events)?;
        Ok(changed)
    }

    fn apply(&mut self, events: Vec<StationEvent>) -> Result<(), CliError> {
        for event in events {
            match decode_event(&encode_event(&event)?)? {
                StationEvent::OpenRecipeDialog { choices, .. } => {
                    self.report.choices = choices.into_iter().map(|c| c.recipe_code).collect();
                }
                StationEvent::Sync(sync) => self.observed.apply_sync(&sync, &self.catalog)?,
                StationEvent::ItemReturned { stack, .. } => {
                    log::info!("{} returned to the actor", stack.code);
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> SessionReport {
        let config = self.host.get(STATION).map(|s| s.config().clone()).unwrap_or_default();
        self.report.remaining_wood = self.observed.grid().wood_count();
        for effect in &self.effects.effects {
            match effect {
                StationEffect::Emit { stack, .. } => self.report.emitted.push(stack.clone()),
                StationEffect::Sound { code, .. } => {
                    self.report.sounds.push(code.clone());
                    if *code == config.ruin_sound {
                        self.report.outcome = Outcome::Ruined;
                    } else if *code == config.success_sound {
                        self.report.outcome = Outcome::Finished;
                    }
                }
            }
        }
        self.report
    }
}
