//! Authoritative request handling for every station in a world.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{IVec3, Vec3};
use hewing_core::constants::MAX_INTERACT_DISTANCE_SQ;
use hewing_core::{Face, ItemStack};
use hewing_rules::RecipeCatalog;
use hewing_station::{
    CarvingStateMachine, StationConfig, StationEffects, ToolKind, ToolOutcome, ToolStrike,
};

use crate::error::NetError;
use crate::protocol::{ChoiceEntry, StationEvent, StationRequest, StationSync};

/// The actor a request came from, as known to the authoritative side.
#[derive(Debug, Clone, PartialEq)]
pub struct Requester {
    pub position: Vec3,
    pub held: Option<ItemStack>,
}

/// Owns every station state machine and routes requests to them serially.
#[derive(Debug)]
pub struct StationHost {
    catalog: Arc<RecipeCatalog>,
    config: StationConfig,
    stations: HashMap<IVec3, CarvingStateMachine>,
}

impl StationHost {
    pub fn new(catalog: Arc<RecipeCatalog>) -> Self {
        Self::with_config(catalog, StationConfig::default())
    }

    pub fn with_config(catalog: Arc<RecipeCatalog>, config: StationConfig) -> Self {
        Self {
            catalog,
            config,
            stations: HashMap::new(),
        }
    }

    /// Register a station placed at `position`. False if one is already there.
    pub fn place(&mut self, position: IVec3) -> bool {
        if self.stations.contains_key(&position) {
            return false;
        }
        let station = CarvingStateMachine::with_config(
            Arc::clone(&self.catalog),
            position,
            self.config.clone(),
        );
        self.stations.insert(position, station);
        true
    }

    /// Remove a station, returning its work item if one was in place.
    pub fn remove(&mut self, position: IVec3) -> Option<ItemStack> {
        let mut station = self.stations.remove(&position)?;
        station.withdraw_log()
    }

    pub fn get(&self, position: IVec3) -> Option<&CarvingStateMachine> {
        self.stations.get(&position)
    }

    pub fn get_mut(&mut self, position: IVec3) -> Option<&mut CarvingStateMachine> {
        self.stations.get_mut(&position)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    fn station_mut(
        &mut self,
        requester: &Requester,
        position: IVec3,
    ) -> Result<&mut CarvingStateMachine, NetError> {
        check_distance(requester, position)?;
        self.stations
            .get_mut(&position)
            .ok_or(NetError::UnknownStation(position))
    }

    /// The requester places their held item on the station.
    ///
    /// On success the requester is asked to pick a recipe.
    pub fn insert_log(
        &mut self,
        requester: &Requester,
        position: IVec3,
    ) -> Result<Vec<StationEvent>, NetError> {
        let station = self.station_mut(requester, position)?;
        let Some(held) = &requester.held else {
            return Ok(Vec::new());
        };
        if !station.insert_log(held) {
            return Ok(Vec::new());
        }
        let choices = station
            .recipe_choices()
            .into_iter()
            .map(|c| ChoiceEntry {
                recipe_code: c.code,
                output: c.output,
            })
            .collect();
        Ok(vec![
            StationEvent::OpenRecipeDialog {
                position: position.to_array(),
                choices,
            },
            sync_event(station),
        ])
    }

    /// The requester takes the work item back.
    pub fn withdraw_log(
        &mut self,
        requester: &Requester,
        position: IVec3,
    ) -> Result<Vec<StationEvent>, NetError> {
        let station = self.station_mut(requester, position)?;
        Ok(match station.withdraw_log() {
            Some(stack) => vec![
                StationEvent::ItemReturned {
                    position: position.to_array(),
                    stack,
                },
                sync_event(station),
            ],
            None => Vec::new(),
        })
    }

    /// Apply one decoded request. Returns the events to send out; a request
    /// the state machine rejects yields no events.
    pub fn handle(
        &mut self,
        requester: &Requester,
        request: &StationRequest,
        effects: &mut dyn StationEffects,
    ) -> Result<Vec<StationEvent>, NetError> {
        request.validate()?;
        let position = IVec3::from_array(request.position());
        let station = self.station_mut(requester, position)?;

        let changed = match request {
            StationRequest::ToolAction(action) => {
                let tool = requester
                    .held
                    .as_ref()
                    .and_then(|held| ToolKind::from_item_code(&held.code))
                    .ok_or(NetError::NotATool)?;
                let face = Face::from_index(action.face_index)
                    .ok_or(NetError::InvalidFace(action.face_index))?;
                let strike = ToolStrike {
                    face,
                    tool,
                    mode: action.tool_mode,
                    actor: requester.position,
                };
                let coord = IVec3::new(action.voxel_x, action.voxel_y, action.voxel_z);
                station.apply_tool_action(coord, &strike, effects) != ToolOutcome::Rejected
            }
            StationRequest::RecipeSelect(select) => station.set_recipe(&select.recipe_code),
            StationRequest::CancelSelect { .. } => {
                if let Some(stack) = station.cancel_select() {
                    return Ok(vec![
                        StationEvent::ItemReturned {
                            position: position.to_array(),
                            stack,
                        },
                        sync_event(station),
                    ]);
                }
                false
            }
        };

        Ok(if changed {
            vec![sync_event(station)]
        } else {
            Vec::new()
        })
    }
}

/// Reject requesters further than the interaction range from the station.
fn check_distance(requester: &Requester, position: IVec3) -> Result<(), NetError> {
    let distance_sq = requester.position.distance_squared(position.as_vec3());
    if distance_sq > MAX_INTERACT_DISTANCE_SQ {
        log::warn!("request for {position} rejected: requester {distance_sq} away (squared)");
        return Err(NetError::TooFar {
            position,
            distance_sq,
        });
    }
    Ok(())
}

/// Snapshot of a station's observable state.
pub fn sync_event(station: &CarvingStateMachine) -> StationEvent {
    StationEvent::Sync(StationSync {
        position: station.origin().to_array(),
        work_item: station.work_item().cloned(),
        recipe_code: station.recipe_code().map(str::to_string),
        voxels: station.grid().pack().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RecipeSelect, ToolAction};
    use hewing_rules::loader::{load_recipes_from_str, register_all};
    use hewing_rules::{ItemRegistry, RecipeCatalogBuilder};
    use hewing_station::RecordingEffects;

    const RECIPE: &str = r#"(
        code: "post",
        ingredient: (code: "game:log-placed-*-ud"),
        output: (code: "game:post-{wood}"),
        pattern: [["______##", "______##"]],
    )"#;

    const POS: IVec3 = IVec3::new(10, 64, -4);

    fn host() -> StationHost {
        let items = ItemRegistry::from_codes(["game:log-placed-oak-ud", "game:post-oak"]);
        let defs = load_recipes_from_str(RECIPE).expect("recipe should parse");
        let mut builder = RecipeCatalogBuilder::new(items);
        register_all(&defs, &mut builder);
        let mut host = StationHost::new(Arc::new(builder.seal()));
        assert!(host.place(POS));
        host
    }

    fn near(held: &str) -> Requester {
        Requester {
            position: POS.as_vec3() + Vec3::new(3.0, 1.0, 0.5),
            held: Some(ItemStack::new(held, 1)),
        }
    }

    fn chop(x: i32, y: i32, z: i32) -> StationRequest {
        StationRequest::ToolAction(ToolAction {
            position: POS.to_array(),
            voxel_x: x,
            voxel_y: y,
            voxel_z: z,
            face_index: 1,
            tool_mode: 0,
        })
    }

    #[test]
    fn test_place_twice() {
        let mut host = host();
        assert!(!host.place(POS));
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_insert_opens_dialog() {
        let mut host = host();
        let events = host
            .insert_log(&near("game:log-placed-oak-ud"), POS)
            .expect("insert");
        assert_eq!(events.len(), 2);
        match &events[0] {
            StationEvent::OpenRecipeDialog { choices, .. } => {
                assert_eq!(choices.len(), 1);
                assert_eq!(choices[0].recipe_code, "post-oak");
                assert_eq!(choices[0].output, ItemStack::new("game:post-oak", 1));
            }
            other => panic!("expected dialog, got {other:?}"),
        }
    }

    #[test]
    fn test_distance_gate() {
        let mut host = host();
        let far = Requester {
            position: POS.as_vec3() + Vec3::new(10.0, 0.5, 0.0),
            held: Some(ItemStack::new("game:log-placed-oak-ud", 1)),
        };
        assert!(matches!(
            host.insert_log(&far, POS),
            Err(NetError::TooFar { .. })
        ));
        assert_eq!(
            host.get(POS).map(|s| s.work_item().is_none()),
            Some(true)
        );

        // Exactly at the limit is still allowed.
        let edge = Requester {
            position: POS.as_vec3() + Vec3::new(6.0, 8.0, 0.0),
            held: Some(ItemStack::new("game:log-placed-oak-ud", 1)),
        };
        assert!(host.insert_log(&edge, POS).is_ok());
    }

    #[test]
    fn test_unknown_station() {
        let mut host = host();
        let mut effects = RecordingEffects::new();
        let request = StationRequest::CancelSelect {
            position: [11, 64, -4],
        };
        assert_eq!(
            host.handle(&near("game:axe-iron"), &request, &mut effects),
            Err(NetError::UnknownStation(IVec3::new(11, 64, -4)))
        );
    }

    #[test]
    fn test_tool_action_requires_tool() {
        let mut host = host();
        let mut effects = RecordingEffects::new();
        host.insert_log(&near("game:log-placed-oak-ud"), POS)
            .expect("insert");
        assert_eq!(
            host.handle(&near("game:stick"), &chop(7, 7, 7), &mut effects),
            Err(NetError::NotATool)
        );
        let unarmed = Requester {
            held: None,
            ..near("game:stick")
        };
        assert_eq!(
            host.handle(&unarmed, &chop(7, 7, 7), &mut effects),
            Err(NetError::NotATool)
        );
    }

    #[test]
    fn test_full_session_through_host() {
        let mut host = host();
        let mut effects = RecordingEffects::new();
        host.insert_log(&near("game:log-placed-oak-ud"), POS)
            .expect("insert");

        let select = StationRequest::RecipeSelect(RecipeSelect {
            position: POS.to_array(),
            recipe_code: "post-oak".into(),
        });
        let events = host
            .handle(&near("game:axe-iron"), &select, &mut effects)
            .expect("select");
        assert!(matches!(&events[..], [StationEvent::Sync(s)] if s.recipe_code.as_deref() == Some("post-oak")));

        // Rejected requests produce no events.
        let events = host
            .handle(&near("game:axe-iron"), &chop(0, 0, 0), &mut effects)
            .expect("empty voxel is a no-op");
        assert!(events.is_empty());

        // The post keeps x 6..8, z 0..2. Chop every other x plane from the east.
        for x in (1..15).filter(|x| !(6..8).contains(x)) {
            host.handle(&near("game:axe-iron"), &chop(x, 0, 7), &mut effects)
                .expect("chop");
        }
        let north = Requester {
            position: POS.as_vec3() + Vec3::new(0.5, 1.0, -3.0),
            ..near("game:axe-iron")
        };
        for z in 2..15 {
            host.handle(&north, &chop(6, 0, z), &mut effects)
                .expect("chop");
        }
        assert_eq!(host.get(POS).map(|s| s.work_item().is_none()), Some(true));
        assert_eq!(effects.emitted(), vec![&ItemStack::new("game:post-oak", 1)]);
    }

    #[test]
    fn test_cancel_returns_item() {
        let mut host = host();
        let mut effects = RecordingEffects::new();
        host.insert_log(&near("game:log-placed-oak-ud"), POS)
            .expect("insert");
        let events = host
            .handle(
                &near("game:axe-iron"),
                &StationRequest::CancelSelect {
                    position: POS.to_array(),
                },
                &mut effects,
            )
            .expect("cancel");
        assert!(matches!(
            &events[0],
            StationEvent::ItemReturned { stack, .. } if stack.code == "game:log-placed-oak-ud"
        ));
    }

    #[test]
    fn test_remove_returns_work_item() {
        let mut host = host();
        host.insert_log(&near("game:log-placed-oak-ud"), POS)
            .expect("insert");
        assert_eq!(
            host.remove(POS),
            Some(ItemStack::new("game:log-placed-oak-ud", 1))
        );
        assert!(host.is_empty());
        assert_eq!(host.remove(POS), None);
    }
}
