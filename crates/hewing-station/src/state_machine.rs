//! Per-instance carving state: work item, voxel grid and selected recipe.
//!
//! Transitions: Empty -> Occupied (insert) -> RecipeSelected (select) ->
//! Finished or Ruined -> Empty. Withdrawal returns to Empty from either
//! occupied state. Requests that fail a precondition change nothing.

use std::sync::Arc;

use glam::{IVec3, Vec3};
use hewing_core::types::in_grid;
use hewing_core::{Face, ItemStack, Region, VoxelCoord, VoxelGrid, VoxelMask, WoodMaterial};
use hewing_persist::{InstanceSnapshot, PersistError};
use hewing_rules::{CompiledRecipe, RecipeCatalog, RecipeChoice};

use crate::config::StationConfig;
use crate::effects::StationEffects;
use crate::geometry::{derive_volumes, DerivedGeometry};
use crate::log_gen::{generate_log, inside_log};
use crate::tools::{sweep_region, ToolKind, ToolModeProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationState {
    Empty,
    /// A log is in place but no recipe is chosen yet.
    Occupied,
    RecipeSelected,
}

/// One tool use against the grid, minus the targeted voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStrike {
    pub face: Face,
    pub tool: ToolKind,
    /// Wire mode index, resolved through [`ToolModeProvider`].
    pub mode: u32,
    /// Actor position in world space.
    pub actor: Vec3,
}

/// Terminal result of a carving session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// All excess wood removed. `output` is None only if the output could not
    /// be generated, which is logged.
    Finished { output: Option<ItemStack> },
    Ruined { byproduct: ItemStack },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Precondition failed; nothing changed.
    Rejected,
    Carved { removed: usize },
    /// Every voxel is gone with no recipe selected; the instance reset.
    Cleared,
    Completed(Completion),
}

/// What happened while restoring a snapshot.
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub warnings: Vec<String>,
    /// Work item recorded with no voxels left. The instance was reset and the
    /// host should hand the item back.
    pub orphaned: Option<ItemStack>,
}

impl RestoreReport {
    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }
}

#[derive(Debug)]
pub struct CarvingStateMachine {
    catalog: Arc<RecipeCatalog>,
    config: StationConfig,
    /// Block position of the instance in the world.
    origin: IVec3,
    grid: VoxelGrid,
    work_item: Option<ItemStack>,
    recipe_code: Option<String>,
    target: Option<VoxelMask>,
    geometry: DerivedGeometry,
}

impl CarvingStateMachine {
    pub fn new(catalog: Arc<RecipeCatalog>, origin: IVec3) -> Self {
        Self::with_config(catalog, origin, StationConfig::default())
    }

    pub fn with_config(catalog: Arc<RecipeCatalog>, origin: IVec3, config: StationConfig) -> Self {
        let grid = VoxelGrid::new();
        let geometry = derive_volumes(&grid);
        Self {
            catalog,
            config,
            origin,
            grid,
            work_item: None,
            recipe_code: None,
            target: None,
            geometry,
        }
    }

    pub fn state(&self) -> StationState {
        match (&self.work_item, &self.recipe_code) {
            (None, _) => StationState::Empty,
            (Some(_), None) => StationState::Occupied,
            (Some(_), Some(_)) => StationState::RecipeSelected,
        }
    }

    pub fn catalog(&self) -> &Arc<RecipeCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Horizontal center of the instance in world space.
    pub fn center(&self) -> Vec3 {
        self.origin.as_vec3() + Vec3::new(0.5, 0.0, 0.5)
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn work_item(&self) -> Option<&ItemStack> {
        self.work_item.as_ref()
    }

    pub fn recipe_code(&self) -> Option<&str> {
        self.recipe_code.as_deref()
    }

    pub fn selected_recipe(&self) -> Option<&CompiledRecipe> {
        self.catalog.get(self.recipe_code.as_deref()?)
    }

    /// Required-wood mask of the selected recipe, for the highlight overlay.
    pub fn target_mask(&self) -> Option<&VoxelMask> {
        self.target.as_ref()
    }

    pub fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }

    /// Recipes the current work item can be carved into, with their outputs.
    pub fn recipe_choices(&self) -> Vec<RecipeChoice> {
        match &self.work_item {
            Some(item) => self.catalog.choices(item),
            None => Vec::new(),
        }
    }

    /// Place one unit of `held` as the workpiece and generate the log grid.
    ///
    /// Rejected unless the instance is empty and some recipe accepts the item.
    pub fn insert_log(&mut self, held: &ItemStack) -> bool {
        if self.work_item.is_some() {
            log::debug!("insert rejected at {}: already occupied", self.origin);
            return false;
        }
        if !self.catalog.accepts(&held.code) {
            log::debug!("insert rejected at {}: no recipe accepts {}", self.origin, held.code);
            return false;
        }

        self.work_item = Some(held.single());
        self.grid = generate_log();
        self.recipe_code = None;
        self.target = None;
        self.rederive();
        log::debug!("log {} inserted at {}", held.code, self.origin);
        true
    }

    /// Select the recipe to carve towards. Allowed while occupied, including
    /// replacing an earlier choice.
    pub fn set_recipe(&mut self, code: &str) -> bool {
        let catalog = Arc::clone(&self.catalog);
        let Some(work_item) = &self.work_item else {
            log::debug!("recipe select rejected at {}: no work item", self.origin);
            return false;
        };
        let Some(recipe) = catalog.get(code) else {
            log::warn!("recipe select rejected at {}: unknown recipe '{code}'", self.origin);
            return false;
        };
        if !recipe.matches(&work_item.code) {
            log::warn!(
                "recipe select rejected at {}: '{code}' does not accept {}",
                self.origin,
                work_item.code
            );
            return false;
        }
        if let Err(e) = recipe.generate_output(work_item, catalog.items()) {
            log::warn!("recipe select rejected at {}: {e}", self.origin);
            return false;
        }

        self.target = Some(target_mask(recipe));
        self.recipe_code = Some(recipe.code.clone());
        log::debug!("recipe '{code}' selected at {}", self.origin);
        true
    }

    /// Apply a tool to the voxel at `coord`, then check for completion.
    pub fn apply_tool_action(
        &mut self,
        coord: VoxelCoord,
        strike: &ToolStrike,
        effects: &mut dyn StationEffects,
    ) -> ToolOutcome {
        if self.work_item.is_none() || !in_grid(coord) || !self.grid.has_wood(coord) {
            return ToolOutcome::Rejected;
        }

        let region = match strike.tool {
            ToolKind::Axe | ToolKind::Saw => {
                let Some(mode) = ToolModeProvider::resolve(strike.tool, strike.mode) else {
                    log::debug!("unknown mode {} for {:?}", strike.mode, strike.tool);
                    return ToolOutcome::Rejected;
                };
                let offset = strike.actor - self.center();
                match sweep_region(mode, coord, strike.face, offset) {
                    Some(region) => region,
                    None => return ToolOutcome::Rejected,
                }
            }
            ToolKind::Chisel | ToolKind::Knife => Region::voxel(coord),
        };

        let removed = self.grid.fill(region, WoodMaterial::Empty);
        log::debug!(
            "{:?} mode {} on {coord} face {:?} at {}: {removed} voxels removed",
            strike.tool,
            strike.mode,
            strike.face,
            self.origin
        );

        if let Some(done) = self.check_completion(effects) {
            return ToolOutcome::Completed(done);
        }
        if self.recipe_code.is_none() && self.grid.is_empty() {
            log::info!("log at {} carved away with no recipe selected", self.origin);
            self.reset();
            return ToolOutcome::Cleared;
        }

        self.rederive();
        ToolOutcome::Carved { removed }
    }

    /// Apply a tool to the voxel behind a picked selection volume.
    /// The stump volume maps to no voxel and is rejected.
    pub fn apply_tool_action_by_index(
        &mut self,
        selection_index: usize,
        strike: &ToolStrike,
        effects: &mut dyn StationEffects,
    ) -> ToolOutcome {
        match self.geometry.voxel_at(selection_index) {
            Some(coord) => self.apply_tool_action(coord, strike, effects),
            None => ToolOutcome::Rejected,
        }
    }

    /// Compare the grid against the target. Ruin wins over finish; required
    /// cells outside the log's cross-section never ruin.
    pub fn check_completion(&mut self, effects: &mut dyn StationEffects) -> Option<Completion> {
        let (ruined, finished) = {
            let target = self.target.as_ref()?;
            let mut finished = true;
            let mut ruined = false;
            for (coord, material) in self.grid.iter() {
                let required = target.get(coord);
                let has_wood = material.is_wood();
                if required && !has_wood && inside_log(coord.x, coord.z) {
                    ruined = true;
                    break;
                }
                if !required && has_wood {
                    finished = false;
                }
            }
            (ruined, finished)
        };

        let code = self.recipe_code.clone().unwrap_or_default();
        let position = self.effect_position();

        if ruined {
            let byproduct = ItemStack::new(self.config.byproduct.clone(), self.config.byproduct_quantity);
            effects.emit_item(byproduct.clone(), position);
            effects.play_sound(&self.config.ruin_sound, position);
            log::info!("recipe '{code}' ruined at {}", self.origin);
            self.reset();
            return Some(Completion::Ruined { byproduct });
        }

        if !finished {
            return None;
        }

        let output = match (self.selected_recipe(), &self.work_item) {
            (Some(recipe), Some(input)) => {
                match recipe.generate_output(input, self.catalog.items()) {
                    Ok(stack) => Some(stack),
                    Err(e) => {
                        log::error!("finished piece at {} produced nothing: {e}", self.origin);
                        None
                    }
                }
            }
            _ => {
                log::error!("finished piece at {} has no recipe '{code}'", self.origin);
                None
            }
        };
        if let Some(stack) = &output {
            effects.emit_item(stack.clone(), position);
            effects.play_sound(&self.config.success_sound, position);
            log::info!("recipe '{code}' finished at {}: {}", self.origin, stack.code);
        }
        self.reset();
        Some(Completion::Finished { output })
    }

    /// Take the workpiece back out, discarding all carving progress.
    pub fn withdraw_log(&mut self) -> Option<ItemStack> {
        let item = self.work_item.take()?.single();
        log::debug!("log {} withdrawn from {}", item.code, self.origin);
        self.reset();
        Some(item)
    }

    /// The actor closed the recipe menu without choosing. Withdraws the log
    /// if no recipe was selected yet.
    pub fn cancel_select(&mut self) -> Option<ItemStack> {
        if self.state() != StationState::Occupied {
            return None;
        }
        self.withdraw_log()
    }

    /// Return to Empty.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.work_item = None;
        self.recipe_code = None;
        self.target = None;
        self.rederive();
    }

    pub fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot {
            work_item: self.work_item.clone(),
            grid: self.grid.clone(),
            recipe_code: self.recipe_code.clone(),
        }
    }

    /// Serialize the instance for the persistence collaborator.
    pub fn save(&self) -> Result<Vec<u8>, PersistError> {
        hewing_persist::save(&self.snapshot(), self.catalog.content_hash())
    }

    /// Replace the instance state with a saved snapshot.
    ///
    /// An unreadable snapshot resets the instance and returns the error.
    /// Inconsistent contents are repaired and reported as warnings.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<RestoreReport, PersistError> {
        let loaded = match hewing_persist::load(bytes, self.catalog.content_hash()) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("discarding unreadable snapshot at {}: {e}", self.origin);
                self.reset();
                return Err(e);
            }
        };

        let mut report = RestoreReport::default();
        for warning in loaded.warnings {
            report.warn(warning);
        }
        self.apply_snapshot(loaded.snapshot, &mut report);
        Ok(report)
    }

    fn apply_snapshot(&mut self, snapshot: InstanceSnapshot, report: &mut RestoreReport) {
        self.reset();
        let InstanceSnapshot {
            work_item,
            grid,
            recipe_code,
        } = snapshot;

        let Some(work_item) = work_item else {
            if !grid.is_empty() || recipe_code.is_some() {
                report.warn(format!(
                    "snapshot at {} has carving state but no work item, discarded",
                    self.origin
                ));
            }
            return;
        };
        if grid.is_empty() {
            report.warn(format!(
                "snapshot at {} has work item {} but no voxels, reset",
                self.origin, work_item.code
            ));
            report.orphaned = Some(work_item.single());
            return;
        }

        self.grid = grid;
        if let Some(code) = recipe_code {
            let catalog = Arc::clone(&self.catalog);
            match catalog.get(&code) {
                Some(recipe) if recipe.matches(&work_item.code) => {
                    self.target = Some(target_mask(recipe));
                    self.recipe_code = Some(code);
                }
                _ => report.warn(format!(
                    "recipe '{code}' saved at {} is no longer available, selection cleared",
                    self.origin
                )),
            }
        }
        self.work_item = Some(work_item);
        self.rederive();
    }

    fn effect_position(&self) -> Vec3 {
        self.origin.as_vec3() + Vec3::from(self.config.emit_offset)
    }

    fn rederive(&mut self) {
        self.geometry = derive_volumes(&self.grid);
    }
}

/// Copy a recipe's required mask into a grid-sized target.
fn target_mask(recipe: &CompiledRecipe) -> VoxelMask {
    let (mask, mismatch) = recipe.required.clamped_to_grid();
    if mismatch {
        log::warn!(
            "recipe '{}' pattern is {} voxels, clamped to the grid",
            recipe.code,
            recipe.required.dims()
        );
    }
    mask
}
