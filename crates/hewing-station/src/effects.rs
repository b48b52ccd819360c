use glam::Vec3;
use hewing_core::ItemStack;

/// World-side services a carving instance calls out to.
pub trait StationEffects {
    /// Spawn an item into the world at `position`.
    fn emit_item(&mut self, stack: ItemStack, position: Vec3);

    /// Play an audio cue at `position`.
    fn play_sound(&mut self, code: &str, position: Vec3);
}

#[derive(Debug, Clone, PartialEq)]
pub enum StationEffect {
    Emit { stack: ItemStack, position: Vec3 },
    Sound { code: String, position: Vec3 },
}

/// Effects sink that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub effects: Vec<StationEffect>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items emitted so far.
    pub fn emitted(&self) -> Vec<&ItemStack> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                StationEffect::Emit { stack, .. } => Some(stack),
                StationEffect::Sound { .. } => None,
            })
            .collect()
    }

    /// Sound codes played so far.
    pub fn sounds(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                StationEffect::Sound { code, .. } => Some(code.as_str()),
                StationEffect::Emit { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl StationEffects for RecordingEffects {
    fn emit_item(&mut self, stack: ItemStack, position: Vec3) {
        self.effects.push(StationEffect::Emit { stack, position });
    }

    fn play_sound(&mut self, code: &str, position: Vec3) {
        self.effects.push(StationEffect::Sound {
            code: code.to_string(),
            position,
        });
    }
}
