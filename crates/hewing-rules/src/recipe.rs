use hewing_core::types::{normalize_code, ItemStack};
use hewing_core::VoxelMask;
use serde::{Deserialize, Serialize};

use crate::items::ItemCatalog;
use crate::output::{self, ResolveError};
use crate::wildcard;

/// Default variant name for the ingredient's wildcard segment.
pub const DEFAULT_VARIANT_NAME: &str = "wood";

fn default_variant_name() -> String {
    DEFAULT_VARIANT_NAME.to_string()
}

fn default_quantity() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

/// Ingredient descriptor as written in a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDef {
    /// Item code, possibly containing one `*` wildcard segment.
    pub code: String,
    /// Name of the variant the wildcard captures. The output code refers to
    /// it as `{name}`.
    #[serde(default = "default_variant_name")]
    pub name: String,
}

/// Output descriptor as written in a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDef {
    /// Item code, possibly containing a `{name}` placeholder.
    pub code: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// One hewing recipe as loaded from RON data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDef {
    /// Unique symbolic code.
    pub code: String,
    pub ingredient: IngredientDef,
    pub output: OutputDef,
    /// Layers of rows. A single layer is extruded over every y level.
    pub pattern: Vec<Vec<String>>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// A resolved ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Normalized item code or glob pattern.
    pub code: String,
    /// Variant name bound to the wildcard segment.
    pub name: String,
    /// True when `code` names one concrete item in the catalog.
    pub concrete: bool,
}

impl Ingredient {
    /// Whether a held item code satisfies this ingredient: exact match for a
    /// concrete ingredient, glob match otherwise. Both ignore ASCII case.
    pub fn matches(&self, held_code: &str) -> bool {
        let held = normalize_code(held_code);
        if self.concrete {
            return self.code.eq_ignore_ascii_case(&held);
        }
        wildcard::is_wildcard(&self.code) && wildcard::glob_match(&self.code, &held)
    }
}

/// A recipe compiled to its required-material mask. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompiledRecipe {
    /// Catalog-assigned id, 1-based in registration order. 0 before registration.
    pub id: u32,
    pub code: String,
    pub ingredient: Ingredient,
    /// Output code template.
    pub output: String,
    pub output_quantity: u32,
    /// `true` = the finished piece keeps wood at that cell.
    pub required: VoxelMask,
}

impl CompiledRecipe {
    pub fn matches(&self, held_code: &str) -> bool {
        self.ingredient.matches(held_code)
    }

    /// Produce the finished item for `input`, substituting the variant token
    /// taken from the input code when the template carries a placeholder.
    pub fn generate_output(
        &self,
        input: &ItemStack,
        items: &dyn ItemCatalog,
    ) -> Result<ItemStack, ResolveError> {
        output::generate_output(
            &self.code,
            &self.output,
            self.output_quantity,
            input,
            items,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(code: &str) -> Ingredient {
        Ingredient {
            code: code.into(),
            name: DEFAULT_VARIANT_NAME.into(),
            concrete: !wildcard::is_wildcard(code),
        }
    }

    #[test]
    fn test_concrete_match_ignores_case() {
        let log = ingredient("game:log-placed-oak-ud");
        assert!(log.matches("game:log-placed-oak-ud"));
        assert!(log.matches("GAME:Log-Placed-Oak-UD"));
        assert!(!log.matches("game:log-placed-birch-ud"));
    }

    #[test]
    fn test_concrete_and_wildcard_agree_on_case() {
        let concrete = ingredient("game:log-placed-oak-ud");
        let pattern = ingredient("game:log-placed-*-ud");
        for held in ["game:LOG-placed-oak-ud", "log-placed-Oak-ud"] {
            assert_eq!(concrete.matches(held), pattern.matches(held), "{held}");
        }
    }
}
