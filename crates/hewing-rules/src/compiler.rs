use std::hash::{Hash, Hasher};

use glam::IVec3;
use hewing_core::constants::{GRID_SIZE, PATTERN_SOLID};
use hewing_core::VoxelMask;

use crate::items::ItemCatalog;
use crate::output::{self, ResolveError};
use crate::recipe::{CompiledRecipe, RecipeDef};

/// Compile a layered text pattern into a grid-sized required-material mask.
///
/// Layer index is the y level, row index is z, character index is x.
/// A pattern with exactly one layer is extruded over every y level.
/// Layers beyond the grid height are ignored; missing rows and columns are
/// not required. Only `#` marks a required cell.
pub fn compile_pattern(pattern: &[Vec<String>]) -> VoxelMask {
    let mut mask = VoxelMask::grid();
    let n = GRID_SIZE;
    let extrude = pattern.len() == 1;

    for (layer_idx, rows) in pattern.iter().take(n).enumerate() {
        for (z, row) in rows.iter().take(n).enumerate() {
            for (x, ch) in row.chars().take(n).enumerate() {
                if ch != PATTERN_SOLID {
                    continue;
                }
                if extrude {
                    for y in 0..n {
                        mask.set(IVec3::new(x as i32, y as i32, z as i32), true);
                    }
                } else {
                    mask.set(IVec3::new(x as i32, layer_idx as i32, z as i32), true);
                }
            }
        }
    }

    mask
}

/// Resolve a recipe definition against the item catalog and compile its
/// pattern. The returned recipe has id 0 until registered.
pub fn compile_recipe(
    def: &RecipeDef,
    items: &dyn ItemCatalog,
) -> Result<CompiledRecipe, ResolveError> {
    let ingredient = output::resolve_ingredient(&def.code, &def.ingredient, items)?;
    let output_code = output::resolve_output(&def.code, &def.output, items)?;
    Ok(CompiledRecipe {
        id: 0,
        code: def.code.clone(),
        ingredient,
        output: output_code,
        output_quantity: def.output.quantity.max(1),
        required: compile_pattern(&def.pattern),
    })
}

/// Deterministic hash over recipe codes, ingredients, outputs and masks.
///
/// Recipes are sorted by code so registration order does not matter.
/// Stored with persisted instances to detect a changed recipe set.
pub fn compute_catalog_hash<'a, I>(recipes: I) -> u64
where
    I: IntoIterator<Item = &'a CompiledRecipe>,
{
    let mut hasher = std::collections::hash_map::DefaultHasher::new();

    let mut sorted: Vec<_> = recipes.into_iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(&b.code));

    for recipe in &sorted {
        recipe.code.hash(&mut hasher);
        recipe.ingredient.code.hash(&mut hasher);
        recipe.output.hash(&mut hasher);
        recipe.output_quantity.hash(&mut hasher);
        let n = GRID_SIZE as i32;
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    recipe.required.get(IVec3::new(x, y, z)).hash(&mut hasher);
                }
            }
        }
    }

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemRegistry;
    use crate::recipe::{IngredientDef, OutputDef};

    fn rows(row: &str, count: usize) -> Vec<String> {
        vec![row.to_string(); count]
    }

    #[test]
    fn test_extrusion_single_layer() {
        let pattern = vec![rows("##______________", 16)];
        let mask = compile_pattern(&pattern);
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..16 {
                    assert_eq!(
                        mask.get(IVec3::new(x, y, z)),
                        x < 2,
                        "mismatch at ({x},{y},{z})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_short_rows_and_missing_rows_default_false() {
        let pattern = vec![vec!["##__".to_string()]];
        let mask = compile_pattern(&pattern);
        // Only row z=0 was written; columns 0 and 1 are required for all y.
        assert_eq!(mask.count(), 2 * 16);
        assert!(mask.get(IVec3::new(1, 9, 0)));
        assert!(!mask.get(IVec3::new(1, 9, 1)));
        assert!(!mask.get(IVec3::new(4, 0, 0)));
    }

    #[test]
    fn test_layered_pattern() {
        let pattern = vec![
            vec!["#".to_string()],
            vec!["_#".to_string()],
            vec!["__#".to_string()],
        ];
        let mask = compile_pattern(&pattern);
        assert_eq!(mask.count(), 3);
        assert!(mask.get(IVec3::new(0, 0, 0)));
        assert!(mask.get(IVec3::new(1, 1, 0)));
        assert!(mask.get(IVec3::new(2, 2, 0)));
        assert!(!mask.get(IVec3::new(0, 1, 0)));
    }

    #[test]
    fn test_excess_layers_ignored() {
        let pattern: Vec<Vec<String>> = (0..20).map(|_| vec!["#".to_string()]).collect();
        let mask = compile_pattern(&pattern);
        assert_eq!(mask.count(), 16);
    }

    #[test]
    fn test_only_hash_is_solid() {
        let pattern = vec![vec!["#X_.# ".to_string()]];
        let mask = compile_pattern(&pattern);
        assert!(mask.get(IVec3::new(0, 0, 0)));
        assert!(!mask.get(IVec3::new(1, 0, 0)));
        assert!(mask.get(IVec3::new(4, 0, 0)));
        assert_eq!(mask.count(), 2 * 16);
    }

    #[test]
    fn test_empty_pattern_requires_nothing() {
        let mask = compile_pattern(&[]);
        assert_eq!(mask.count(), 0);
    }

    fn def(code: &str) -> RecipeDef {
        RecipeDef {
            code: code.into(),
            ingredient: IngredientDef {
                code: "game:log-placed-*-ud".into(),
                name: "wood".into(),
            },
            output: OutputDef {
                code: "game:woodenbeam-{wood}".into(),
                quantity: 1,
            },
            pattern: vec![vec!["#".into()]],
            enabled: true,
        }
    }

    #[test]
    fn test_compile_recipe() {
        let items = ItemRegistry::new();
        let recipe = compile_recipe(&def("beam"), &items).expect("wildcard recipe compiles");
        assert_eq!(recipe.id, 0);
        assert_eq!(recipe.required.count(), 16);
        assert!(recipe.matches("game:log-placed-oak-ud"));
    }

    #[test]
    fn test_catalog_hash_order_independent() {
        let items = ItemRegistry::new();
        let a = compile_recipe(&def("a"), &items).expect("compiles");
        let b = compile_recipe(&def("b"), &items).expect("compiles");
        let h1 = compute_catalog_hash([&a, &b]);
        let h2 = compute_catalog_hash([&b, &a]);
        assert_eq!(h1, h2);

        let mut changed = def("b");
        changed.pattern = vec![vec!["##".into()]];
        let b2 = compile_recipe(&changed, &items).expect("compiles");
        assert_ne!(h1, compute_catalog_hash([&a, &b2]));
    }
}
