use std::collections::HashMap;

use hewing_core::ItemStack;
use thiserror::Error;

use crate::compiler::compute_catalog_hash;
use crate::items::{ItemCatalog, ItemRegistry};
use crate::recipe::CompiledRecipe;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate recipe code '{0}'")]
    DuplicateCode(String),
}

/// A recipe offered for a held item, paired with the item it would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChoice {
    pub code: String,
    pub output: ItemStack,
}

/// Collects compiled recipes during startup. [`seal`](Self::seal) consumes
/// the builder, so no recipe can be added once carving instances hold the
/// catalog.
#[derive(Debug, Default)]
pub struct RecipeCatalogBuilder {
    items: ItemRegistry,
    recipes: Vec<CompiledRecipe>,
    by_code: HashMap<String, usize>,
}

impl RecipeCatalogBuilder {
    pub fn new(items: ItemRegistry) -> Self {
        Self {
            items,
            recipes: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    /// Item catalog used to resolve recipes during loading.
    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Register a compiled recipe. Ids are assigned 1-based in registration order.
    pub fn register(&mut self, mut recipe: CompiledRecipe) -> Result<u32, CatalogError> {
        if self.by_code.contains_key(&recipe.code) {
            return Err(CatalogError::DuplicateCode(recipe.code));
        }
        let id = self.recipes.len() as u32 + 1;
        recipe.id = id;
        self.by_code.insert(recipe.code.clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Freeze the catalog.
    pub fn seal(self) -> RecipeCatalog {
        let content_hash = compute_catalog_hash(&self.recipes);
        log::info!(
            "recipe catalog sealed: {} recipes, hash {:016x}",
            self.recipes.len(),
            content_hash
        );
        RecipeCatalog {
            items: self.items,
            recipes: self.recipes,
            by_code: self.by_code,
            content_hash,
        }
    }
}

/// Immutable table of compiled recipes shared by every carving instance.
#[derive(Debug)]
pub struct RecipeCatalog {
    items: ItemRegistry,
    recipes: Vec<CompiledRecipe>,
    by_code: HashMap<String, usize>,
    content_hash: u64,
}

impl RecipeCatalog {
    pub fn get(&self, code: &str) -> Option<&CompiledRecipe> {
        self.by_code.get(code).map(|&i| &self.recipes[i])
    }

    pub fn get_by_id(&self, id: u32) -> Option<&CompiledRecipe> {
        let idx = (id as usize).checked_sub(1)?;
        self.recipes.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRecipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn items(&self) -> &dyn ItemCatalog {
        &self.items
    }

    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    /// Recipes whose ingredient accepts `held_code`.
    pub fn matching<'a>(&'a self, held_code: &'a str) -> impl Iterator<Item = &'a CompiledRecipe> + 'a {
        self.recipes.iter().filter(move |r| r.matches(held_code))
    }

    /// Whether any recipe accepts `held_code`.
    pub fn accepts(&self, held_code: &str) -> bool {
        self.matching(held_code).next().is_some()
    }

    /// Recipe choices for a held item, each paired with its generated output.
    /// Recipes whose output cannot be generated for this item are left out.
    pub fn choices(&self, held: &ItemStack) -> Vec<RecipeChoice> {
        self.matching(&held.code)
            .filter_map(|recipe| match recipe.generate_output(held, &self.items) {
                Ok(output) => Some(RecipeChoice {
                    code: recipe.code.clone(),
                    output,
                }),
                Err(e) => {
                    log::debug!("skipping recipe choice: {e}");
                    None
                }
            })
            .collect()
    }
}
