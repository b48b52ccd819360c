use thiserror::Error;

use crate::catalog::RecipeCatalogBuilder;
use crate::compiler::compile_recipe;
use crate::items::ItemRegistry;
use crate::recipe::RecipeDef;
use crate::wildcard;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse recipes RON: {0}")]
    RecipeParseError(String),
    #[error("Failed to parse items RON: {0}")]
    ItemParseError(String),
}

/// Outcome of registering a batch of recipe definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub registered: usize,
    pub ignored: usize,
}

/// Whether the first token of a RON document opens a list. Leading
/// whitespace and `//` line comments are skipped.
fn starts_with_list(ron_str: &str) -> bool {
    ron_str
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with("//"))
        .is_some_and(|line| line.starts_with('['))
}

/// Parse a recipes RON string. A file may hold a list of recipes or a
/// single recipe object; the first token decides which, so a parse error
/// points into the document as written.
pub fn load_recipes_from_str(ron_str: &str) -> Result<Vec<RecipeDef>, LoadError> {
    let options = ron::Options::default();
    if starts_with_list(ron_str) {
        return options
            .from_str::<Vec<RecipeDef>>(ron_str)
            .map_err(|e| LoadError::RecipeParseError(e.to_string()));
    }
    let single: RecipeDef = options
        .from_str(ron_str)
        .map_err(|e| LoadError::RecipeParseError(e.to_string()))?;
    Ok(vec![single])
}

/// Load and merge multiple recipe sources.
pub fn load_all_recipes(sources: &[&str]) -> Result<Vec<RecipeDef>, LoadError> {
    let mut all = Vec::new();
    for source in sources {
        all.extend(load_recipes_from_str(source)?);
    }
    Ok(all)
}

/// Parse a RON list of item codes into an item registry.
pub fn load_items_from_str(ron_str: &str) -> Result<ItemRegistry, LoadError> {
    let options = ron::Options::default();
    let codes: Vec<String> = options
        .from_str(ron_str)
        .map_err(|e| LoadError::ItemParseError(e.to_string()))?;
    Ok(ItemRegistry::from_codes(codes))
}

enum Registration {
    Registered,
    Unresolved,
    Rejected,
}

fn register_one(
    def: &RecipeDef,
    builder: &mut RecipeCatalogBuilder,
    summary: &mut LoadSummary,
) -> Registration {
    let compiled = match compile_recipe(def, builder.items()) {
        Ok(compiled) => compiled,
        Err(e) => {
            log::warn!("{e}");
            summary.ignored += 1;
            return Registration::Unresolved;
        }
    };
    match builder.register(compiled) {
        Ok(_) => {
            summary.registered += 1;
            Registration::Registered
        }
        Err(e) => {
            log::warn!("{e}");
            summary.ignored += 1;
            Registration::Rejected
        }
    }
}

/// Fan out, resolve, compile and register every enabled definition.
///
/// A definition that fails to resolve or collides with an existing code is
/// logged and counted as ignored; it never aborts the batch. When no
/// fanned-out variant resolves, the wildcard recipe itself is registered and
/// matched against held items at use time.
pub fn register_all(defs: &[RecipeDef], builder: &mut RecipeCatalogBuilder) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for def in defs {
        if !def.enabled {
            log::debug!("recipe '{}' is disabled, skipping", def.code);
            continue;
        }

        let children = wildcard::expand(def, builder.items());
        if children.is_empty() {
            register_one(def, builder, &mut summary);
            continue;
        }
        log::debug!(
            "recipe '{}' expanded into {} variants",
            def.code,
            children.len()
        );

        let mut all_unresolved = true;
        for child in &children {
            match register_one(child, builder, &mut summary) {
                Registration::Unresolved => {}
                Registration::Registered | Registration::Rejected => all_unresolved = false,
            }
        }
        if all_unresolved {
            log::warn!(
                "no variant of recipe '{}' resolved, keeping it as a wildcard",
                def.code
            );
            register_one(def, builder, &mut summary);
        }
    }

    log::info!(
        "{} hewing recipes loaded ({} could not be resolved)",
        summary.registered,
        summary.ignored
    );
    summary
}
