//! Ingredient/output resolution and output-code transformation.

use hewing_core::types::{code_path, normalize_code, ItemStack};
use thiserror::Error;

use crate::items::ItemCatalog;
use crate::recipe::{Ingredient, IngredientDef, OutputDef};
use crate::wildcard::is_wildcard;

/// Placeholder substituted with the variant token taken from the input code.
pub const WOOD_PLACEHOLDER: &str = "{wood}";

/// Positional and structural tokens that never name a variant.
const STOP_WORDS: [&str; 9] = [
    "log",
    "placed",
    "planted",
    "ud",
    "ld",
    "u",
    "d",
    "placedlog",
    "debarkedlog",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("recipe '{recipe}': unknown item '{code}'")]
    UnknownItem { recipe: String, code: String },
    #[error("recipe '{recipe}': output code template is missing")]
    MissingOutput { recipe: String },
    #[error("recipe '{recipe}': no variant token in input code '{input}'")]
    NoVariantToken { recipe: String, input: String },
    #[error("recipe '{recipe}': ingredient '{code}' has more than one wildcard")]
    AmbiguousWildcard { recipe: String, code: String },
}

/// First token of `input_code`'s path (split on `-`/`_`) that is neither a
/// stop word nor purely numeric.
pub fn extract_variant_token(input_code: &str) -> Option<String> {
    code_path(input_code)
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .filter(|part| !STOP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(part)))
        .find(|part| !part.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

/// Substitute the variant token of `input_code` into `template`.
///
/// A template without the placeholder is returned unchanged. Returns None
/// when the template needs a token and none can be extracted.
pub fn transform_output_code(template: &str, input_code: &str) -> Option<String> {
    if !template.contains(WOOD_PLACEHOLDER) {
        return Some(template.to_string());
    }
    let token = extract_variant_token(input_code)?;
    Some(template.replace(WOOD_PLACEHOLDER, &token))
}

/// Resolve an ingredient descriptor against the item catalog.
///
/// Concrete codes must exist. Wildcard codes stay patterns and are matched
/// by glob at use time.
pub fn resolve_ingredient(
    recipe: &str,
    def: &IngredientDef,
    items: &dyn ItemCatalog,
) -> Result<Ingredient, ResolveError> {
    let code = normalize_code(&def.code);
    if is_wildcard(&code) {
        if code.matches('*').count() > 1 {
            return Err(ResolveError::AmbiguousWildcard {
                recipe: recipe.to_string(),
                code,
            });
        }
        return Ok(Ingredient {
            code,
            name: def.name.clone(),
            concrete: false,
        });
    }
    if !items.contains(&code) {
        return Err(ResolveError::UnknownItem {
            recipe: recipe.to_string(),
            code,
        });
    }
    Ok(Ingredient {
        code,
        name: def.name.clone(),
        concrete: true,
    })
}

/// Resolve an output descriptor. Templates that still carry a placeholder
/// are checked when the output is generated; concrete codes must exist now.
pub fn resolve_output(
    recipe: &str,
    def: &OutputDef,
    items: &dyn ItemCatalog,
) -> Result<String, ResolveError> {
    if def.code.trim().is_empty() {
        return Err(ResolveError::MissingOutput {
            recipe: recipe.to_string(),
        });
    }
    let code = normalize_code(&def.code);
    if code.contains('{') {
        return Ok(code);
    }
    if !items.contains(&code) {
        return Err(ResolveError::UnknownItem {
            recipe: recipe.to_string(),
            code,
        });
    }
    Ok(code)
}

/// Generate the concrete output stack for `input` from an output template.
pub fn generate_output(
    recipe: &str,
    template: &str,
    quantity: u32,
    input: &ItemStack,
    items: &dyn ItemCatalog,
) -> Result<ItemStack, ResolveError> {
    if template.trim().is_empty() {
        return Err(ResolveError::MissingOutput {
            recipe: recipe.to_string(),
        });
    }
    let code = transform_output_code(template, &input.code).ok_or_else(|| {
        ResolveError::NoVariantToken {
            recipe: recipe.to_string(),
            input: input.code.clone(),
        }
    })?;
    let code = normalize_code(&code);
    if !items.contains(&code) {
        return Err(ResolveError::UnknownItem {
            recipe: recipe.to_string(),
            code,
        });
    }
    log::debug!("recipe '{recipe}': {} -> {code}", input.code);
    Ok(ItemStack::new(code, quantity.max(1)))
}
