use std::collections::HashSet;

use hewing_core::constants::{GRID_SIZE, PATTERN_EMPTY, PATTERN_SOLID};
use thiserror::Error;

use crate::recipe::RecipeDef;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate recipe code '{0}'")]
    DuplicateCode(String),
    #[error("Recipe '{code}' has {layers} layers, only the first {max} are used")]
    TooManyLayers {
        code: String,
        layers: usize,
        max: usize,
    },
    #[error("Recipe '{code}' layer {layer} has {len} rows or columns, max is {max}")]
    RowTooLong {
        code: String,
        layer: usize,
        len: usize,
        max: usize,
    },
    #[error("Recipe '{code}' uses '{ch}' in its pattern, expected '#' or '_'")]
    InvalidPatternChar { code: String, ch: char },
    #[error("Recipe '{code}' ingredient '{ingredient}' has more than one wildcard")]
    MultipleWildcards { code: String, ingredient: String },
    #[error("Recipe '{0}' has an empty pattern")]
    EmptyPattern(String),
}

/// Check recipe definitions for authoring mistakes. Collects every problem
/// rather than stopping at the first.
pub fn validate_recipes(defs: &[RecipeDef]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let max = GRID_SIZE;

    let mut seen = HashSet::new();
    for def in defs {
        if !seen.insert(def.code.as_str()) {
            errors.push(ValidationError::DuplicateCode(def.code.clone()));
        }
    }

    for def in defs {
        if def.ingredient.code.matches('*').count() > 1 {
            errors.push(ValidationError::MultipleWildcards {
                code: def.code.clone(),
                ingredient: def.ingredient.code.clone(),
            });
        }

        if def.pattern.iter().all(|layer| layer.iter().all(String::is_empty)) {
            errors.push(ValidationError::EmptyPattern(def.code.clone()));
            continue;
        }

        if def.pattern.len() > max {
            errors.push(ValidationError::TooManyLayers {
                code: def.code.clone(),
                layers: def.pattern.len(),
                max,
            });
        }

        for (layer_idx, rows) in def.pattern.iter().enumerate() {
            let longest = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
            let len = longest.max(rows.len());
            if len > max {
                errors.push(ValidationError::RowTooLong {
                    code: def.code.clone(),
                    layer: layer_idx,
                    len,
                    max,
                });
            }

            // One report per offending character per recipe.
            for ch in rows.iter().flat_map(|r| r.chars()) {
                if ch == PATTERN_SOLID || ch == PATTERN_EMPTY {
                    continue;
                }
                let err = ValidationError::InvalidPatternChar {
                    code: def.code.clone(),
                    ch,
                };
                if !errors.contains(&err) {
                    errors.push(err);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
