//! Loading the item list, recipe files and station config from a data directory.
//!
//! Layout: `<dir>/items.ron` and `<dir>/recipes/*.ron`. Recipe files are read
//! in file-name order so ids and the catalog hash are reproducible.

use std::path::{Path, PathBuf};

use hewing_rules::loader::{load_items_from_str, load_recipes_from_str, register_all, LoadSummary};
use hewing_rules::validator::validate_recipes;
use hewing_rules::{RecipeCatalog, RecipeCatalogBuilder, RecipeDef};
use hewing_station::StationConfig;

use crate::error::CliError;

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// All `.ron` files directly inside `dir`, sorted by name.
pub fn recipe_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| CliError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn load_recipe_defs(dir: &Path) -> Result<Vec<RecipeDef>, CliError> {
    let mut defs = Vec::new();
    for path in recipe_files(dir)? {
        let parsed = load_recipes_from_str(&read(&path)?)
            .map_err(|source| CliError::Load { path: path.clone(), source })?;
        log::debug!("{}: {} recipe definition(s)", path.display(), parsed.len());
        defs.extend(parsed);
    }
    Ok(defs)
}

/// Build and seal the recipe catalog from a data directory.
///
/// Validation problems are logged; definitions that fail to resolve are
/// skipped by the loader and counted in the summary.
pub fn load_catalog(data_dir: &Path) -> Result<(RecipeCatalog, LoadSummary), CliError> {
    let items_path = data_dir.join("items.ron");
    let items = load_items_from_str(&read(&items_path)?).map_err(|source| CliError::Load {
        path: items_path,
        source,
    })?;
    let defs = load_recipe_defs(&data_dir.join("recipes"))?;

    if let Err(errors) = validate_recipes(&defs) {
        for error in &errors {
            log::warn!("{error}");
        }
    }

    let mut builder = RecipeCatalogBuilder::new(items);
    let summary = register_all(&defs, &mut builder);
    Ok((builder.seal(), summary))
}

/// Read a RON [`StationConfig`]. Fields left out keep their defaults.
pub fn load_station_config(path: &Path) -> Result<StationConfig, CliError> {
    ron::Options::default()
        .from_str(&read(path)?)
        .map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
