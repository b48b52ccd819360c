pub mod catalog;
pub mod compiler;
pub mod items;
pub mod loader;
pub mod output;
pub mod recipe;
pub mod validator;
pub mod wildcard;

pub use catalog::{CatalogError, RecipeCatalog, RecipeCatalogBuilder, RecipeChoice};
pub use items::{ItemCatalog, ItemRegistry};
pub use loader::{LoadError, LoadSummary};
pub use output::ResolveError;
pub use recipe::{CompiledRecipe, Ingredient, RecipeDef};
