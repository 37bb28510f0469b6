//! Glue between configuration, the recipe source and the normalizer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tajine_import::{ApiNinjasClient, PopulateOutcome, RecipeSource, populate_if_empty};
use tajine_recipe::{InMemoryIngredientStore, IngredientTypeStore, Recipe, RecipeNormalizer};
use tracing::info;

use crate::config::{CatalogConfig, FetcherConfig};

/// Contents of a recipe file: one recipe or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeFile {
    Many(Vec<Recipe>),
    One(Box<Recipe>),
}

impl RecipeFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse recipe file {}", path.display()))
    }

    pub fn recipes_mut(&mut self) -> &mut [Recipe] {
        match self {
            RecipeFile::Many(recipes) => recipes,
            RecipeFile::One(recipe) => std::slice::from_mut(recipe.as_mut()),
        }
    }
}

/// Ingredient store preloaded from the configured catalog, empty without one.
pub fn load_catalog(config: &CatalogConfig) -> Result<InMemoryIngredientStore> {
    match &config.path {
        Some(path) => InMemoryIngredientStore::from_json_file(path)
            .with_context(|| format!("Failed to load ingredient catalog {}", path.display())),
        None => Ok(InMemoryIngredientStore::new()),
    }
}

/// The configured recipe source, or `None` when lookups are disabled.
pub fn recipe_source(config: &FetcherConfig, offline: bool) -> Result<Option<ApiNinjasClient>> {
    if offline || !config.enabled {
        return Ok(None);
    }
    let client = ApiNinjasClient::new(config.client_settings())
        .context("Failed to build recipe API client")?;
    Ok(Some(client))
}

/// Fills empty recipes from `source` when given, then normalizes all of them.
/// Returns the number of recipes whose normalization failed.
pub async fn prepare_recipes<S>(
    recipes: &mut [Recipe],
    source: Option<&dyn RecipeSource>,
    store: &mut S,
) -> usize
where
    S: IngredientTypeStore + ?Sized,
{
    if let Some(source) = source {
        for recipe in recipes.iter_mut() {
            if populate_if_empty(recipe, source).await == PopulateOutcome::Populated {
                info!(recipe = recipe.display_name(), "recipe filled from external source");
            }
        }
    }

    RecipeNormalizer::new(store).normalize_all(recipes)
}
