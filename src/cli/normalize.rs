use std::path::PathBuf;

use tajine::{Config, RecipeFile, load_catalog, prepare_recipes, recipe_source};
use tajine_import::RecipeSource;

pub async fn normalize(config: Config, file: PathBuf, offline: bool) -> anyhow::Result<()> {
    let mut store = load_catalog(&config.catalog)?;
    let source = recipe_source(&config.fetcher, offline)?;
    let mut recipes = RecipeFile::read(&file)?;

    let failures = prepare_recipes(
        recipes.recipes_mut(),
        source.as_ref().map(|client| client as &dyn RecipeSource),
        &mut store,
    )
    .await;

    if failures > 0 {
        tracing::warn!(failures, file = %file.display(), "some recipes could not be normalized");
    }

    super::print_json(&recipes)
}
