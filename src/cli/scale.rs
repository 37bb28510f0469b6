use std::path::PathBuf;

use anyhow::bail;
use tajine::{Config, RecipeFile, load_catalog, prepare_recipes};
use tajine_recipe::{RecipeNormalizer, RecipeScaler};

pub async fn scale(config: Config, file: PathBuf, servings: u32) -> anyhow::Result<()> {
    let mut store = load_catalog(&config.catalog)?;
    let RecipeFile::One(mut recipe) = RecipeFile::read(&file)? else {
        bail!("{} holds several recipes, scale expects one", file.display());
    };

    prepare_recipes(std::slice::from_mut(recipe.as_mut()), None, &mut store).await;

    let mut normalizer = RecipeNormalizer::new(&mut store);
    match RecipeScaler::scale(&recipe, servings, &mut normalizer)? {
        Some(scaled) => super::print_json(&scaled),
        // already logged as a warning
        None => Ok(()),
    }
}
