use tracing::{info, warn};

use crate::error::{RecipeError, RecipeResult};
use crate::normalize::RecipeNormalizer;
use crate::store::IngredientTypeStore;
use crate::types::Recipe;

/// Recipe scaling to a target number of servings.
///
/// Scaling by 1.0 is a no-op: nothing is produced and a warning is logged.
pub struct RecipeScaler;

impl RecipeScaler {
    pub fn scaling_factor(source: &Recipe, desired_servings: u32) -> RecipeResult<f64> {
        if desired_servings == 0 {
            return Err(RecipeError::ZeroServings);
        }
        match source.number_of_servings {
            Some(servings) if servings > 0 => {
                Ok(f64::from(desired_servings) / f64::from(servings))
            }
            _ => Err(RecipeError::MissingServings),
        }
    }

    /// Returns a normalized, independent copy of `source` for `desired_servings`,
    /// or `None` when the factor is 1.0.
    pub fn scale<S: IngredientTypeStore + ?Sized>(
        source: &Recipe,
        desired_servings: u32,
        normalizer: &mut RecipeNormalizer<'_, S>,
    ) -> RecipeResult<Option<Recipe>> {
        let factor = Self::scaling_factor(source, desired_servings)?;
        if factor == 1.0 {
            warn!(recipe = source.display_name(), "scaling factor is 1.0, no scaled recipe created");
            return Ok(None);
        }

        let mut scaled = Self::scaled_copy(source, factor);
        normalizer.try_normalize(&mut scaled)?;
        info!(
            recipe = source.display_name(),
            scaled = scaled.display_name(),
            factor,
            "recipe scaled"
        );
        Ok(Some(scaled))
    }

    /// Copy of `source` with every raw quantity multiplied by `factor`.
    /// Derived lists are cleared; callers re-run normalization.
    pub fn scaled_copy(source: &Recipe, factor: f64) -> Recipe {
        let mut scaled = source.clone();
        scaled.name = Some(format!("{} (x{})", source.display_name(), format_factor(factor)));
        scaled.number_of_servings = source
            .number_of_servings
            .map(|servings| (f64::from(servings) * factor).round() as u32);
        scaled.ingredients.clear();
        scaled.tools.clear();

        for line in scaled.steps.iter_mut().flat_map(|step| step.ingredients.iter_mut()) {
            line.quantity = line.quantity.map(|quantity| quantity * factor);
            line.mass_grams = line.mass_grams.map(|mass| mass * factor);
        }

        scaled
    }
}

fn format_factor(factor: f64) -> String {
    let rounded = (factor * 100.0).round() / 100.0;
    format!("{}", rounded)
}
