use tajine_recipe::{IngredientLine, Recipe, Step};
use tracing::{debug, info, warn};

use crate::client::RecipeSource;
use crate::ingredients::{parse_ingredient_line, split_ingredients};
use crate::instructions::parse_steps;
use crate::servings::parse_servings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// The recipe has no name or already has steps.
    Skipped,
    /// The lookup failed or found nothing.
    NoData,
    Populated,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|text| text.trim().is_empty())
}

/// Fills an empty recipe from the first external record matching its name.
///
/// Existing fields are never overwritten, so running this again on a
/// populated recipe changes nothing. Lookup failures leave the recipe as is.
pub async fn populate_if_empty<S: RecipeSource + ?Sized>(
    recipe: &mut Recipe,
    source: &S,
) -> PopulateOutcome {
    let Some(name) = recipe.name.clone().filter(|name| !name.trim().is_empty()) else {
        debug!("recipe has no name, nothing to look up");
        return PopulateOutcome::Skipped;
    };
    if !recipe.steps.is_empty() {
        debug!(recipe = %name, "recipe already has steps");
        return PopulateOutcome::Skipped;
    }

    let fetched = match source.fetch(&name).await {
        Ok(records) => records.into_iter().next(),
        Err(err) => {
            warn!(recipe = %name, error = %err, "recipe lookup failed, leaving recipe unchanged");
            return PopulateOutcome::NoData;
        }
    };
    let Some(fetched) = fetched else {
        info!(recipe = %name, "no external recipe found");
        return PopulateOutcome::NoData;
    };

    let ingredients: Vec<IngredientLine> = fetched
        .ingredients
        .as_ref()
        .map(split_ingredients)
        .unwrap_or_default()
        .iter()
        .map(|line| parse_ingredient_line(line).into())
        .collect();

    let instructions = fetched.instructions.as_deref().unwrap_or_default();
    let mut steps = parse_steps(instructions);
    if let Some(first) = steps.first_mut() {
        first.ingredients = ingredients;
    } else if !ingredients.is_empty() {
        let instruction = if instructions.trim().is_empty() {
            fetched.title.clone()
        } else {
            Some(instructions.to_string())
        };
        steps.push(Step {
            instruction,
            ingredients,
            ..Default::default()
        });
    }

    if let Some(title) = fetched.title.as_ref().filter(|title| !title.is_empty()) {
        if is_blank(&recipe.summary) {
            recipe.summary = Some(title.clone());
        }
    }
    // zero servings counts as unset
    if recipe.number_of_servings.is_none_or(|servings| servings == 0) {
        recipe.number_of_servings = fetched.servings.as_deref().and_then(parse_servings);
    }
    if recipe.steps.is_empty() {
        recipe.steps = steps;
    }
    recipe.source_title = fetched.title;

    info!(
        recipe = %name,
        steps = recipe.steps.len(),
        servings = ?recipe.number_of_servings,
        "populated recipe from external record"
    );
    PopulateOutcome::Populated
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tajine_recipe::Unit;

    use super::*;
    use crate::client::FetchedRecipe;
    use crate::error::{FetchError, FetchResult};
    use crate::ingredients::IngredientsPayload;

    struct StaticSource(Vec<FetchedRecipe>);

    #[async_trait]
    impl RecipeSource for StaticSource {
        async fn fetch(&self, _name: &str) -> FetchResult<Vec<FetchedRecipe>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl RecipeSource for BrokenSource {
        async fn fetch(&self, _name: &str) -> FetchResult<Vec<FetchedRecipe>> {
            Err(FetchError::Status { status: 503 })
        }
    }

    fn lentil_soup() -> FetchedRecipe {
        FetchedRecipe {
            title: Some("Lentil Soup".to_string()),
            servings: Some("6 servings".to_string()),
            ingredients: Some(IngredientsPayload::Text(
                "1 cup lentils|2 cloves garlic|salt".to_string(),
            )),
            instructions: Some("1. Rinse lentils. 2. Simmer with garlic.".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ingredients_go_on_first_step() {
        let mut recipe = Recipe::named("lentil soup");
        let outcome = populate_if_empty(&mut recipe, &StaticSource(vec![lentil_soup()])).await;

        assert_eq!(outcome, PopulateOutcome::Populated);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[0].ingredients.len(), 3);
        assert!(recipe.steps[1].ingredients.is_empty());
        assert_eq!(recipe.steps[0].ingredients[0].unit, Unit::Cup);
        assert_eq!(recipe.steps[0].ingredients[2].quantity, None);
        assert_eq!(recipe.summary.as_deref(), Some("Lentil Soup"));
        assert_eq!(recipe.number_of_servings, Some(6));
        assert_eq!(recipe.source_title.as_deref(), Some("Lentil Soup"));
    }

    #[tokio::test]
    async fn test_synthetic_step_uses_title_without_instructions() {
        let record = FetchedRecipe {
            instructions: None,
            ..lentil_soup()
        };
        let mut recipe = Recipe::named("lentil soup");
        populate_if_empty(&mut recipe, &StaticSource(vec![record])).await;

        assert_eq!(recipe.steps.len(), 1);
        assert_eq!(recipe.steps[0].instruction.as_deref(), Some("Lentil Soup"));
        assert_eq!(recipe.steps[0].ingredients.len(), 3);
    }

    #[tokio::test]
    async fn test_existing_fields_are_kept() {
        let mut recipe = Recipe::named("lentil soup");
        recipe.summary = Some("Grandma's".to_string());
        recipe.number_of_servings = Some(2);
        populate_if_empty(&mut recipe, &StaticSource(vec![lentil_soup()])).await;

        assert_eq!(recipe.summary.as_deref(), Some("Grandma's"));
        assert_eq!(recipe.number_of_servings, Some(2));
    }

    #[tokio::test]
    async fn test_zero_servings_are_filled() {
        let mut recipe = Recipe::named("lentil soup");
        recipe.number_of_servings = Some(0);
        populate_if_empty(&mut recipe, &StaticSource(vec![lentil_soup()])).await;

        assert_eq!(recipe.number_of_servings, Some(6));
    }

    #[tokio::test]
    async fn test_skips_without_name_or_with_steps() {
        let source = StaticSource(vec![lentil_soup()]);

        let mut unnamed = Recipe::default();
        assert_eq!(populate_if_empty(&mut unnamed, &source).await, PopulateOutcome::Skipped);
        assert!(unnamed.steps.is_empty());

        let mut structured = Recipe::named("lentil soup");
        structured.steps.push(Step::with_instruction("Eat."));
        let before = structured.clone();
        assert_eq!(populate_if_empty(&mut structured, &source).await, PopulateOutcome::Skipped);
        assert_eq!(structured, before);
    }

    #[tokio::test]
    async fn test_failure_and_empty_result_leave_recipe_unchanged() {
        let mut recipe = Recipe::named("lentil soup");
        let before = recipe.clone();

        assert_eq!(populate_if_empty(&mut recipe, &BrokenSource).await, PopulateOutcome::NoData);
        assert_eq!(recipe, before);

        assert_eq!(
            populate_if_empty(&mut recipe, &StaticSource(Vec::new())).await,
            PopulateOutcome::NoData
        );
        assert_eq!(recipe, before);
    }
}
