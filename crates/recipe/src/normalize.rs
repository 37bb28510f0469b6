//! Recipe normalization pass.
//!
//! Per line: resolve the ingredient type, compute mass, nutrients and diet.
//! Per recipe: rebuild the aggregated ingredient and tool lists, diet,
//! duration and nutrient totals from the steps.

use tracing::{debug, error, warn};

use crate::aggregation::IngredientAggregator;
use crate::conversion::UnitConverter;
use crate::diet::DietClassifier;
use crate::error::{RecipeError, RecipeResult};
use crate::nutrients::NutrientCalculator;
use crate::store::IngredientTypeStore;
use crate::types::{IngredientLine, Recipe, Step};

pub struct RecipeNormalizer<'a, S: IngredientTypeStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: IngredientTypeStore + ?Sized> RecipeNormalizer<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Normalizes `recipe`, logging instead of returning any failure.
    /// Returns false when the pass stopped early.
    pub fn normalize(&mut self, recipe: &mut Recipe) -> bool {
        match self.try_normalize(recipe) {
            Ok(()) => true,
            Err(err) => {
                error!(recipe = recipe.display_name(), error = %err, "recipe normalization failed");
                false
            }
        }
    }

    /// Normalizes every recipe, continuing past failures. Returns the number of failures.
    pub fn normalize_all(&mut self, recipes: &mut [Recipe]) -> usize {
        recipes
            .iter_mut()
            .map(|recipe| self.normalize(recipe))
            .filter(|ok| !ok)
            .count()
    }

    pub fn try_normalize(&mut self, recipe: &mut Recipe) -> RecipeResult<()> {
        debug!(recipe = recipe.display_name(), steps = recipe.steps.len(), "normalizing recipe");

        for step in &mut recipe.steps {
            for line in &mut step.ingredients {
                self.normalize_line(line)?;
            }
        }

        refresh_derived(recipe)
    }

    fn normalize_line(&mut self, line: &mut IngredientLine) -> RecipeResult<()> {
        let ingredient_type = match &line.ingredient_type {
            Some(id) => self.store.resolve(id).map_err(|err| store_error(line, err))?,
            None => {
                let created = self
                    .store
                    .get_or_create(&line.name)
                    .map_err(|err| store_error(line, err))?;
                line.ingredient_type = Some(created.id.clone());
                Some(created)
            }
        };

        let Some(ingredient_type) = ingredient_type else {
            warn!(ingredient = %line.name, "ingredient type not found, keeping stored values");
            return Ok(());
        };

        let mass = match line.quantity {
            Some(quantity) => {
                UnitConverter::to_grams(&line.name, quantity, &line.unit, ingredient_type.properties())
            }
            None => {
                warn!(ingredient = %line.name, "no quantity, mass unknown");
                None
            }
        };
        // Legacy lines carry a precomputed mass that cannot be derived again.
        if mass.is_some() || line.mass_grams.is_none() {
            line.mass_grams = mass;
        }

        line.nutrients = NutrientCalculator::compute(
            &line.name,
            line.mass_grams,
            &ingredient_type.nutrients_per_100g,
        );
        line.diet_classification = ingredient_type.diet_classification;

        Ok(())
    }
}

/// Recomputes everything a recipe derives from its steps.
pub fn refresh_derived(recipe: &mut Recipe) -> RecipeResult<()> {
    let ingredients = IngredientAggregator::aggregate(&recipe.steps);
    IngredientAggregator::ensure_distinct(&ingredients)?;

    recipe.tools = IngredientAggregator::aggregate_tools(&recipe.steps);
    recipe.diet_classification = DietClassifier::classify(&ingredients);
    if let Some(duration) = total_duration(&recipe.steps) {
        recipe.duration = Some(duration);
    }
    recipe.total_nutrients = NutrientCalculator::total(&ingredients);
    recipe.nutrients_per_serving = match recipe.number_of_servings {
        Some(servings) if servings > 0 => {
            NutrientCalculator::per_serving(&recipe.total_nutrients, servings)
        }
        _ => Default::default(),
    };
    recipe.ingredients = ingredients;

    Ok(())
}

/// Sum of the known step durations, `None` when no step has one.
pub fn total_duration(steps: &[Step]) -> Option<f64> {
    steps
        .iter()
        .filter_map(|step| step.duration)
        .fold(None, |total, minutes| Some(total.unwrap_or(0.0) + minutes))
}

fn store_error(line: &IngredientLine, err: RecipeError) -> RecipeError {
    match err {
        RecipeError::Store { .. } => err,
        other => RecipeError::Store {
            ingredient: line.name.clone(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryIngredientStore;
    use crate::types::{IngredientType, Nutrients, Unit};

    fn step_with(minutes: Option<f64>, ingredients: Vec<IngredientLine>) -> Step {
        Step {
            duration: minutes,
            ingredients,
            ..Default::default()
        }
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(total_duration(&[]), None);
        let steps = vec![
            step_with(Some(10.0), vec![]),
            step_with(None, vec![]),
            step_with(Some(5.5), vec![]),
        ];
        assert_eq!(total_duration(&steps), Some(15.5));
    }

    #[test]
    fn test_line_gets_lazy_type_reference() {
        let mut store = InMemoryIngredientStore::new();
        let mut recipe = Recipe::named("Soup");
        recipe.steps.push(step_with(
            None,
            vec![IngredientLine::new("Bay Leaf", Some(2.0), Unit::Piece)],
        ));

        assert!(RecipeNormalizer::new(&mut store).normalize(&mut recipe));

        let line = &recipe.steps[0].ingredients[0];
        assert_eq!(line.ingredient_type.as_ref().map(|id| id.as_str()), Some("bay_leaf"));
        assert_eq!(line.mass_grams, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_legacy_mass_is_kept() {
        let mut store = InMemoryIngredientStore::with_types([IngredientType {
            nutrients_per_100g: Nutrients {
                calories: Some(200.0),
                ..Default::default()
            },
            ..IngredientType::named("Stock Cube")
        }]);
        let mut line = IngredientLine::new("Stock Cube", Some(1.0), Unit::Piece);
        line.mass_grams = Some(10.0);
        let mut recipe = Recipe::named("Broth");
        recipe.steps.push(step_with(None, vec![line]));

        RecipeNormalizer::new(&mut store).normalize(&mut recipe);

        let line = &recipe.steps[0].ingredients[0];
        assert_eq!(line.mass_grams, Some(10.0));
        assert_eq!(line.nutrients.calories, Some(20.0));
    }

    struct FailingStore;

    impl IngredientTypeStore for FailingStore {
        fn resolve(&self, _id: &crate::types::IngredientTypeId) -> RecipeResult<Option<IngredientType>> {
            Ok(None)
        }

        fn get_or_create(&mut self, name: &str) -> RecipeResult<IngredientType> {
            Err(RecipeError::Store {
                ingredient: name.to_string(),
                message: "backend unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_store_failure_is_caught_per_recipe() {
        let mut store = FailingStore;
        let mut recipes = vec![Recipe::named("Empty"), Recipe::named("Broken")];
        recipes[1].steps.push(step_with(
            None,
            vec![IngredientLine::new("Saffron", Some(1.0), Unit::Gram)],
        ));

        let failures = RecipeNormalizer::new(&mut store).normalize_all(&mut recipes);

        assert_eq!(failures, 1);
        let err = RecipeNormalizer::new(&mut store).try_normalize(&mut recipes[1]).unwrap_err();
        assert!(err.to_string().contains("Saffron"));
    }
}
