use crate::types::{DietClassification, IngredientLine};

/// Derives the recipe-level diet from its aggregated ingredients.
///
/// Precedence, evaluated in order:
/// 1. no ingredients → Ambiguous
/// 2. any AnimalProduct → AnimalProduct
/// 3. all Vegan → Vegan
/// 4. any Vegetarian → Vegetarian
/// 5. otherwise → Ambiguous
///
/// Lines without a classification count as Ambiguous.
pub struct DietClassifier;

impl DietClassifier {
    pub fn classify(ingredients: &[IngredientLine]) -> DietClassification {
        let diets: Vec<DietClassification> = ingredients
            .iter()
            .map(|line| line.diet_classification.unwrap_or_default())
            .collect();

        if diets.is_empty() {
            return DietClassification::Ambiguous;
        }
        if diets.contains(&DietClassification::AnimalProduct) {
            return DietClassification::AnimalProduct;
        }
        if diets.iter().all(|d| *d == DietClassification::Vegan) {
            return DietClassification::Vegan;
        }
        if diets.contains(&DietClassification::Vegetarian) {
            return DietClassification::Vegetarian;
        }
        DietClassification::Ambiguous
    }
}
