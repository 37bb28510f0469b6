use strum::VariantArray;
use tracing::warn;

use crate::types::{IngredientLine, Nutrient, Nutrients};

pub struct NutrientCalculator;

impl NutrientCalculator {
    /// Absolute amounts for `mass_grams` of an ingredient with the given
    /// per-100 g profile. Each nutrient is computed independently; a missing
    /// mass or profile value leaves only that nutrient unset.
    pub fn compute(ingredient: &str, mass_grams: Option<f64>, per_100g: &Nutrients) -> Nutrients {
        let mut amounts = Nutrients::default();
        for &nutrient in Nutrient::VARIANTS {
            let value = match (mass_grams, per_100g.get(nutrient)) {
                (Some(mass), Some(per_100)) => Some(mass * per_100 / 100.0),
                (None, _) => {
                    warn!(ingredient, nutrient = %nutrient, "mass unknown, nutrient skipped");
                    None
                }
                (Some(_), None) => {
                    warn!(ingredient, nutrient = %nutrient, "no per-100g value, nutrient skipped");
                    None
                }
            };
            amounts.set(nutrient, value);
        }
        amounts
    }

    /// Sum over lines. A nutrient total is known only when every line knows it.
    pub fn total<'a>(lines: impl IntoIterator<Item = &'a IngredientLine>) -> Nutrients {
        let mut total = Nutrients {
            calories: Some(0.0),
            fat: Some(0.0),
            protein: Some(0.0),
            carbohydrates: Some(0.0),
        };
        for line in lines {
            total = Self::add(&total, &line.nutrients);
        }
        total
    }

    pub fn add(left: &Nutrients, right: &Nutrients) -> Nutrients {
        let mut sum = Nutrients::default();
        for &nutrient in Nutrient::VARIANTS {
            let value = match (left.get(nutrient), right.get(nutrient)) {
                (Some(a), Some(b)) => Some(a + b),
                _ => None,
            };
            sum.set(nutrient, value);
        }
        sum
    }

    pub fn per_serving(total: &Nutrients, servings: u32) -> Nutrients {
        if servings == 0 {
            return Nutrients::default();
        }
        let mut share = Nutrients::default();
        for &nutrient in Nutrient::VARIANTS {
            share.set(nutrient, total.get(nutrient).map(|v| v / f64::from(servings)));
        }
        share
    }
}
