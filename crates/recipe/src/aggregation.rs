use std::collections::{HashMap, HashSet};

use crate::error::{RecipeError, RecipeResult};
use crate::nutrients::NutrientCalculator;
use crate::types::{IngredientLine, Step, Tool};

/// Ingredient Aggregation Service
///
/// Stateless domain service that merges repeated ingredient lines across the
/// steps of a recipe into one line per name, in first-seen order:
/// - "Garlic 2" (step 1) + "Garlic 3" (step 2) = "Garlic 5"
/// - quantities and nutrient amounts are summed, an unknown on either side stays unknown
/// - the first occurrence decides unit, ingredient type and lab id
///
/// A merged line has no mass: the summed quantity may mix units, so mass is
/// not recomputed from it.
pub struct IngredientAggregator;

impl IngredientAggregator {
    pub fn aggregate(steps: &[Step]) -> Vec<IngredientLine> {
        let mut merged: Vec<IngredientLine> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for line in steps.iter().flat_map(|step| step.ingredients.iter()) {
            match positions.get(line.name.as_str()) {
                Some(&position) => Self::merge_into(&mut merged[position], line),
                None => {
                    positions.insert(line.name.as_str(), merged.len());
                    merged.push(line.clone());
                }
            }
        }

        merged
    }

    /// Tools deduplicated by name, first occurrence wins.
    pub fn aggregate_tools(steps: &[Step]) -> Vec<Tool> {
        let mut seen = HashSet::new();
        steps
            .iter()
            .flat_map(|step| step.tools.iter())
            .filter(|tool| seen.insert(tool.name.as_str()))
            .cloned()
            .collect()
    }

    /// Checks that no name appears twice in an aggregated list.
    pub fn ensure_distinct(lines: &[IngredientLine]) -> RecipeResult<()> {
        let mut seen = HashSet::new();
        for line in lines {
            if !seen.insert(line.name.as_str()) {
                return Err(RecipeError::DuplicateAggregate(line.name.clone()));
            }
        }
        Ok(())
    }

    fn merge_into(target: &mut IngredientLine, line: &IngredientLine) {
        target.quantity = match (target.quantity, line.quantity) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };
        target.nutrients = NutrientCalculator::add(&target.nutrients, &line.nutrients);
        target.mass_grams = None;
    }
}
