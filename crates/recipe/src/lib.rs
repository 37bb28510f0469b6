//! Recipe normalization for tajine
//!
//! Turns partially specified recipes into canonical records: ingredient
//! masses in grams, nutrient amounts, merged ingredient lists, a recipe diet
//! classification and scaled copies.

pub mod aggregation;
pub mod conversion;
pub mod diet;
pub mod error;
pub mod normalize;
pub mod nutrients;
pub mod scaling;
pub mod store;
pub mod types;

pub use aggregation::IngredientAggregator;
pub use conversion::UnitConverter;
pub use diet::DietClassifier;
pub use error::{RecipeError, RecipeResult};
pub use normalize::{RecipeNormalizer, refresh_derived, total_duration};
pub use nutrients::NutrientCalculator;
pub use scaling::RecipeScaler;
pub use store::{InMemoryIngredientStore, IngredientTypeStore};
pub use types::*;
