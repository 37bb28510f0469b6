//! Import of external free-text recipes into structured steps and ingredient lines.

pub mod client;
pub mod error;
pub mod ingredients;
pub mod instructions;
pub mod populate;
pub mod quantity;
pub mod servings;

pub use client::{ApiNinjasClient, ClientSettings, DEFAULT_API_URL, FetchedRecipe, RecipeSource};
pub use error::{FetchError, FetchResult, QuantityError};
pub use ingredients::{
    IngredientsPayload, ParsedAmount, ParsedIngredient, UnitKind, classify_unit,
    parse_ingredient_line, split_ingredients,
};
pub use instructions::{parse_instructions, parse_steps};
pub use populate::{PopulateOutcome, populate_if_empty};
pub use quantity::parse_quantity;
pub use servings::parse_servings;
