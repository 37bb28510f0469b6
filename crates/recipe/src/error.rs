use thiserror::Error;

pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Ingredient store error for '{ingredient}': {message}")]
    Store { ingredient: String, message: String },

    #[error("Aggregated ingredient list is corrupt: '{0}' appears more than once")]
    DuplicateAggregate(String),

    #[error("Cannot scale recipe - number of servings is missing or zero")]
    MissingServings,

    #[error("Cannot scale recipe to zero servings")]
    ZeroServings,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
