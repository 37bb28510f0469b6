pub mod config;
pub mod observability;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{RecipeFile, load_catalog, prepare_recipes, recipe_source};
