//! Ingredient type lookup.
//!
//! Lines refer to their [`IngredientType`] by id only; whoever persists types
//! implements [`IngredientTypeStore`].

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::RecipeResult;
use crate::types::{IngredientType, IngredientTypeId};

pub trait IngredientTypeStore {
    fn resolve(&self, id: &IngredientTypeId) -> RecipeResult<Option<IngredientType>>;

    /// Returns the type for `name`, creating a bare record (name and id only)
    /// when none exists. An existing record is never overwritten.
    fn get_or_create(&mut self, name: &str) -> RecipeResult<IngredientType>;
}

#[derive(Default, Debug, Clone)]
pub struct InMemoryIngredientStore {
    types: HashMap<IngredientTypeId, IngredientType>,
}

impl InMemoryIngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = IngredientType>) -> Self {
        let mut store = Self::new();
        for ingredient_type in types {
            store.insert(ingredient_type);
        }
        store
    }

    /// Loads a JSON array of ingredient types.
    pub fn from_json_file(path: impl AsRef<Path>) -> RecipeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let types: Vec<IngredientType> = serde_json::from_str(&content)?;
        let store = Self::with_types(types);
        info!(path = %path.display(), count = store.len(), "ingredient catalog loaded");
        Ok(store)
    }

    /// Adds a record unless its id is taken. A missing id is derived from the name.
    pub fn insert(&mut self, mut ingredient_type: IngredientType) -> bool {
        if ingredient_type.id.is_empty() {
            ingredient_type.id = IngredientTypeId::from_name(&ingredient_type.name);
        }
        if self.types.contains_key(&ingredient_type.id) {
            debug!(id = %ingredient_type.id, "ingredient type already present, keeping existing");
            return false;
        }
        self.types.insert(ingredient_type.id.clone(), ingredient_type);
        true
    }

    pub fn get(&self, id: &IngredientTypeId) -> Option<&IngredientType> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl IngredientTypeStore for InMemoryIngredientStore {
    fn resolve(&self, id: &IngredientTypeId) -> RecipeResult<Option<IngredientType>> {
        Ok(self.types.get(id).cloned())
    }

    fn get_or_create(&mut self, name: &str) -> RecipeResult<IngredientType> {
        let id = IngredientTypeId::from_name(name);
        let ingredient_type = self.types.entry(id).or_insert_with(|| {
            debug!(ingredient = name, "creating ingredient type");
            IngredientType::named(name.trim())
        });
        Ok(ingredient_type.clone())
    }
}
