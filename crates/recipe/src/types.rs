use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Measurement unit of an ingredient line.
///
/// The set is closed; anything else is carried verbatim in [`Unit::Other`]
/// so that unusual input never fails to load.
#[derive(EnumString, Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(serialize = "gram", serialize = "grams", serialize = "g")]
    Gram,
    #[strum(serialize = "milliliter", serialize = "milliliters", serialize = "ml")]
    Milliliter,
    #[default]
    #[strum(serialize = "piece", serialize = "pieces", serialize = "pcs")]
    Piece,
    #[strum(serialize = "teaspoon", serialize = "teaspoons", serialize = "tsp")]
    Teaspoon,
    #[strum(serialize = "tablespoon", serialize = "tablespoons", serialize = "tbsp")]
    Tablespoon,
    #[strum(
        serialize = "fluid ounce",
        serialize = "fluid-ounce",
        serialize = "fluid_ounce",
        serialize = "fluid ounces",
        serialize = "fl oz",
        serialize = "floz"
    )]
    FluidOunce,
    #[strum(serialize = "cup", serialize = "cups")]
    Cup,
    #[strum(serialize = "pint", serialize = "pints")]
    Pint,
    #[strum(serialize = "quart", serialize = "quarts")]
    Quart,
    #[strum(serialize = "gallon", serialize = "gallons")]
    Gallon,
    #[strum(disabled)]
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Gram => "gram",
            Unit::Milliliter => "milliliter",
            Unit::Piece => "piece",
            Unit::Teaspoon => "teaspoon",
            Unit::Tablespoon => "tablespoon",
            Unit::FluidOunce => "fluid ounce",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        trimmed
            .parse::<Unit>()
            .unwrap_or_else(|_| Unit::Other(trimmed.to_owned()))
    }
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        Unit::from(value.to_owned())
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Other(raw) => raw,
            unit => unit.as_str().to_owned(),
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DietClassification {
    AnimalProduct,
    Vegetarian,
    Vegan,
    #[default]
    Ambiguous,
}

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Fat,
    Protein,
    Carbohydrates,
}

/// Nutrient amounts. Used both for per-100 g profiles and for absolute amounts.
///
/// Calories are kcal, everything else grams. `None` means unknown.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Fat => self.fat,
            Nutrient::Protein => self.protein,
            Nutrient::Carbohydrates => self.carbohydrates,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: Option<f64>) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbohydrates => &mut self.carbohydrates,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Nutrient::VARIANTS.iter().all(|n| self.get(*n).is_none())
    }
}

/// Normalized identifier of an [`IngredientType`].
///
/// Built from the name: lowercased, spaces become underscores, commas dropped.
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientTypeId(String);

impl IngredientTypeId {
    pub fn from_name(name: &str) -> Self {
        Self(name.trim().to_lowercase().replace(' ', "_").replace(',', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IngredientTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Physical data needed to turn a quantity into grams.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PhysicalProperties {
    /// Grams per milliliter.
    pub density: Option<f64>,
    /// Grams per piece.
    pub weight_per_piece: Option<f64>,
}

/// Canonical record for a named foodstuff, shared by every line that uses it.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientType {
    #[serde(default)]
    pub id: IngredientTypeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_per_piece: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_classification: Option<DietClassification>,
    #[serde(default, skip_serializing_if = "Nutrients::is_empty")]
    pub nutrients_per_100g: Nutrients,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external_ids: BTreeMap<String, String>,
}

impl IngredientType {
    /// A bare record as created on first unresolved reference.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: IngredientTypeId::from_name(&name),
            name,
            ..Default::default()
        }
    }

    pub fn properties(&self) -> PhysicalProperties {
        PhysicalProperties {
            density: self.density,
            weight_per_piece: self.weight_per_piece,
        }
    }
}

/// One use of an ingredient within a step.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Unit,
    /// Lookup key into the ingredient store, never an owned record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_type: Option<IngredientTypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Nutrients::is_empty")]
    pub nutrients: Nutrients,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_classification: Option<DietClassification>,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: Option<f64>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
            ..Default::default()
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_temperature() -> f64 {
    20.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Degrees Celsius.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            instruction: None,
            duration: None,
            temperature: default_temperature(),
            ingredients: Vec::new(),
            tools: Vec::new(),
        }
    }
}

impl Step {
    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        Self {
            instruction: Some(instruction.into()),
            ..Default::default()
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_servings: Option<u32>,
    /// Minutes, summed over the steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub total_nutrients: Nutrients,
    #[serde(default)]
    pub nutrients_per_serving: Nutrients,
    #[serde(default)]
    pub diet_classification: DietClassification,
    /// Title of the external record the steps were populated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
}

impl Recipe {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Name used in log lines.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parses_aliases_case_insensitive() {
        assert_eq!(Unit::from("g"), Unit::Gram);
        assert_eq!(Unit::from("Cups"), Unit::Cup);
        assert_eq!(Unit::from("TBSP"), Unit::Tablespoon);
        assert_eq!(Unit::from("fluid-ounce"), Unit::FluidOunce);
        assert_eq!(Unit::from(" quart "), Unit::Quart);
    }

    #[test]
    fn test_unit_keeps_unknown_string() {
        let unit = Unit::from("handful");
        assert_eq!(unit, Unit::Other("handful".to_string()));
        // the variant name is not a unit word
        assert_eq!(Unit::from("other"), Unit::Other("other".to_string()));
        assert_eq!(String::from(unit), "handful");
    }

    #[test]
    fn test_unit_serde_uses_canonical_word() {
        let json = serde_json::to_string(&Unit::FluidOunce).unwrap();
        assert_eq!(json, "\"fluid ounce\"");
        let unit: Unit = serde_json::from_str("\"tsp\"").unwrap();
        assert_eq!(unit, Unit::Teaspoon);
    }

    #[test]
    fn test_ingredient_type_id_normalization() {
        let id = IngredientTypeId::from_name("Tomatoes, Canned Whole");
        assert_eq!(id.as_str(), "tomatoes_canned_whole");
        assert_eq!(IngredientTypeId::from_name(" Olive Oil ").as_str(), "olive_oil");
    }

    #[test]
    fn test_diet_classification_wire_format() {
        let json = serde_json::to_string(&DietClassification::AnimalProduct).unwrap();
        assert_eq!(json, "\"ANIMAL_PRODUCT\"");
        assert_eq!(DietClassification::Vegan.to_string(), "VEGAN");
        assert_eq!(DietClassification::default(), DietClassification::Ambiguous);
    }

    #[test]
    fn test_step_temperature_defaults_to_room() {
        let step: Step = serde_json::from_str(r#"{"instruction": "Rest"}"#).unwrap();
        assert_eq!(step.temperature, 20.0);
        assert!(step.ingredients.is_empty());
    }

    #[test]
    fn test_recipe_deserializes_partial_record() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "name": "Tajine",
                "number_of_servings": 4,
                "steps": [{"ingredients": [{"name": "Garlic", "quantity": 2, "unit": "piece"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(recipe.display_name(), "Tajine");
        assert_eq!(recipe.steps[0].ingredients[0].unit, Unit::Piece);
        assert_eq!(recipe.diet_classification, DietClassification::Ambiguous);
    }
}
