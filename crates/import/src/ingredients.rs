//! Free-text ingredient parsing.
//!
//! External payloads list ingredients either as a sequence of lines or as
//! one string with `|` section separators. Each line is split into an
//! optional quantity, an optional unit word and the ingredient name.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tajine_recipe::{IngredientLine, Unit};

use crate::quantity::parse_quantity_lenient;

static MASS_UNITS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "g", "gram", "grams", "kg", "kilogram", "kilograms", "mg", "lb", "pound", "pounds", "oz",
        "ounce", "ounces",
    ])
});

static VOLUME_UNITS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "ml",
        "milliliter",
        "milliliters",
        "l",
        "liter",
        "liters",
        "cup",
        "cups",
        "tbsp",
        "tablespoon",
        "tablespoons",
        "tsp",
        "teaspoon",
        "teaspoons",
        "tb",
        "pt",
        "c",
    ])
});

static PIECE_UNITS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "clove", "cloves", "piece", "pieces", "bay", "pod", "pods", "slice", "slices",
    ])
});

// quantity, then an optional unit word (must be followed by whitespace), optional "of", name
static INGREDIENT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<qty>\d+\s+\d+/\d+|\d+/\d+|\d+[.\d]*)\s*(?:(?P<unit>[A-Za-z]+)\s+)?(?:of\s+)?(?P<name>.+)$",
    )
    .unwrap()
});

/// Raw ingredient list as it appears in an external record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IngredientsPayload {
    Lines(Vec<String>),
    Text(String),
}

impl Default for IngredientsPayload {
    fn default() -> Self {
        IngredientsPayload::Lines(Vec::new())
    }
}

/// Structured shape chosen for a parsed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Mass,
    Volume,
    Piece,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedAmount {
    Mass { value: f64, unit: String },
    Volume { value: f64, unit: String },
    Pieces {
        count: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<ParsedAmount>,
}

impl ParsedIngredient {
    fn unquantified(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: None,
        }
    }
}

fn is_section_marker(text: &str) -> bool {
    text.starts_with("===") && text.ends_with("===")
}

/// Flattens a payload into ordered, non-blank ingredient lines, dropping
/// `===...===` section markers.
pub fn split_ingredients(payload: &IngredientsPayload) -> Vec<String> {
    match payload {
        IngredientsPayload::Lines(lines) => lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !is_section_marker(line))
            .map(str::to_string)
            .collect(),
        IngredientsPayload::Text(text) => text
            .split('|')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty() && !is_section_marker(chunk))
            .flat_map(|chunk| chunk.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_section_marker(line))
            .map(str::to_string)
            .collect(),
    }
}

/// Classifies a lowercased unit word. Anything outside the mass and volume
/// vocabularies becomes a piece count, including no unit at all.
pub fn classify_unit(unit: &str) -> UnitKind {
    if MASS_UNITS.contains(unit) {
        UnitKind::Mass
    } else if VOLUME_UNITS.contains(unit) {
        UnitKind::Volume
    } else if PIECE_UNITS.contains(unit) || unit.ends_with('s') || unit == "whole" {
        UnitKind::Piece
    } else {
        // lenient default for unrecognized words such as "large" or "pinch"
        UnitKind::Piece
    }
}

pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    let Some(captures) = INGREDIENT_LINE_RE.captures(line) else {
        return ParsedIngredient::unquantified(line);
    };

    let Some(value) = parse_quantity_lenient(&captures["qty"]) else {
        return ParsedIngredient::unquantified(line);
    };

    let unit = captures
        .name("unit")
        .map(|unit| unit.as_str().to_lowercase())
        .unwrap_or_default();
    let name = captures["name"].trim().to_string();

    let amount = match classify_unit(&unit) {
        UnitKind::Mass => ParsedAmount::Mass { value, unit },
        UnitKind::Volume => ParsedAmount::Volume { value, unit },
        UnitKind::Piece => ParsedAmount::Pieces {
            count: value,
            unit: (!unit.is_empty()).then_some(unit),
        },
    };

    ParsedIngredient {
        name,
        amount: Some(amount),
    }
}

fn grams_per_mass_unit(unit: &str) -> f64 {
    match unit {
        "kg" | "kilogram" | "kilograms" => 1000.0,
        "mg" => 0.001,
        "lb" | "pound" | "pounds" => 453.592,
        "oz" | "ounce" | "ounces" => 28.3495,
        _ => 1.0,
    }
}

fn volume_unit(unit: &str) -> (Unit, f64) {
    match unit {
        "l" | "liter" | "liters" => (Unit::Milliliter, 1000.0),
        "cup" | "cups" | "c" => (Unit::Cup, 1.0),
        "tbsp" | "tablespoon" | "tablespoons" | "tb" => (Unit::Tablespoon, 1.0),
        "tsp" | "teaspoon" | "teaspoons" => (Unit::Teaspoon, 1.0),
        "pt" => (Unit::Pint, 1.0),
        _ => (Unit::Milliliter, 1.0),
    }
}

impl From<ParsedIngredient> for IngredientLine {
    fn from(parsed: ParsedIngredient) -> Self {
        let (quantity, unit) = match parsed.amount {
            Some(ParsedAmount::Mass { value, unit }) => {
                (Some(value * grams_per_mass_unit(&unit)), Unit::Gram)
            }
            Some(ParsedAmount::Volume { value, unit }) => {
                let (unit, factor) = volume_unit(&unit);
                (Some(value * factor), unit)
            }
            Some(ParsedAmount::Pieces { count, .. }) => (Some(count), Unit::Piece),
            None => (None, Unit::Piece),
        };
        IngredientLine::new(parsed.name, quantity, unit)
    }
}
