//! Quantity + unit to grams.
//!
//! Volumes go through milliliters and the ingredient density (g/mL), pieces
//! through the weight per piece. Anything that cannot be converted yields
//! `None`, never zero.

use tracing::warn;

use crate::types::{PhysicalProperties, Unit};

pub const TEASPOON_ML: f64 = 14.79;
/// Smaller than [`TEASPOON_ML`]. This is the value recorded in the source
/// ingredient data and is kept as is.
pub const TABLESPOON_ML: f64 = 3.552;
pub const CUP_ML: f64 = 236.588;

pub const FLUID_OUNCE_ML: f64 = 29.5735;
pub const PINT_ML: f64 = 473.176;
pub const QUART_ML: f64 = 946.353;
pub const GALLON_ML: f64 = 3785.41;

impl Unit {
    /// Milliliters in one of this unit, `None` for non-volume units.
    pub fn milliliters(&self) -> Option<f64> {
        match self {
            Unit::Teaspoon => Some(TEASPOON_ML),
            Unit::Tablespoon => Some(TABLESPOON_ML),
            Unit::Cup => Some(CUP_ML),
            Unit::Milliliter => Some(1.0),
            Unit::FluidOunce => Some(FLUID_OUNCE_ML),
            Unit::Pint => Some(PINT_ML),
            Unit::Quart => Some(QUART_ML),
            Unit::Gallon => Some(GALLON_ML),
            Unit::Gram | Unit::Piece | Unit::Other(_) => None,
        }
    }
}

pub struct UnitConverter;

impl UnitConverter {
    /// Mass in grams of `quantity` `unit` of `ingredient`.
    pub fn to_grams(
        ingredient: &str,
        quantity: f64,
        unit: &Unit,
        properties: PhysicalProperties,
    ) -> Option<f64> {
        match unit {
            Unit::Gram => Some(quantity),
            Unit::Piece => match properties.weight_per_piece {
                Some(weight) => Some(weight * quantity),
                None => {
                    warn!(ingredient, "no weight per piece, mass unknown");
                    None
                }
            },
            other => match other.milliliters() {
                Some(ml) => Self::volume_to_grams(ingredient, ml * quantity, properties.density),
                None => {
                    warn!(ingredient, unit = %other, "unrecognized unit, mass unknown");
                    None
                }
            },
        }
    }

    fn volume_to_grams(ingredient: &str, milliliters: f64, density: Option<f64>) -> Option<f64> {
        match density {
            Some(density) => Some(milliliters * density),
            None => {
                warn!(ingredient, "no density for volume unit, mass unknown");
                None
            }
        }
    }
}
