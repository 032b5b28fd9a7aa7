//! Unit conversion
//!
//! Converts quantities between units via built-in mass/volume rules and
//! per-ingredient user-defined equivalences.

use crate::models::UnitConversion;

use super::Unit;

/// Outcome of a conversion attempt
///
/// When `converted` is false, `quantity` and `unit` carry the original
/// values unchanged so no data is lost downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted {
    pub quantity: f64,
    pub unit: Unit,
    pub converted: bool,
}

/// Built-in conversion factor between two units, if one exists
///
/// These are exact pairs, not a unit graph: metric mass and volume steps,
/// plus the 100g/100ml aliases which are quantity-equivalent to g/ml (only
/// their nutrient basis differs).
fn built_in_factor(from: Unit, to: Unit) -> Option<f64> {
    match (from, to) {
        (Unit::G, Unit::Kg) => Some(0.001),
        (Unit::Kg, Unit::G) => Some(1000.0),
        (Unit::Ml, Unit::L) => Some(0.001),
        (Unit::L, Unit::Ml) => Some(1000.0),
        (Unit::CemG, Unit::G) | (Unit::G, Unit::CemG) => Some(1.0),
        (Unit::CemMl, Unit::Ml) | (Unit::Ml, Unit::CemMl) => Some(1.0),
        _ => None,
    }
}

/// Convert `quantity` from one unit to another for a specific ingredient
///
/// Resolution order: identity, then built-in mass/volume rules, then the
/// user's per-ingredient equivalences (usable in either direction, first
/// match wins). When nothing applies the original quantity and unit are
/// returned with `converted: false`; a conversion is never invented.
pub fn convert(
    quantity: f64,
    from: Unit,
    to: Unit,
    ingredient_id: i64,
    conversions: &[UnitConversion],
) -> Converted {
    if from == to {
        return Converted {
            quantity,
            unit: to,
            converted: true,
        };
    }

    if let Some(factor) = built_in_factor(from, to) {
        return Converted {
            quantity: quantity * factor,
            unit: to,
            converted: true,
        };
    }

    for conversion in conversions.iter().filter(|c| c.ingredient_id == ingredient_id) {
        if conversion.unit_a == from && conversion.unit_b == to && conversion.quantity_a != 0.0 {
            return Converted {
                quantity: quantity * (conversion.quantity_b / conversion.quantity_a),
                unit: to,
                converted: true,
            };
        }
        if conversion.unit_b == from && conversion.unit_a == to && conversion.quantity_b != 0.0 {
            return Converted {
                quantity: quantity * (conversion.quantity_a / conversion.quantity_b),
                unit: to,
                converted: true,
            };
        }
    }

    tracing::warn!(
        "No conversion from '{}' to '{}' for ingredient {}. Keeping original unit.",
        from,
        to,
        ingredient_id
    );
    Converted {
        quantity,
        unit: from,
        converted: false,
    }
}
