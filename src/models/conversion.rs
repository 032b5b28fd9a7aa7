//! User-defined unit conversion model
//!
//! Per-ingredient equivalences like "1 unidade = 50 g", usable in either
//! direction.

use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// A user-defined equivalence between two units of one ingredient
///
/// Reads as "quantity_a of unit_a equals quantity_b of unit_b".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub id: i64,
    pub ingredient_id: i64,
    pub unit_a: Unit,
    pub quantity_a: f64,
    pub unit_b: Unit,
    pub quantity_b: f64,
}

/// Data for creating a unit conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConversionCreate {
    pub ingredient_id: i64,
    pub unit_a: Unit,
    pub quantity_a: f64,
    pub unit_b: Unit,
    pub quantity_b: f64,
}
