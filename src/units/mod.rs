//! Measurement units
//!
//! The closed set of units an ingredient can be measured in, their
//! classification, and the nutrient-basis rules.

mod convert;

pub use convert::{convert, Converted};

use serde::{Deserialize, Serialize};

/// A measurement unit for ingredient quantities
///
/// Labels follow the catalog's display language (pt-BR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    G,
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "l")]
    L,
    #[serde(rename = "unidade")]
    Unidade,
    #[serde(rename = "xícara")]
    Xicara,
    #[serde(rename = "colher de sopa")]
    ColherSopa,
    #[serde(rename = "colher de chá")]
    ColherCha,
    #[serde(rename = "fatia")]
    Fatia,
    #[serde(rename = "pedaço")]
    Pedaco,
    #[serde(rename = "a gosto")]
    AGosto,
    #[serde(rename = "100g")]
    CemG,
    #[serde(rename = "100ml")]
    CemMl,
}

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// Weight/mass units (g, kg, 100g)
    Weight,
    /// Volume units (ml, l, 100ml)
    Volume,
    /// Count/discrete units (unidade, fatia, pedaço)
    Count,
    /// Household measures and free-form amounts (xícara, colher, a gosto)
    Other,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Unidade => "unidade",
            Unit::Xicara => "xícara",
            Unit::ColherSopa => "colher de sopa",
            Unit::ColherCha => "colher de chá",
            Unit::Fatia => "fatia",
            Unit::Pedaco => "pedaço",
            Unit::AGosto => "a gosto",
            Unit::CemG => "100g",
            Unit::CemMl => "100ml",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" => Some(Unit::G),
            "kg" => Some(Unit::Kg),
            "ml" => Some(Unit::Ml),
            "l" => Some(Unit::L),
            "unidade" => Some(Unit::Unidade),
            "xícara" | "xicara" => Some(Unit::Xicara),
            "colher de sopa" => Some(Unit::ColherSopa),
            "colher de chá" | "colher de cha" => Some(Unit::ColherCha),
            "fatia" => Some(Unit::Fatia),
            "pedaço" | "pedaco" => Some(Unit::Pedaco),
            "a gosto" => Some(Unit::AGosto),
            "100g" => Some(Unit::CemG),
            "100ml" => Some(Unit::CemMl),
            _ => None,
        }
    }

    /// Classify this unit for basis and consolidation decisions
    pub fn class(&self) -> UnitClass {
        match self {
            Unit::G | Unit::Kg | Unit::CemG => UnitClass::Weight,
            Unit::Ml | Unit::L | Unit::CemMl => UnitClass::Volume,
            Unit::Unidade | Unit::Fatia | Unit::Pedaco => UnitClass::Count,
            Unit::Xicara | Unit::ColherSopa | Unit::ColherCha | Unit::AGosto => UnitClass::Other,
        }
    }

    /// Whether nutrition values for this unit are declared per 100 g/ml
    ///
    /// Nutrition labels report values per 100 base units for weights and
    /// volumes; every other unit declares nutrition per single unit.
    pub fn per_hundred_basis(&self) -> bool {
        matches!(self, Unit::G | Unit::Ml | Unit::CemG | Unit::CemMl)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier to apply to an ingredient's declared nutrition for `quantity`
/// of that ingredient, honoring the per-100 basis of g/ml units
pub fn basis_multiplier(unit: Unit, quantity: f64) -> f64 {
    if unit.per_hundred_basis() {
        quantity / 100.0
    } else {
        quantity
    }
}

/// The unit a shopping list entry should consolidate under
///
/// Weights collapse to grams and volumes to milliliters whenever either the
/// ingredient's declared unit or the entry's current unit is in that class,
/// so mixed-unit entries for the same ingredient merge. Anything else keeps
/// the ingredient's declared unit.
pub fn target_unit(ingredient_unit: Unit, current_unit: Unit) -> Unit {
    if ingredient_unit.class() == UnitClass::Weight || current_unit.class() == UnitClass::Weight {
        Unit::G
    } else if ingredient_unit.class() == UnitClass::Volume
        || current_unit.class() == UnitClass::Volume
    {
        Unit::Ml
    } else {
        ingredient_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_weight_units() {
        assert_eq!(Unit::G.class(), UnitClass::Weight);
        assert_eq!(Unit::Kg.class(), UnitClass::Weight);
        assert_eq!(Unit::CemG.class(), UnitClass::Weight);
    }

    #[test]
    fn test_classify_volume_units() {
        assert_eq!(Unit::Ml.class(), UnitClass::Volume);
        assert_eq!(Unit::L.class(), UnitClass::Volume);
        assert_eq!(Unit::CemMl.class(), UnitClass::Volume);
    }

    #[test]
    fn test_classify_count_and_other_units() {
        assert_eq!(Unit::Unidade.class(), UnitClass::Count);
        assert_eq!(Unit::Fatia.class(), UnitClass::Count);
        assert_eq!(Unit::Pedaco.class(), UnitClass::Count);
        assert_eq!(Unit::Xicara.class(), UnitClass::Other);
        assert_eq!(Unit::ColherSopa.class(), UnitClass::Other);
        assert_eq!(Unit::AGosto.class(), UnitClass::Other);
    }

    #[test]
    fn test_per_hundred_basis() {
        assert!(Unit::G.per_hundred_basis());
        assert!(Unit::Ml.per_hundred_basis());
        assert!(Unit::CemG.per_hundred_basis());
        assert!(Unit::CemMl.per_hundred_basis());
        assert!(!Unit::Kg.per_hundred_basis());
        assert!(!Unit::Unidade.per_hundred_basis());
        assert!(!Unit::Xicara.per_hundred_basis());
    }

    #[test]
    fn test_basis_multiplier_per_hundred() {
        // 250g of an ingredient declared per 100g scales by 2.5
        assert_eq!(basis_multiplier(Unit::G, 250.0), 2.5);
        // 100g is exactly the declared vector
        assert_eq!(basis_multiplier(Unit::G, 100.0), 1.0);
        assert_eq!(basis_multiplier(Unit::Ml, 50.0), 0.5);
    }

    #[test]
    fn test_basis_multiplier_per_unit() {
        // counted units scale one to one
        assert_eq!(basis_multiplier(Unit::Unidade, 3.0), 3.0);
        assert_eq!(basis_multiplier(Unit::Xicara, 2.0), 2.0);
        assert_eq!(basis_multiplier(Unit::Kg, 1.5), 1.5);
    }

    #[test]
    fn test_target_unit_weight_wins() {
        assert_eq!(target_unit(Unit::G, Unit::Kg), Unit::G);
        assert_eq!(target_unit(Unit::Kg, Unit::Kg), Unit::G);
        // current unit alone pulls the entry to grams
        assert_eq!(target_unit(Unit::Unidade, Unit::G), Unit::G);
    }

    #[test]
    fn test_target_unit_volume() {
        assert_eq!(target_unit(Unit::Ml, Unit::L), Unit::Ml);
        assert_eq!(target_unit(Unit::Unidade, Unit::CemMl), Unit::Ml);
    }

    #[test]
    fn test_target_unit_falls_back_to_ingredient_unit() {
        assert_eq!(target_unit(Unit::Unidade, Unit::Unidade), Unit::Unidade);
        assert_eq!(target_unit(Unit::Xicara, Unit::Fatia), Unit::Xicara);
    }

    #[test]
    fn test_unit_labels_round_trip() {
        for unit in [
            Unit::G,
            Unit::Kg,
            Unit::Ml,
            Unit::L,
            Unit::Unidade,
            Unit::Xicara,
            Unit::ColherSopa,
            Unit::ColherCha,
            Unit::Fatia,
            Unit::Pedaco,
            Unit::AGosto,
            Unit::CemG,
            Unit::CemMl,
        ] {
            assert_eq!(Unit::from_str(unit.as_str()), Some(unit));
        }
        assert_eq!(Unit::from_str("punhado"), None);
    }

    #[test]
    fn test_unit_serde_uses_catalog_labels() {
        assert_eq!(
            serde_json::to_string(&Unit::ColherSopa).unwrap(),
            "\"colher de sopa\""
        );
        assert_eq!(serde_json::to_string(&Unit::CemG).unwrap(), "\"100g\"");
        let unit: Unit = serde_json::from_str("\"xícara\"").unwrap();
        assert_eq!(unit, Unit::Xicara);
    }
}
