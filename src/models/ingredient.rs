//! Ingredient model
//!
//! Represents a catalog ingredient with nutritional information.

use serde::{Deserialize, Serialize};

use crate::units::{basis_multiplier, Unit};

use super::Nutrition;

/// An ingredient with nutritional information
///
/// `nutrition` is declared per 100 g/ml when `unit` has the per-100 basis
/// (g, ml, 100g, 100ml) and per single unit otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub unit: Unit,
    pub nutrition: Nutrition,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
}

/// Data for creating a new ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: Unit,
    pub energy: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub cholesterol: f64,
    #[serde(default)]
    pub fiber: f64,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
}

/// Data for updating an ingredient
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub energy: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub fiber: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
}

impl Ingredient {
    /// Nutrition for `quantity` of this ingredient, in its own unit
    pub fn nutrition_for(&self, quantity: f64) -> Nutrition {
        self.nutrition.scale(basis_multiplier(self.unit, quantity))
    }
}
