//! Recipe model
//!
//! Represents a recipe with cached nutritional information.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// An ingredient line in a recipe
///
/// `quantity` is expressed in the referenced ingredient's own unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: i64,
    pub quantity: f64,
}

/// A recipe with cached nutrition
///
/// Both cached vectors are derived: the roll-up engine recomputes them
/// whenever the line list or servings change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub instructions: String,
    pub servings: i32,
    pub lines: Vec<RecipeLine>,
    pub cached_total: Nutrition,
    pub cached_per_serving: Nutrition,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    pub lines: Vec<RecipeLine>,
}

fn default_servings() -> i32 {
    1
}

/// Data for updating a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<i32>,
}
