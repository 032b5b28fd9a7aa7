//! Planned item model
//!
//! Represents a single entry in a meal: either an ingredient quantity or a
//! number of recipe servings.

use serde::{Deserialize, Serialize};

/// What a planned item refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PlannedSource {
    Ingredient(i64),
    Recipe(i64),
}

/// A planned item inside a meal
///
/// For ingredient items `quantity` is in the ingredient's own unit; for
/// recipe items it is the number of servings consumed, possibly fractional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedItem {
    pub id: i64,
    pub source: PlannedSource,
    pub quantity: f64,
    pub display_name: Option<String>,
}
