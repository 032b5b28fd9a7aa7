//! Meal model
//!
//! One of the four fixed meals of a daily plan, with its planned items and
//! cached nutrition total.

use serde::{Deserialize, Serialize};

use super::{Nutrition, PlannedItem};

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Every meal type, in display order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// A meal holding planned items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub meal_type: MealType,
    pub items: Vec<PlannedItem>,
    pub cached_nutrition: Nutrition,
}

impl Meal {
    /// Create an empty meal with zeroed cached nutrition
    pub fn empty(meal_type: MealType) -> Self {
        Self {
            meal_type,
            items: Vec::new(),
            cached_nutrition: Nutrition::zero(),
        }
    }
}
