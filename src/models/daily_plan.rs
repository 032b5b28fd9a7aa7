//! Daily plan model
//!
//! Represents a calendar day with one meal per meal type and aggregated
//! nutrition totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Meal, MealType, Nutrition, PlannedItem};

/// A day's plan, always carrying all four meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    pub cached_nutrition: Nutrition,
}

impl DailyPlan {
    /// Create an empty plan for a date, with all meals present and zeroed
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: MealType::ALL.iter().map(|mt| Meal::empty(*mt)).collect(),
            cached_nutrition: Nutrition::zero(),
        }
    }

    /// Get the meal of a given type
    pub fn meal(&self, meal_type: MealType) -> Option<&Meal> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }

    /// Get the meal of a given type, materializing it if absent
    pub fn meal_mut(&mut self, meal_type: MealType) -> &mut Meal {
        let pos = match self.meals.iter().position(|m| m.meal_type == meal_type) {
            Some(pos) => pos,
            None => {
                self.meals.push(Meal::empty(meal_type));
                self.meals.len() - 1
            }
        };
        &mut self.meals[pos]
    }

    /// Iterate over every planned item across all meals
    pub fn items(&self) -> impl Iterator<Item = &PlannedItem> {
        self.meals.iter().flat_map(|m| m.items.iter())
    }

    /// Whether the plan holds no items at all
    pub fn is_empty(&self) -> bool {
        self.meals.iter().all(|m| m.items.is_empty())
    }
}
