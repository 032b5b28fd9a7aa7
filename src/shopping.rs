//! Shopping list consolidation
//!
//! Scans planned meals over a date range, expands recipes into their raw
//! ingredient quantities, normalizes units, and merges entries that share
//! an ingredient and resolved unit.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRead;
use crate::models::{DailyPlan, PlannedSource, UnitConversion};
use crate::units::{convert, target_unit, Unit};

/// Category assigned to ingredients without one
pub const DEFAULT_CATEGORY: &str = "Outros";

/// A consolidated shopping list entry
///
/// One entry exists per (ingredient, resolved unit) pair. `purchased` is
/// caller-managed state, always created false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub ingredient_id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub purchased: bool,
    pub category: String,
}

/// A raw (ingredient, quantity, unit) demand before consolidation
struct Demand {
    ingredient_id: i64,
    quantity: f64,
    unit: Unit,
}

/// Build a consolidated shopping list from the plans inside `[start, end]`
///
/// Recipe items expand to their per-serving ingredient amounts scaled by the
/// servings consumed. Entries that cannot be converted to their target unit
/// keep their original quantity and unit and consolidate under it, so no
/// demand is dropped or zeroed. Output order is not significant.
pub fn build_shopping_list<'a, C: CatalogRead>(
    plans: impl IntoIterator<Item = &'a DailyPlan>,
    start: NaiveDate,
    end: NaiveDate,
    catalog: &C,
    conversions: &[UnitConversion],
) -> Vec<ShoppingItem> {
    let mut demands = Vec::new();

    for plan in plans {
        if plan.date < start || plan.date > end {
            continue;
        }
        for meal in &plan.meals {
            for item in &meal.items {
                match item.source {
                    PlannedSource::Ingredient(id) => {
                        if let Some(ingredient) = catalog.ingredient(id) {
                            demands.push(Demand {
                                ingredient_id: id,
                                quantity: item.quantity,
                                unit: ingredient.unit,
                            });
                        }
                    }
                    PlannedSource::Recipe(id) => {
                        let Some(recipe) = catalog.recipe(id) else {
                            continue;
                        };
                        if recipe.servings <= 0 {
                            continue;
                        }
                        for line in &recipe.lines {
                            let Some(ingredient) = catalog.ingredient(line.ingredient_id) else {
                                continue;
                            };
                            demands.push(Demand {
                                ingredient_id: line.ingredient_id,
                                quantity: line.quantity / recipe.servings as f64 * item.quantity,
                                unit: ingredient.unit,
                            });
                        }
                    }
                }
            }
        }
    }

    consolidate(demands, catalog, conversions)
}

/// Merge demands into one entry per (ingredient, resolved unit)
fn consolidate<C: CatalogRead>(
    demands: Vec<Demand>,
    catalog: &C,
    conversions: &[UnitConversion],
) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index: HashMap<(i64, Unit), usize> = HashMap::new();

    for demand in demands {
        let Some(ingredient) = catalog.ingredient(demand.ingredient_id) else {
            continue;
        };
        let target = target_unit(ingredient.unit, demand.unit);
        let result = convert(
            demand.quantity,
            demand.unit,
            target,
            demand.ingredient_id,
            conversions,
        );

        // on failure `result` carries the original quantity and unit, which
        // consolidates the demand under its own unit instead of losing it
        match index.entry((demand.ingredient_id, result.unit)) {
            Entry::Occupied(entry) => {
                items[*entry.get()].quantity += result.quantity;
            }
            Entry::Vacant(entry) => {
                entry.insert(items.len());
                items.push(ShoppingItem {
                    ingredient_id: demand.ingredient_id,
                    name: ingredient.name.clone(),
                    quantity: result.quantity,
                    unit: result.unit,
                    purchased: false,
                    category: ingredient
                        .category
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                });
            }
        }
    }

    items
}
