//! In-memory catalog and planning session
//!
//! Owns the ingredient/recipe catalogs, the user conversion table, and the
//! daily plans of one session. All mutation goes through here so cached
//! nutrition totals are recomputed eagerly, strictly bottom-up: recipe
//! caches before the plans that consume them, meal caches before the owning
//! plan's total. Persistence is the caller's concern; this type only has to
//! reflect the latest committed writes before a computation starts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    DailyPlan, Ingredient, IngredientCreate, IngredientUpdate, MealType, Nutrition, PlannedItem,
    PlannedSource, Recipe, RecipeCreate, RecipeLine, RecipeUpdate, UnitConversion,
    UnitConversionCreate,
};
use crate::rollup;
use crate::shopping::{self, ShoppingItem};

/// Read-only lookup seam consumed by the roll-up and shopping engines
pub trait CatalogRead {
    fn ingredient(&self, id: i64) -> Option<&Ingredient>;
    fn recipe(&self, id: i64) -> Option<&Recipe>;
}

/// Catalog error types
///
/// Only mutations that reference another entity can fail; references left
/// dangling by later deletions are tolerated by every computation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(i64),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(i64),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A planning session's catalogs and daily plans
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    ingredients: BTreeMap<i64, Ingredient>,
    recipes: BTreeMap<i64, Recipe>,
    conversions: Vec<UnitConversion>,
    plans: BTreeMap<NaiveDate, DailyPlan>,
    next_id: i64,
}

impl CatalogRead for Catalog {
    fn ingredient(&self, id: i64) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.recipes.get(&id)
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // Ingredients
    // ------------------------------------------------------------------

    /// Add an ingredient, returning its id
    pub fn add_ingredient(&mut self, data: IngredientCreate) -> i64 {
        let id = self.alloc_id();
        self.ingredients.insert(
            id,
            Ingredient {
                id,
                name: data.name,
                unit: data.unit,
                nutrition: Nutrition {
                    energy: data.energy,
                    protein: data.protein,
                    carbs: data.carbs,
                    fat: data.fat,
                    cholesterol: data.cholesterol,
                    fiber: data.fiber,
                },
                category: data.category,
                brand: data.brand,
                price: data.price,
            },
        );
        id
    }

    /// Update an ingredient and recompute everything that depends on it
    pub fn update_ingredient(&mut self, id: i64, data: &IngredientUpdate) -> CatalogResult<()> {
        let ingredient = self
            .ingredients
            .get_mut(&id)
            .ok_or(CatalogError::UnknownIngredient(id))?;

        if let Some(ref name) = data.name {
            ingredient.name = name.clone();
        }
        if let Some(unit) = data.unit {
            ingredient.unit = unit;
        }
        if let Some(energy) = data.energy {
            ingredient.nutrition.energy = energy;
        }
        if let Some(protein) = data.protein {
            ingredient.nutrition.protein = protein;
        }
        if let Some(carbs) = data.carbs {
            ingredient.nutrition.carbs = carbs;
        }
        if let Some(fat) = data.fat {
            ingredient.nutrition.fat = fat;
        }
        if let Some(cholesterol) = data.cholesterol {
            ingredient.nutrition.cholesterol = cholesterol;
        }
        if let Some(fiber) = data.fiber {
            ingredient.nutrition.fiber = fiber;
        }
        if let Some(ref category) = data.category {
            ingredient.category = Some(category.clone());
        }
        if let Some(ref brand) = data.brand {
            ingredient.brand = Some(brand.clone());
        }
        if let Some(price) = data.price {
            ingredient.price = Some(price);
        }

        self.cascade_from_ingredient(id);
        Ok(())
    }

    /// Remove an ingredient
    ///
    /// Recipe lines and planned items keep their now-dangling reference and
    /// contribute zero from here on; affected caches are recomputed.
    pub fn remove_ingredient(&mut self, id: i64) -> bool {
        if self.ingredients.remove(&id).is_none() {
            return false;
        }
        self.cascade_from_ingredient(id);
        true
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    /// Add a recipe, returning its id
    ///
    /// Every line must reference an existing ingredient at creation time.
    pub fn add_recipe(&mut self, data: RecipeCreate) -> CatalogResult<i64> {
        for line in &data.lines {
            if !self.ingredients.contains_key(&line.ingredient_id) {
                return Err(CatalogError::UnknownIngredient(line.ingredient_id));
            }
        }

        let id = self.alloc_id();
        self.recipes.insert(
            id,
            Recipe {
                id,
                name: data.name,
                instructions: data.instructions,
                servings: data.servings,
                lines: data.lines,
                cached_total: Nutrition::zero(),
                cached_per_serving: Nutrition::zero(),
            },
        );
        self.refresh_recipe(id);
        Ok(id)
    }

    /// Update a recipe's metadata and recompute its caches and dependents
    pub fn update_recipe(&mut self, id: i64, data: &RecipeUpdate) -> CatalogResult<()> {
        let recipe = self
            .recipes
            .get_mut(&id)
            .ok_or(CatalogError::UnknownRecipe(id))?;

        if let Some(ref name) = data.name {
            recipe.name = name.clone();
        }
        if let Some(ref instructions) = data.instructions {
            recipe.instructions = instructions.clone();
        }
        if let Some(servings) = data.servings {
            recipe.servings = servings;
        }

        self.refresh_recipe(id);
        self.refresh_plans_for_recipe(id);
        Ok(())
    }

    /// Append an ingredient line to a recipe
    pub fn add_recipe_line(&mut self, recipe_id: i64, line: RecipeLine) -> CatalogResult<()> {
        if !self.ingredients.contains_key(&line.ingredient_id) {
            return Err(CatalogError::UnknownIngredient(line.ingredient_id));
        }
        let recipe = self
            .recipes
            .get_mut(&recipe_id)
            .ok_or(CatalogError::UnknownRecipe(recipe_id))?;

        recipe.lines.push(line);
        self.refresh_recipe(recipe_id);
        self.refresh_plans_for_recipe(recipe_id);
        Ok(())
    }

    /// Remove a recipe line by position
    pub fn remove_recipe_line(&mut self, recipe_id: i64, index: usize) -> CatalogResult<bool> {
        let recipe = self
            .recipes
            .get_mut(&recipe_id)
            .ok_or(CatalogError::UnknownRecipe(recipe_id))?;

        if index >= recipe.lines.len() {
            return Ok(false);
        }
        recipe.lines.remove(index);
        self.refresh_recipe(recipe_id);
        self.refresh_plans_for_recipe(recipe_id);
        Ok(true)
    }

    /// Remove a recipe
    ///
    /// Planned items referencing it become dangling and contribute zero.
    pub fn remove_recipe(&mut self, id: i64) -> bool {
        if self.recipes.remove(&id).is_none() {
            return false;
        }
        self.refresh_plans_for_recipe(id);
        true
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    // ------------------------------------------------------------------
    // Unit conversions
    // ------------------------------------------------------------------

    /// Register a user-defined unit equivalence, returning its id
    pub fn add_conversion(&mut self, data: UnitConversionCreate) -> CatalogResult<i64> {
        if !self.ingredients.contains_key(&data.ingredient_id) {
            return Err(CatalogError::UnknownIngredient(data.ingredient_id));
        }
        let id = self.alloc_id();
        self.conversions.push(UnitConversion {
            id,
            ingredient_id: data.ingredient_id,
            unit_a: data.unit_a,
            quantity_a: data.quantity_a,
            unit_b: data.unit_b,
            quantity_b: data.quantity_b,
        });
        Ok(id)
    }

    pub fn remove_conversion(&mut self, id: i64) -> bool {
        let before = self.conversions.len();
        self.conversions.retain(|c| c.id != id);
        self.conversions.len() != before
    }

    pub fn conversions(&self) -> &[UnitConversion] {
        &self.conversions
    }

    pub fn conversions_for(&self, ingredient_id: i64) -> impl Iterator<Item = &UnitConversion> {
        self.conversions
            .iter()
            .filter(move |c| c.ingredient_id == ingredient_id)
    }

    // ------------------------------------------------------------------
    // Daily plans
    // ------------------------------------------------------------------

    pub fn plan(&self, date: NaiveDate) -> Option<&DailyPlan> {
        self.plans.get(&date)
    }

    /// Get the plan for a date, synthesizing an empty one on first access
    pub fn get_or_create_plan(&mut self, date: NaiveDate) -> &DailyPlan {
        self.plans.entry(date).or_insert_with(|| DailyPlan::new(date))
    }

    pub fn plans(&self) -> impl Iterator<Item = &DailyPlan> {
        self.plans.values()
    }

    /// Plans whose date falls inside `[start, end]`
    pub fn plans_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &DailyPlan> {
        self.plans.range(start..=end).map(|(_, plan)| plan)
    }

    /// Plan an item into a meal, returning the item's id
    pub fn add_planned_item(
        &mut self,
        date: NaiveDate,
        meal_type: MealType,
        source: PlannedSource,
        quantity: f64,
        display_name: Option<String>,
    ) -> CatalogResult<i64> {
        match source {
            PlannedSource::Ingredient(id) if !self.ingredients.contains_key(&id) => {
                return Err(CatalogError::UnknownIngredient(id));
            }
            PlannedSource::Recipe(id) if !self.recipes.contains_key(&id) => {
                return Err(CatalogError::UnknownRecipe(id));
            }
            _ => {}
        }

        let id = self.alloc_id();
        let plan = self.plans.entry(date).or_insert_with(|| DailyPlan::new(date));
        plan.meal_mut(meal_type).items.push(PlannedItem {
            id,
            source,
            quantity,
            display_name,
        });
        self.refresh_plan(date);
        Ok(id)
    }

    /// Change a planned item's quantity
    pub fn set_item_quantity(&mut self, date: NaiveDate, item_id: i64, quantity: f64) -> bool {
        let Some(plan) = self.plans.get_mut(&date) else {
            return false;
        };
        let mut found = false;
        for meal in &mut plan.meals {
            if let Some(item) = meal.items.iter_mut().find(|item| item.id == item_id) {
                item.quantity = quantity;
                found = true;
                break;
            }
        }
        if found {
            self.refresh_plan(date);
        }
        found
    }

    /// Remove a planned item from whichever meal holds it
    pub fn remove_planned_item(&mut self, date: NaiveDate, item_id: i64) -> bool {
        let Some(plan) = self.plans.get_mut(&date) else {
            return false;
        };
        let mut found = false;
        for meal in &mut plan.meals {
            let before = meal.items.len();
            meal.items.retain(|item| item.id != item_id);
            if meal.items.len() != before {
                found = true;
                break;
            }
        }
        if found {
            self.refresh_plan(date);
        }
        found
    }

    /// Consolidated shopping list for the plans inside `[start, end]`
    pub fn shopping_list(&self, start: NaiveDate, end: NaiveDate) -> Vec<ShoppingItem> {
        shopping::build_shopping_list(self.plans.values(), start, end, self, &self.conversions)
    }

    // ------------------------------------------------------------------
    // Cache maintenance
    // ------------------------------------------------------------------

    /// Recompute a recipe's cached totals from its lines
    fn refresh_recipe(&mut self, id: i64) {
        let (total, per_serving) = match self.recipes.get(&id) {
            Some(recipe) => {
                let total = rollup::recipe_total_nutrition(&recipe.lines, self);
                let per_serving = if recipe.servings > 0 {
                    total.scale(1.0 / recipe.servings as f64)
                } else {
                    Nutrition::zero()
                };
                (total, per_serving)
            }
            None => return,
        };
        if let Some(recipe) = self.recipes.get_mut(&id) {
            recipe.cached_total = total;
            recipe.cached_per_serving = per_serving;
        }
    }

    /// Recompute a plan's meal caches, then its own total
    fn refresh_plan(&mut self, date: NaiveDate) {
        let meal_totals: Vec<Nutrition> = match self.plans.get(&date) {
            Some(plan) => plan
                .meals
                .iter()
                .map(|meal| rollup::meal_nutrition(meal, self))
                .collect(),
            None => return,
        };
        let total: Nutrition = meal_totals.iter().cloned().sum();
        if let Some(plan) = self.plans.get_mut(&date) {
            for (meal, nutrition) in plan.meals.iter_mut().zip(meal_totals) {
                meal.cached_nutrition = nutrition;
            }
            plan.cached_nutrition = total;
        }
    }

    fn recipes_using_ingredient(&self, ingredient_id: i64) -> Vec<i64> {
        self.recipes
            .values()
            .filter(|recipe| recipe.lines.iter().any(|l| l.ingredient_id == ingredient_id))
            .map(|recipe| recipe.id)
            .collect()
    }

    fn plan_dates_referencing_recipe(&self, recipe_id: i64) -> Vec<NaiveDate> {
        self.plans
            .values()
            .filter(|plan| {
                plan.items()
                    .any(|item| item.source == PlannedSource::Recipe(recipe_id))
            })
            .map(|plan| plan.date)
            .collect()
    }

    fn plan_dates_referencing_ingredient(&self, ingredient_id: i64) -> Vec<NaiveDate> {
        self.plans
            .values()
            .filter(|plan| {
                plan.items()
                    .any(|item| item.source == PlannedSource::Ingredient(ingredient_id))
            })
            .map(|plan| plan.date)
            .collect()
    }

    fn refresh_plans_for_recipe(&mut self, recipe_id: i64) {
        for date in self.plan_dates_referencing_recipe(recipe_id) {
            self.refresh_plan(date);
        }
    }

    /// Recompute every recipe using an ingredient, then every affected plan
    fn cascade_from_ingredient(&mut self, ingredient_id: i64) {
        let recipe_ids = self.recipes_using_ingredient(ingredient_id);
        for id in &recipe_ids {
            self.refresh_recipe(*id);
        }

        let mut dates = self.plan_dates_referencing_ingredient(ingredient_id);
        for id in &recipe_ids {
            dates.extend(self.plan_dates_referencing_recipe(*id));
        }
        dates.sort();
        dates.dedup();
        for date in dates {
            self.refresh_plan(date);
        }
    }
}
