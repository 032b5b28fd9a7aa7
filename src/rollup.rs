//! Nutrient roll-up
//!
//! Pure bottom-up aggregation of nutrition totals: ingredient quantity ->
//! recipe -> planned item -> meal -> daily plan. Dangling references and
//! degenerate servings contribute zero instead of failing, so one bad item
//! never aborts a whole computation.

use crate::catalog::CatalogRead;
use crate::models::{DailyPlan, Meal, Nutrition, PlannedItem, PlannedSource, Recipe, RecipeLine};

/// Total nutrition of a set of recipe lines
///
/// Lines whose ingredient is missing from the catalog are skipped.
pub fn recipe_total_nutrition(lines: &[RecipeLine], catalog: &impl CatalogRead) -> Nutrition {
    lines
        .iter()
        .filter_map(|line| {
            catalog
                .ingredient(line.ingredient_id)
                .map(|ingredient| ingredient.nutrition_for(line.quantity))
        })
        .sum()
}

/// Per-serving nutrition of a recipe
///
/// Recipes with zero or negative servings yield the zero vector.
pub fn recipe_per_serving_nutrition(recipe: &Recipe, catalog: &impl CatalogRead) -> Nutrition {
    if recipe.servings <= 0 {
        return Nutrition::zero();
    }
    recipe_total_nutrition(&recipe.lines, catalog).scale(1.0 / recipe.servings as f64)
}

/// Nutrition contributed by one planned item
pub fn planned_item_nutrition(item: &PlannedItem, catalog: &impl CatalogRead) -> Nutrition {
    match item.source {
        PlannedSource::Ingredient(id) => catalog
            .ingredient(id)
            .map(|ingredient| ingredient.nutrition_for(item.quantity))
            .unwrap_or_else(Nutrition::zero),
        PlannedSource::Recipe(id) => match catalog.recipe(id) {
            // item.quantity is the number of servings consumed
            Some(recipe) => recipe_per_serving_nutrition(recipe, catalog).scale(item.quantity),
            None => Nutrition::zero(),
        },
    }
}

/// Total nutrition of a meal
pub fn meal_nutrition(meal: &Meal, catalog: &impl CatalogRead) -> Nutrition {
    meal.items
        .iter()
        .map(|item| planned_item_nutrition(item, catalog))
        .sum()
}

/// Total nutrition of a daily plan
pub fn daily_plan_nutrition(plan: &DailyPlan, catalog: &impl CatalogRead) -> Nutrition {
    plan.meals
        .iter()
        .map(|meal| meal_nutrition(meal, catalog))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{IngredientCreate, MealType, RecipeCreate};
    use crate::units::Unit;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ingredient(name: &str, unit: Unit, energy: f64, protein: f64) -> IngredientCreate {
        IngredientCreate {
            name: name.to_string(),
            unit,
            energy,
            protein,
            carbs: 0.0,
            fat: 0.0,
            cholesterol: 0.0,
            fiber: 0.0,
            category: None,
            brand: None,
            price: None,
        }
    }

    #[test]
    fn test_counted_ingredient_scales_per_unit() {
        let mut catalog = Catalog::new();
        let egg = catalog.add_ingredient(ingredient("Ovo", Unit::Unidade, 70.0, 6.0));

        let item = PlannedItem {
            id: 1,
            source: PlannedSource::Ingredient(egg),
            quantity: 3.0,
            display_name: None,
        };
        let n = planned_item_nutrition(&item, &catalog);
        assert_eq!(n.energy, 210.0);
        assert_eq!(n.protein, 18.0);
    }

    #[test]
    fn test_recipe_total_sums_basis_scaled_lines() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 130.0, 2.5));
        let egg = catalog.add_ingredient(ingredient("Ovo", Unit::Unidade, 70.0, 6.0));

        let lines = vec![
            RecipeLine {
                ingredient_id: rice,
                quantity: 200.0,
            },
            RecipeLine {
                ingredient_id: egg,
                quantity: 2.0,
            },
        ];
        let total = recipe_total_nutrition(&lines, &catalog);
        // 200g of per-100g rice plus 2 eggs
        assert_eq!(total.energy, 130.0 * 2.0 + 70.0 * 2.0);
        assert_eq!(total.protein, 2.5 * 2.0 + 6.0 * 2.0);
    }

    #[test]
    fn test_recipe_total_skips_dangling_lines() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 130.0, 2.5));

        let lines = vec![
            RecipeLine {
                ingredient_id: rice,
                quantity: 100.0,
            },
            RecipeLine {
                ingredient_id: 999,
                quantity: 100.0,
            },
        ];
        let total = recipe_total_nutrition(&lines, &catalog);
        assert_eq!(total.energy, 130.0);
    }

    #[test]
    fn test_per_serving_division() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 100.0, 0.0));
        let recipe_id = catalog
            .add_recipe(RecipeCreate {
                name: "Arroz de forno".to_string(),
                instructions: String::new(),
                servings: 4,
                lines: vec![RecipeLine {
                    ingredient_id: rice,
                    quantity: 800.0,
                }],
            })
            .unwrap();

        let recipe = catalog.recipe(recipe_id).unwrap();
        let per_serving = recipe_per_serving_nutrition(recipe, &catalog);
        assert_eq!(per_serving.energy, 200.0);
    }

    #[test]
    fn test_zero_servings_yields_zero_not_error() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 100.0, 0.0));
        let recipe_id = catalog
            .add_recipe(RecipeCreate {
                name: "Degenerada".to_string(),
                instructions: String::new(),
                servings: 0,
                lines: vec![RecipeLine {
                    ingredient_id: rice,
                    quantity: 800.0,
                }],
            })
            .unwrap();

        let recipe = catalog.recipe(recipe_id).unwrap();
        assert_eq!(recipe_per_serving_nutrition(recipe, &catalog), Nutrition::zero());

        let item = PlannedItem {
            id: 1,
            source: PlannedSource::Recipe(recipe_id),
            quantity: 2.0,
            display_name: None,
        };
        assert_eq!(planned_item_nutrition(&item, &catalog), Nutrition::zero());
    }

    #[test]
    fn test_fractional_recipe_servings() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 100.0, 0.0));
        let recipe_id = catalog
            .add_recipe(RecipeCreate {
                name: "Arroz de forno".to_string(),
                instructions: String::new(),
                servings: 4,
                lines: vec![RecipeLine {
                    ingredient_id: rice,
                    quantity: 800.0,
                }],
            })
            .unwrap();

        // half a serving of a 200 kcal/serving recipe
        let item = PlannedItem {
            id: 1,
            source: PlannedSource::Recipe(recipe_id),
            quantity: 0.5,
            display_name: None,
        };
        let n = planned_item_nutrition(&item, &catalog);
        assert_eq!(n.energy, 100.0);
    }

    #[test]
    fn test_dangling_references_contribute_zero() {
        let catalog = Catalog::new();
        let ghost_ingredient = PlannedItem {
            id: 1,
            source: PlannedSource::Ingredient(42),
            quantity: 3.0,
            display_name: None,
        };
        let ghost_recipe = PlannedItem {
            id: 2,
            source: PlannedSource::Recipe(42),
            quantity: 1.0,
            display_name: None,
        };
        assert_eq!(planned_item_nutrition(&ghost_ingredient, &catalog), Nutrition::zero());
        assert_eq!(planned_item_nutrition(&ghost_recipe, &catalog), Nutrition::zero());
    }

    #[test]
    fn test_roll_up_additivity() {
        let mut catalog = Catalog::new();
        let rice = catalog.add_ingredient(ingredient("Arroz", Unit::G, 130.0, 2.5));
        let egg = catalog.add_ingredient(ingredient("Ovo", Unit::Unidade, 70.0, 6.0));
        let recipe_id = catalog
            .add_recipe(RecipeCreate {
                name: "Omelete".to_string(),
                instructions: String::new(),
                servings: 2,
                lines: vec![RecipeLine {
                    ingredient_id: egg,
                    quantity: 4.0,
                }],
            })
            .unwrap();

        let day = date("2024-05-10");
        catalog
            .add_planned_item(day, MealType::Breakfast, PlannedSource::Ingredient(egg), 2.0, None)
            .unwrap();
        catalog
            .add_planned_item(day, MealType::Lunch, PlannedSource::Ingredient(rice), 150.0, None)
            .unwrap();
        catalog
            .add_planned_item(day, MealType::Lunch, PlannedSource::Recipe(recipe_id), 1.5, None)
            .unwrap();

        let plan = catalog.plan(day).unwrap();

        // daily total equals the sum of meal totals
        let from_meals: Nutrition = plan
            .meals
            .iter()
            .map(|meal| meal_nutrition(meal, &catalog))
            .sum();
        assert_eq!(daily_plan_nutrition(plan, &catalog), from_meals);

        // each meal total equals the sum of its items
        for meal in &plan.meals {
            let from_items: Nutrition = meal
                .items
                .iter()
                .map(|item| planned_item_nutrition(item, &catalog))
                .sum();
            assert_eq!(meal_nutrition(meal, &catalog), from_items);
        }

        // flattened leaf contributions match the roll-up
        let expected_energy = 70.0 * 2.0 + 130.0 * 1.5 + (70.0 * 4.0 / 2.0) * 1.5;
        assert!((daily_plan_nutrition(plan, &catalog).energy - expected_energy).abs() < 1e-9);
    }
}
