use crate::models::{DailyPlan, Food, MacroTarget};

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "?".to_string(),
    }
}

/// Display a composed daily plan with per-meal portion tables and a
/// target-vs-actual summary.
pub fn display_daily_plan(plan: &DailyPlan) {
    println!();
    println!("=== Daily Meal Plan ===");

    for (meal_type, meal) in plan.meals() {
        println!();
        println!("--- {} ---", meal_type);

        let max_name_len = meal
            .food_portions
            .iter()
            .map(|p| p.food.name.len())
            .max()
            .unwrap_or(10);

        for portion in &meal.food_portions {
            println!(
                "  {:<width$}  {:>6.1} g",
                portion.food.name,
                portion.grams,
                width = max_name_len
            );
        }

        println!(
            "  {} ({:.0} g total)",
            meal.macros,
            meal.total_grams()
        );
    }

    println!();
    println!("--- Summary ---");
    print_macro_row("Target", plan.target_macros);
    print_macro_row("Actual", plan.actual_macros);

    let diff = plan.macro_differences();
    println!(
        "{:<8} {:>+8.1} {:>+8.1} {:>+8.1}",
        "Delta", diff.carbs, diff.protein, diff.fat
    );
    println!(
        "Total: {} foods, {:.0} g",
        plan.total_foods(),
        plan.total_grams()
    );
    println!();
}

fn print_macro_row(label: &str, macros: MacroTarget) {
    println!(
        "{:<8} {:>8.1} {:>8.1} {:>8.1}   (carbs / protein / fat, g)",
        label, macros.carbs, macros.protein, macros.fat
    );
}

/// Display a simple list of foods with their per-100g data.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  {} [{}] - C:{} P:{} F:{} per 100g",
            food.name,
            food.category,
            format_optional(food.carbs),
            format_optional(food.protein),
            format_optional(food.fat)
        );
    }

    println!();
}

/// Display the catalog's category names.
pub fn display_categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No categories in catalog.");
        return;
    }

    println!();
    println!("=== Categories ({}) ===", categories.len());
    for category in categories {
        println!("  {}", category);
    }
    println!();
}
