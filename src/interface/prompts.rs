use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::catalog::FoodCatalog;
use crate::composer::{MealSlot, MealStructure};
use crate::error::{PlanError, Result};
use crate::models::{MacroTarget, MealType};

fn prompt_grams(label: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("Daily {} target in grams", label))
        .default(format!("{:.0}", default))
        .interact_text()?;

    let grams: f64 = input
        .parse()
        .map_err(|_| PlanError::InvalidInput("Invalid number".to_string()))?;

    if grams < 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "{} target must be non-negative",
            label
        )));
    }

    Ok(grams)
}

/// Collect the daily macro target interactively.
pub fn collect_macro_target() -> Result<MacroTarget> {
    let carbs = prompt_grams("carbohydrate", 200.0)?;
    let protein = prompt_grams("protein", 150.0)?;
    let fat = prompt_grams("fat", 65.0)?;
    Ok(MacroTarget::new(carbs, protein, fat))
}

/// Resolve a typed category name against the catalog with fuzzy matching.
///
/// Exact (case-insensitive) matches win; otherwise close names are
/// offered for confirmation or selection.
fn match_category(catalog: &FoodCatalog, input: &str) -> Result<Option<String>> {
    let known = catalog.categories();

    let exact = known
        .iter()
        .find(|c| c.to_lowercase() == input.to_lowercase());
    if let Some(category) = exact {
        return Ok(Some(category.clone()));
    }

    let mut candidates: Vec<(&String, f64)> = known
        .iter()
        .map(|c| (c, jaro_winkler(&c.to_lowercase(), &input.to_lowercase())))
        .filter(|(_, score)| *score > 0.7)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        println!("No matching category found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let category = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", category))
            .default(true)
            .interact()?;

        return Ok(confirm.then(|| category.clone()));
    }

    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|(c, _)| (*c).clone())
        .collect();

    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    Ok(options.get(selection).cloned())
}

/// Collect category names for one meal, at least one, empty entry to finish.
fn collect_meal_categories(catalog: &FoodCatalog, meal_type: MealType) -> Result<Vec<String>> {
    let mut categories = Vec::new();

    println!();
    println!("Categories for {} (press Enter on an empty line to finish):", meal_type);

    loop {
        let input: String = Input::new()
            .with_prompt("Category")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            if categories.is_empty() {
                println!("At least one category is required.");
                continue;
            }
            break;
        }

        if let Some(category) = match_category(catalog, input)? {
            println!("Added: {}", category);
            categories.push(category);
        }
    }

    Ok(categories)
}

/// Build a meal structure interactively, one flat category list per meal.
pub fn customize_meal_structure(catalog: &FoodCatalog) -> Result<MealStructure> {
    let mut slots = std::collections::HashMap::new();

    for meal_type in MealType::ALL {
        let categories = collect_meal_categories(catalog, meal_type)?;
        slots.insert(meal_type, MealSlot::Categories(categories));
    }

    Ok(MealStructure::new(slots))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
