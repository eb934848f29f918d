use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use macro_meal_maker_rs::catalog::{import_foods_csv, load_foods, save_foods, FoodCatalog};
use macro_meal_maker_rs::cli::{Cli, Command, SolverArg};
use macro_meal_maker_rs::composer::{ComposePolicy, Composer, MealStructure, RolePickMode};
use macro_meal_maker_rs::error::{PlanError, Result};
use macro_meal_maker_rs::interface::{
    collect_macro_target, customize_meal_structure, display_categories, display_daily_plan,
    display_food_list,
};
use macro_meal_maker_rs::models::MacroTarget;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan {
            carbs,
            protein,
            fat,
            solver,
            variety,
            customize,
            seed,
            json,
        } => cmd_plan(
            &cli.file, carbs, protein, fat, solver, variety, customize, seed, json,
        ),
        Command::Categories => cmd_categories(&cli.file),
        Command::Foods { category } => cmd_foods(&cli.file, category.as_deref()),
        Command::Import { path } => cmd_import(&cli.file, &path),
    }
}

fn load_catalog(file_path: &str) -> Result<Option<FoodCatalog>> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Food catalog file not found: {}", file_path);
        eprintln!("Use 'import <csv>' to build one from a nutrient export.");
        return Ok(None);
    }

    let foods = load_foods(path)?;
    Ok(Some(FoodCatalog::new(foods)))
}

/// Compose and display a daily meal plan.
#[allow(clippy::too_many_arguments)]
fn cmd_plan(
    file_path: &str,
    carbs: Option<f64>,
    protein: Option<f64>,
    fat: Option<f64>,
    solver: SolverArg,
    variety: bool,
    customize: bool,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let Some(catalog) = load_catalog(file_path)? else {
        return Ok(());
    };

    println!("Loaded {} foods in {} categories", catalog.len(), catalog.categories().len());

    // Flag-provided targets skip the prompts entirely.
    let target = match (carbs, protein, fat) {
        (Some(c), Some(p), Some(f)) => MacroTarget::new(c, p, f),
        _ => collect_macro_target()?,
    };

    let mut policy = match solver {
        SolverArg::Gradient => ComposePolicy::default(),
        SolverArg::Exact => ComposePolicy::exact(),
    };
    if variety {
        policy.role_pick = RolePickMode::VarietyWeighted;
    }

    let structure = if customize {
        customize_meal_structure(&catalog)?
    } else {
        match solver {
            SolverArg::Gradient => MealStructure::flexible(),
            SolverArg::Exact => MealStructure::three_ingredient(),
        }
    };

    println!();
    println!("Planning for {}...", target);

    let mut composer = match seed {
        Some(seed) => Composer::seeded(&catalog, policy, seed),
        None => Composer::new(&catalog, policy),
    };

    let plan = composer.compose(target, &structure)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_daily_plan(&plan);
    }

    Ok(())
}

/// List the catalog's categories.
fn cmd_categories(file_path: &str) -> Result<()> {
    let Some(catalog) = load_catalog(file_path)? else {
        return Ok(());
    };

    display_categories(&catalog.categories());
    Ok(())
}

/// List foods, optionally restricted to one category.
fn cmd_foods(file_path: &str, category: Option<&str>) -> Result<()> {
    let Some(catalog) = load_catalog(file_path)? else {
        return Ok(());
    };

    match category {
        Some(category) => {
            if !catalog.has_category(category) {
                return Err(PlanError::CategoryNotFound(category.to_string()));
            }
            let foods = catalog.foods_in_categories(&[category.to_string()]);
            display_food_list(&foods, category);
        }
        None => {
            let mut foods = catalog.all_foods();
            foods.sort_by(|a, b| a.name.cmp(&b.name));
            display_food_list(&foods, "All foods");
        }
    }

    Ok(())
}

/// Import a nutrient CSV export into the catalog file.
fn cmd_import(file_path: &str, csv_path: &str) -> Result<()> {
    let foods = import_foods_csv(csv_path)?;

    if foods.is_empty() {
        println!("No valid foods found in {}", csv_path);
        return Ok(());
    }

    save_foods(file_path, &foods)?;
    println!("Imported {} foods into {}", foods.len(), file_path);

    Ok(())
}
