use clap::{Parser, Subcommand, ValueEnum};

/// MacroMealMaker — composes daily meal plans matching a macronutrient target.
#[derive(Parser, Debug)]
#[command(name = "macro_meal_maker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog JSON file.
    #[arg(short, long, default_value = "food_catalog.json")]
    pub file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a daily meal plan for a macro target.
    Plan {
        /// Daily carbohydrate target in grams (prompted if omitted).
        #[arg(long)]
        carbs: Option<f64>,

        /// Daily protein target in grams (prompted if omitted).
        #[arg(long)]
        protein: Option<f64>,

        /// Daily fat target in grams (prompted if omitted).
        #[arg(long)]
        fat: Option<f64>,

        /// Portion-solving strategy.
        #[arg(long, value_enum, default_value_t = SolverArg::Gradient)]
        solver: SolverArg,

        /// Favor variety with weighted-random selection instead of
        /// best-fit (role-based structures only).
        #[arg(long)]
        variety: bool,

        /// Build the meal structure interactively instead of using the
        /// default for the chosen solver.
        #[arg(long)]
        customize: bool,

        /// Seed for reproducible food selection.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the plan as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the catalog's food categories.
    Categories,

    /// List foods, optionally restricted to one category.
    Foods {
        #[arg(long)]
        category: Option<String>,
    },

    /// Import foods from a nutrient CSV export into the catalog file.
    Import {
        /// CSV file with name,category,carbs_per_100g,protein_per_100g,fat_per_100g columns.
        path: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            carbs: None,
            protein: None,
            fat: None,
            solver: SolverArg::Gradient,
            variety: false,
            customize: false,
            seed: None,
            json: false,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverArg {
    /// Gradient descent over any number of foods per meal.
    Gradient,
    /// Exact 3x3 linear solve; requires three foods per meal.
    Exact,
}
