pub mod food;
pub mod macros;
pub mod meal;

pub use food::{Food, NutrientProfile};
pub use macros::{MacroAxis, MacroTarget};
pub use meal::{DailyPlan, FoodPortion, Meal, MealType};
