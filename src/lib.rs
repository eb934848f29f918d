pub mod catalog;
pub mod cli;
pub mod composer;
pub mod error;
pub mod interface;
pub mod models;

pub use error::{PlanError, Result};
pub use models::{DailyPlan, Food, MacroTarget};
