use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unknown food category: {0}")]
    CategoryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No foods with usable nutrient data in category '{category}' for {meal}")]
    DataGap { meal: String, category: String },

    #[error("Could not compose {meal} within tolerance from categories [{categories}]")]
    CompositionFailed { meal: String, categories: String },

    #[error("Food catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, PlanError>;
