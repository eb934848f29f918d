use std::collections::HashMap;

use crate::catalog::FoodCatalog;
use crate::error::{PlanError, Result};
use crate::models::MealType;

/// A named role within a meal, with the categories allowed to fill it.
///
/// Roles force variety: at least one selected food per role.
#[derive(Debug, Clone)]
pub struct RoleSpec {
    pub name: String,
    pub categories: Vec<String>,
}

impl RoleSpec {
    pub fn new(name: &str, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Category constraints for one meal.
#[derive(Debug, Clone)]
pub enum MealSlot {
    /// Exactly one food per category, in order. The shape the exact
    /// solver needs: three categories yield a 3×3 system.
    Categories(Vec<String>),

    /// One food per named role, each role drawing from its own allowed
    /// category subset.
    Roles(Vec<RoleSpec>),
}

impl MealSlot {
    /// Every category this slot may draw from.
    pub fn all_categories(&self) -> Vec<String> {
        match self {
            MealSlot::Categories(categories) => categories.clone(),
            MealSlot::Roles(roles) => roles
                .iter()
                .flat_map(|r| r.categories.iter().cloned())
                .collect(),
        }
    }
}

/// Per-meal category constraints for a daily plan.
#[derive(Debug, Clone)]
pub struct MealStructure {
    slots: HashMap<MealType, MealSlot>,
}

impl MealStructure {
    pub fn new(slots: HashMap<MealType, MealSlot>) -> Self {
        Self { slots }
    }

    pub fn slot(&self, meal_type: MealType) -> Option<&MealSlot> {
        self.slots.get(&meal_type)
    }

    /// The classic three-ingredient structure: one dairy, one fat, one
    /// produce or protein source per meal. Suits the exact solver.
    pub fn three_ingredient() -> Self {
        let mut slots = HashMap::new();
        slots.insert(
            MealType::Breakfast,
            MealSlot::Categories(vec![
                "Dairy and Egg Products".to_string(),
                "Fats and Oils".to_string(),
                "Fruits and Fruit Juices".to_string(),
            ]),
        );
        slots.insert(
            MealType::Lunch,
            MealSlot::Categories(vec![
                "Poultry Products".to_string(),
                "Fats and Oils".to_string(),
                "Vegetables and Vegetable Products".to_string(),
            ]),
        );
        slots.insert(
            MealType::Dinner,
            MealSlot::Categories(vec![
                "Beef Products".to_string(),
                "Fats and Oils".to_string(),
                "Vegetables and Vegetable Products".to_string(),
            ]),
        );
        Self { slots }
    }

    /// A wider role-based structure with 4-5 foods per meal. Suits the
    /// gradient-descent solver.
    pub fn flexible() -> Self {
        let mut slots = HashMap::new();
        slots.insert(
            MealType::Breakfast,
            MealSlot::Roles(vec![
                RoleSpec::new("dairy", &["Dairy and Egg Products"]),
                RoleSpec::new("grain", &["Cereal Grains and Pasta"]),
                RoleSpec::new("fruit", &["Fruits and Fruit Juices"]),
                RoleSpec::new("fat", &["Fats and Oils"]),
            ]),
        );
        slots.insert(
            MealType::Lunch,
            MealSlot::Roles(vec![
                RoleSpec::new("protein", &["Poultry Products"]),
                RoleSpec::new("vegetable", &["Vegetables and Vegetable Products"]),
                RoleSpec::new(
                    "legume",
                    &["Legumes and Legume Products", "Cereal Grains and Pasta"],
                ),
                RoleSpec::new("fat", &["Fats and Oils"]),
            ]),
        );
        slots.insert(
            MealType::Dinner,
            MealSlot::Roles(vec![
                RoleSpec::new("protein", &["Beef Products"]),
                RoleSpec::new("vegetable", &["Vegetables and Vegetable Products"]),
                RoleSpec::new("grain", &["Cereal Grains and Pasta"]),
                RoleSpec::new("fat", &["Fats and Oils", "Nut and Seed Products"]),
            ]),
        );
        Self { slots }
    }

    /// Verify every referenced category exists in the catalog.
    ///
    /// Unknown category names are hard failures, not retryable ones.
    pub fn resolve_against(&self, catalog: &FoodCatalog) -> Result<()> {
        if catalog.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }

        for meal_type in MealType::ALL {
            let Some(slot) = self.slot(meal_type) else {
                return Err(PlanError::InvalidInput(format!(
                    "meal structure is missing {}",
                    meal_type
                )));
            };

            for category in slot.all_categories() {
                if !catalog.has_category(&category) {
                    return Err(PlanError::CategoryNotFound(category));
                }
            }
        }

        Ok(())
    }
}
