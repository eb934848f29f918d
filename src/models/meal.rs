use serde::{Deserialize, Serialize};

use crate::models::{Food, MacroTarget};

/// The three meals of a daily plan, in composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        };
        write!(f, "{}", name)
    }
}

/// A gram quantity of a single food within a meal.
///
/// Grams start at a placeholder value from selection and are overwritten
/// by the portion solver, which owns the portions for the duration of its
/// run. Final values are rounded to one decimal place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPortion {
    pub food: Food,
    pub grams: f64,
}

impl FoodPortion {
    pub fn new(food: Food, grams: f64) -> Self {
        Self { food, grams }
    }

    /// Macro amounts contributed by this portion.
    pub fn macros(&self) -> MacroTarget {
        self.food.profile().amounts_for(self.grams)
    }
}

impl std::fmt::Display for FoodPortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}g of {}", self.grams, self.food.name)
    }
}

/// A composed meal: solved portions plus their achieved macro totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub food_portions: Vec<FoodPortion>,
    pub macros: MacroTarget,
}

impl Meal {
    pub fn new(food_portions: Vec<FoodPortion>, macros: MacroTarget) -> Self {
        Self {
            food_portions,
            macros,
        }
    }

    pub fn total_grams(&self) -> f64 {
        self.food_portions.iter().map(|p| p.grams).sum()
    }

    pub fn food_count(&self) -> usize {
        self.food_portions.len()
    }
}

/// A complete daily plan. Terminal output of composition: write-once.
///
/// `actual_macros` is the sum of the three meals' macros computed at
/// assembly; callers must not mutate meals afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub target_macros: MacroTarget,
    pub actual_macros: MacroTarget,
}

impl DailyPlan {
    pub fn new(breakfast: Meal, lunch: Meal, dinner: Meal, target_macros: MacroTarget) -> Self {
        let mut actual_macros = MacroTarget::zero();
        actual_macros.add(breakfast.macros);
        actual_macros.add(lunch.macros);
        actual_macros.add(dinner.macros);

        Self {
            breakfast,
            lunch,
            dinner,
            target_macros,
            actual_macros,
        }
    }

    pub fn meals(&self) -> [(MealType, &Meal); 3] {
        [
            (MealType::Breakfast, &self.breakfast),
            (MealType::Lunch, &self.lunch),
            (MealType::Dinner, &self.dinner),
        ]
    }

    pub fn within_tolerance(&self, tolerance_grams: f64) -> bool {
        self.actual_macros
            .within_tolerance(self.target_macros, tolerance_grams)
    }

    /// Per-axis actual minus target.
    pub fn macro_differences(&self) -> MacroTarget {
        self.actual_macros.minus(self.target_macros)
    }

    pub fn total_foods(&self) -> usize {
        self.breakfast.food_count() + self.lunch.food_count() + self.dinner.food_count()
    }

    pub fn total_grams(&self) -> f64 {
        self.breakfast.total_grams() + self.lunch.total_grams() + self.dinner.total_grams()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, carbs: f64, protein: f64, fat: f64) -> Food {
        Food {
            name: name.to_string(),
            category: "Test".to_string(),
            carbs: Some(carbs),
            protein: Some(protein),
            fat: Some(fat),
        }
    }

    fn meal_of(portions: Vec<FoodPortion>) -> Meal {
        let mut macros = MacroTarget::zero();
        for portion in &portions {
            macros.add(portion.macros());
        }
        Meal::new(portions, macros)
    }

    #[test]
    fn test_portion_macros() {
        let portion = FoodPortion::new(food("Rice", 80.0, 7.0, 1.0), 50.0);
        let macros = portion.macros();
        assert!((macros.carbs - 40.0).abs() < 1e-9);
        assert!((macros.protein - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_meal_totals() {
        let meal = meal_of(vec![
            FoodPortion::new(food("Rice", 80.0, 7.0, 1.0), 100.0),
            FoodPortion::new(food("Chicken", 0.0, 30.0, 3.0), 150.0),
        ]);
        assert_eq!(meal.food_count(), 2);
        assert!((meal.total_grams() - 250.0).abs() < 1e-9);
        assert!((meal.macros.protein - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_plan_actual_is_sum_of_meals() {
        let breakfast = meal_of(vec![FoodPortion::new(food("Oats", 60.0, 13.0, 7.0), 100.0)]);
        let lunch = meal_of(vec![FoodPortion::new(food("Chicken", 0.0, 30.0, 3.0), 200.0)]);
        let dinner = meal_of(vec![FoodPortion::new(food("Beef", 0.0, 26.0, 15.0), 100.0)]);

        let plan = DailyPlan::new(
            breakfast,
            lunch,
            dinner,
            MacroTarget::new(60.0, 99.0, 28.0),
        );

        assert!((plan.actual_macros.carbs - 60.0).abs() < 1e-9);
        assert!((plan.actual_macros.protein - 99.0).abs() < 1e-9);
        assert!((plan.actual_macros.fat - 28.0).abs() < 1e-9);
        assert!(plan.within_tolerance(0.01));
        assert_eq!(plan.total_foods(), 3);
    }

    #[test]
    fn test_macro_differences() {
        let meal = meal_of(vec![FoodPortion::new(food("Oats", 60.0, 13.0, 7.0), 100.0)]);
        let plan = DailyPlan::new(
            meal.clone(),
            meal.clone(),
            meal,
            MacroTarget::new(200.0, 39.0, 20.0),
        );

        let diff = plan.macro_differences();
        assert!((diff.carbs - -20.0).abs() < 1e-9);
        assert!((diff.protein - 0.0).abs() < 1e-9);
        assert!((diff.fat - 1.0).abs() < 1e-9);
    }
}
