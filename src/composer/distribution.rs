use crate::models::{MacroTarget, MealType};

/// Share of each daily macro assigned to each meal.
///
/// Carbs lean toward breakfast less than protein and fat lean toward
/// dinner; the three shares per axis sum to 1.0.
const BREAKFAST_SHARES: (f64, f64, f64) = (0.30, 0.25, 0.25);
const LUNCH_SHARES: (f64, f64, f64) = (0.35, 0.35, 0.35);
const DINNER_SHARES: (f64, f64, f64) = (0.35, 0.40, 0.40);

/// Per-meal macro targets for one day.
#[derive(Debug, Clone, Copy)]
pub struct MealTargets {
    pub breakfast: MacroTarget,
    pub lunch: MacroTarget,
    pub dinner: MacroTarget,
}

impl MealTargets {
    pub fn for_meal(&self, meal_type: MealType) -> MacroTarget {
        match meal_type {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }
}

/// Split a daily macro target into three per-meal targets using fixed
/// percentage weights. Pure function; the split is computed once up front
/// against the full daily target, never against a shrinking remainder.
pub fn distribute_across_meals(daily: MacroTarget) -> MealTargets {
    MealTargets {
        breakfast: daily.scaled_per_axis(BREAKFAST_SHARES.0, BREAKFAST_SHARES.1, BREAKFAST_SHARES.2),
        lunch: daily.scaled_per_axis(LUNCH_SHARES.0, LUNCH_SHARES.1, LUNCH_SHARES.2),
        dinner: daily.scaled_per_axis(DINNER_SHARES.0, DINNER_SHARES.1, DINNER_SHARES.2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_sum_to_daily_target() {
        let daily = MacroTarget::new(200.0, 150.0, 65.0);
        let targets = distribute_across_meals(daily);

        let mut total = MacroTarget::zero();
        total.add(targets.breakfast);
        total.add(targets.lunch);
        total.add(targets.dinner);

        assert!((total.carbs - daily.carbs).abs() < 1e-9);
        assert!((total.protein - daily.protein).abs() < 1e-9);
        assert!((total.fat - daily.fat).abs() < 1e-9);
    }

    #[test]
    fn test_breakfast_carb_lean() {
        let daily = MacroTarget::new(200.0, 150.0, 65.0);
        let targets = distribute_across_meals(daily);

        assert!((targets.breakfast.carbs - 60.0).abs() < 1e-9);
        assert!((targets.breakfast.protein - 37.5).abs() < 1e-9);
        assert!((targets.dinner.protein - 60.0).abs() < 1e-9);
        assert!((targets.dinner.fat - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_target_distributes_to_zero() {
        let targets = distribute_across_meals(MacroTarget::zero());
        assert_eq!(targets.lunch, MacroTarget::zero());
    }
}
