pub mod constants;
pub mod distribution;
pub mod policy;
pub mod selection;
pub mod solver;
pub mod structure;

pub use distribution::{distribute_across_meals, MealTargets};
pub use policy::{ComposePolicy, ToleranceTier};
pub use selection::{RolePickMode, UsageTracker};
pub use solver::PortionSolver;
pub use structure::{MealSlot, MealStructure, RoleSpec};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::catalog::FoodCatalog;
use crate::error::{PlanError, Result};
use crate::models::{DailyPlan, MacroTarget, Meal, MealType};

/// Composes a daily meal plan against a read-only food catalog.
///
/// One composer instance serves one composition request: it owns the
/// per-day food usage counters and a local random source, so concurrent
/// requests never interfere through shared state.
pub struct Composer<'a, R: Rng> {
    catalog: &'a FoodCatalog,
    policy: ComposePolicy,
    rng: R,
    usage: UsageTracker,
}

impl<'a> Composer<'a, StdRng> {
    pub fn new(catalog: &'a FoodCatalog, policy: ComposePolicy) -> Self {
        Self::with_rng(catalog, policy, StdRng::from_entropy())
    }

    /// A composer with a fixed seed, for reproducible plans.
    pub fn seeded(catalog: &'a FoodCatalog, policy: ComposePolicy, seed: u64) -> Self {
        Self::with_rng(catalog, policy, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> Composer<'a, R> {
    /// A composer with an injected random source.
    pub fn with_rng(catalog: &'a FoodCatalog, policy: ComposePolicy, rng: R) -> Self {
        Self {
            catalog,
            policy,
            rng,
            usage: UsageTracker::new(),
        }
    }

    /// Compose a full daily plan: three meals whose macros sum to the
    /// daily target within tolerance.
    ///
    /// All-or-nothing: the first meal that exhausts its attempt budget
    /// aborts the whole composition, and the error names that meal and
    /// its category set.
    pub fn compose(&mut self, target: MacroTarget, structure: &MealStructure) -> Result<DailyPlan> {
        structure.resolve_against(self.catalog)?;
        self.check_solver_arity(structure)?;

        let meal_targets = distribute_across_meals(target);
        info!(%target, "composing daily plan");

        let breakfast = self.compose_slot(structure, MealType::Breakfast, &meal_targets)?;
        let lunch = self.compose_slot(structure, MealType::Lunch, &meal_targets)?;
        let dinner = self.compose_slot(structure, MealType::Dinner, &meal_targets)?;

        let plan = DailyPlan::new(breakfast, lunch, dinner, target);
        info!(actual = %plan.actual_macros, "daily plan composed");
        Ok(plan)
    }

    fn compose_slot(
        &mut self,
        structure: &MealStructure,
        meal_type: MealType,
        meal_targets: &MealTargets,
    ) -> Result<Meal> {
        let slot = structure
            .slot(meal_type)
            .ok_or_else(|| PlanError::InvalidInput(format!("missing {} slot", meal_type)))?;
        self.compose_meal(meal_type, slot, meal_targets.for_meal(meal_type))
    }

    /// The exact solver needs a 3x3 system: exactly three foods per meal.
    fn check_solver_arity(&self, structure: &MealStructure) -> Result<()> {
        if self.policy.solver != PortionSolver::ExactLinear {
            return Ok(());
        }

        for meal_type in MealType::ALL {
            let food_count = match structure.slot(meal_type) {
                Some(MealSlot::Categories(categories)) => categories.len(),
                Some(MealSlot::Roles(roles)) => roles.len(),
                None => continue, // caught by resolve_against
            };

            if food_count != 3 {
                return Err(PlanError::InvalidInput(format!(
                    "exact solver requires exactly 3 food categories per meal; {} has {}",
                    meal_type, food_count
                )));
            }
        }

        Ok(())
    }

    fn compose_meal(
        &mut self,
        meal_type: MealType,
        slot: &MealSlot,
        target: MacroTarget,
    ) -> Result<Meal> {
        debug!(%meal_type, %target, "starting meal composition");

        for attempt in 0..self.policy.max_attempts {
            let tier = self.policy.tier_for_attempt(attempt);
            debug!(%meal_type, attempt = attempt + 1, %tier, "attempt");

            if let Some(meal) = self.attempt_meal(meal_type, slot, target, tier)? {
                info!(%meal_type, attempt = attempt + 1, %tier, "meal composed");
                return Ok(self.accept(meal));
            }
        }

        // One final attempt at the widest tolerance tier.
        debug!(%meal_type, "last-resort attempt");
        if let Some(meal) = self.attempt_meal(meal_type, slot, target, ToleranceTier::LastResort)? {
            info!(%meal_type, tier = %ToleranceTier::LastResort, "meal composed");
            return Ok(self.accept(meal));
        }

        Err(PlanError::CompositionFailed {
            meal: meal_type.to_string(),
            categories: slot.all_categories().join(", "),
        })
    }

    /// One selection + optimization round. `Ok(None)` is a tolerance miss
    /// or singular system: ordinary control flow, retried by the caller.
    fn attempt_meal(
        &mut self,
        meal_type: MealType,
        slot: &MealSlot,
        target: MacroTarget,
        tier: ToleranceTier,
    ) -> Result<Option<Meal>> {
        let catalog = self.catalog;
        let mut portions = match slot {
            MealSlot::Categories(categories) => {
                selection::select_exact(catalog, categories, meal_type, &mut self.rng)?
            }
            MealSlot::Roles(roles) => selection::select_roles(
                catalog,
                roles,
                target,
                &self.usage,
                self.policy.role_pick,
                meal_type,
                &mut self.rng,
            )?,
        };

        let coefficients: Vec<[f64; 3]> = portions
            .iter()
            .map(|p| p.food.profile().coefficients())
            .collect();

        let tolerance = self.policy.tolerance_for(tier);
        let Some(solution) = self.policy.solver.optimize(&coefficients, target, tolerance) else {
            return Ok(None);
        };

        for (portion, grams) in portions.iter_mut().zip(&solution) {
            portion.grams = *grams;
        }

        let mut macros = MacroTarget::zero();
        for portion in &portions {
            macros.add(portion.macros());
        }

        Ok(Some(Meal::new(portions, macros)))
    }

    fn accept(&mut self, meal: Meal) -> Meal {
        for portion in &meal.food_portions {
            self.usage.record(&portion.food);
        }
        meal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;

    fn food(name: &str, category: &str, carbs: f64, protein: f64, fat: f64) -> Food {
        Food {
            name: name.to_string(),
            category: category.to_string(),
            carbs: Some(carbs),
            protein: Some(protein),
            fat: Some(fat),
        }
    }

    fn solvable_catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            food("Rice", "Carb Sources", 75.0, 3.0, 1.0),
            food("Oats", "Carb Sources", 66.0, 13.0, 7.0),
            food("Chicken Breast", "Protein Sources", 0.0, 31.0, 3.6),
            food("Lean Beef", "Protein Sources", 0.0, 26.0, 10.0),
            food("Olive Oil", "Fat Sources", 0.0, 0.0, 100.0),
            food("Butter", "Fat Sources", 0.6, 0.9, 81.0),
        ])
    }

    fn simple_structure() -> MealStructure {
        let mut slots = std::collections::HashMap::new();
        for meal_type in MealType::ALL {
            slots.insert(
                meal_type,
                MealSlot::Roles(vec![
                    RoleSpec::new("carb", &["Carb Sources"]),
                    RoleSpec::new("protein", &["Protein Sources"]),
                    RoleSpec::new("fat", &["Fat Sources"]),
                ]),
            );
        }
        MealStructure::new(slots)
    }

    #[test]
    fn test_compose_meets_tolerance_per_meal() {
        let catalog = solvable_catalog();
        let policy = ComposePolicy::default();
        let widest = policy.widest_tolerance();
        let mut composer = Composer::seeded(&catalog, policy, 99);

        let target = MacroTarget::new(200.0, 150.0, 65.0);
        let plan = composer.compose(target, &simple_structure()).unwrap();

        let meal_targets = distribute_across_meals(target);
        for (meal_type, meal) in plan.meals() {
            assert!(
                meal.macros
                    .within_tolerance(meal_targets.for_meal(meal_type), widest),
                "{} outside widest tolerance: {} vs {}",
                meal_type,
                meal.macros,
                meal_targets.for_meal(meal_type)
            );
        }
    }

    #[test]
    fn test_portion_bounds_invariant() {
        let catalog = solvable_catalog();
        let mut composer = Composer::seeded(&catalog, ComposePolicy::default(), 7);

        let plan = composer
            .compose(MacroTarget::new(220.0, 140.0, 70.0), &simple_structure())
            .unwrap();

        for (_, meal) in plan.meals() {
            for portion in &meal.food_portions {
                assert!(portion.grams >= constants::MIN_PORTION_GRAMS);
                assert!(portion.grams <= constants::MAX_PORTION_GRAMS);
            }
        }
    }

    #[test]
    fn test_exact_solver_rejects_wrong_arity() {
        let catalog = solvable_catalog();
        let mut slots = std::collections::HashMap::new();
        for meal_type in MealType::ALL {
            slots.insert(
                meal_type,
                MealSlot::Categories(vec![
                    "Carb Sources".to_string(),
                    "Protein Sources".to_string(),
                ]),
            );
        }
        let structure = MealStructure::new(slots);

        let mut composer = Composer::seeded(&catalog, ComposePolicy::exact(), 1);
        let err = composer
            .compose(MacroTarget::new(200.0, 150.0, 65.0), &structure)
            .unwrap_err();

        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn test_usage_tracker_spans_meals() {
        let catalog = solvable_catalog();
        let policy = ComposePolicy {
            role_pick: RolePickMode::VarietyWeighted,
            ..ComposePolicy::default()
        };
        let mut composer = Composer::seeded(&catalog, policy, 3);

        composer
            .compose(MacroTarget::new(200.0, 150.0, 65.0), &simple_structure())
            .unwrap();

        // Three meals of three portions each were recorded.
        let total_uses: u32 = catalog
            .all_foods()
            .iter()
            .map(|f| composer.usage.times_used(f))
            .sum();
        assert_eq!(total_uses, 9);
    }
}
