use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::FoodCatalog;
use crate::composer::constants::{
    CLOSE_MATCH_WEIGHT, EXCEEDED_GAP_PENALTY, FEASIBILITY_MINOR_FRACTION,
    FEASIBILITY_OVERSHOOT_RATIO, GAP_OVERSHOOT_RATIO, MAX_SAMPLE_BATCHES,
    MISSING_CONTRIBUTION_WEIGHT, OVERSHOOT_PENALTY_WEIGHT, PLACEHOLDER_GRAMS, SAMPLE_BATCH_SIZE,
};
use crate::composer::structure::RoleSpec;
use crate::error::{PlanError, Result};
use crate::models::{Food, FoodPortion, MacroTarget, MealType, NutrientProfile};

/// How role-based selection picks within a role's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePickMode {
    /// Lowest gap-match score wins.
    BestFit,
    /// Weighted-random draw favoring less-used, feasible foods.
    VarietyWeighted,
}

/// Times each food has been used in the current day's plan.
///
/// Owned by one composition run and discarded with it; concurrent
/// requests never share counters.
#[derive(Debug, Default)]
pub struct UsageTracker {
    counts: HashMap<String, u32>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, food: &Food) {
        *self.counts.entry(food.key()).or_insert(0) += 1;
    }

    pub fn times_used(&self, food: &Food) -> u32 {
        self.counts.get(&food.key()).copied().unwrap_or(0)
    }

    /// Variety score: 1 for unused foods, shrinking with each reuse.
    pub fn variety_score(&self, food: &Food) -> f64 {
        1.0 / (self.times_used(food) as f64 + 1.0)
    }
}

/// How much a food can move the single largest remaining macro gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// The food carries none of the needed macro.
    CannotHelp,
    /// Per-100g amount is 3x the gap or more; gross overshoot.
    Overshoots,
    /// Some contribution, but under a quarter of the gap per 100g.
    MinorHelp,
    /// Meaningful progress without wild overshoot.
    GoodMatch,
}

impl Feasibility {
    pub fn weight(self) -> f64 {
        match self {
            Feasibility::CannotHelp => 0.0,
            Feasibility::Overshoots => 0.25,
            Feasibility::MinorHelp => 0.5,
            Feasibility::GoodMatch => 1.0,
        }
    }
}

/// Band a food against the largest positive gap axis.
pub fn classify_feasibility(profile: &NutrientProfile, gap: MacroTarget) -> Feasibility {
    let Some((axis, gap_amount)) = gap.largest_positive_axis() else {
        // Target already met everywhere; nothing can help.
        return Feasibility::CannotHelp;
    };

    let per_100g = profile.amounts_for(100.0).axis(axis);

    if per_100g <= 0.0 {
        Feasibility::CannotHelp
    } else if per_100g >= gap_amount * FEASIBILITY_OVERSHOOT_RATIO {
        Feasibility::Overshoots
    } else if per_100g < gap_amount * FEASIBILITY_MINOR_FRACTION {
        Feasibility::MinorHelp
    } else {
        Feasibility::GoodMatch
    }
}

/// Score a food against the current macro gap. Lower is better.
///
/// Per axis: adding to an already-exceeded macro is disqualifying;
/// overshooting a positive gap by more than 1.5x is penalized in
/// proportion to the food's amount; a close match is rewarded inversely
/// to its distance from the gap; contributing nothing to a needed macro
/// costs a small slice of the gap.
pub fn gap_match_score(profile: &NutrientProfile, gap: MacroTarget) -> f64 {
    let amounts = profile.amounts_for(100.0);
    let pairs = [
        (gap.carbs, amounts.carbs),
        (gap.protein, amounts.protein),
        (gap.fat, amounts.fat),
    ];

    let mut score = 0.0;

    for (gap_amount, food_amount) in pairs {
        if gap_amount < 0.0 && food_amount > 0.0 {
            return EXCEEDED_GAP_PENALTY;
        }

        if gap_amount > 0.0 {
            if food_amount > 0.0 {
                if food_amount <= gap_amount * GAP_OVERSHOOT_RATIO {
                    score += (gap_amount - food_amount).abs() * CLOSE_MATCH_WEIGHT;
                } else {
                    score += food_amount * OVERSHOOT_PENALTY_WEIGHT;
                }
            } else {
                score += gap_amount * MISSING_CONTRIBUTION_WEIGHT;
            }
        }
    }

    score
}

/// Exactly-N selection: one random usable food per category, in order.
///
/// Draws bounded sample batches per category; a category that yields no
/// usable food after the batch budget is a data gap.
pub fn select_exact<R: Rng>(
    catalog: &FoodCatalog,
    categories: &[String],
    meal_type: MealType,
    rng: &mut R,
) -> Result<Vec<FoodPortion>> {
    let mut portions = Vec::with_capacity(categories.len());

    for category in categories {
        let mut picked: Option<Food> = None;

        for _ in 0..MAX_SAMPLE_BATCHES {
            let batch = catalog.sample_in_category(rng, category, SAMPLE_BATCH_SIZE);
            let usable: Vec<&Food> = batch
                .into_iter()
                .filter(|f| f.has_usable_macros())
                .collect();

            if let Some(food) = usable.choose(rng) {
                picked = Some((*food).clone());
                break;
            }
        }

        let food = picked.ok_or_else(|| PlanError::DataGap {
            meal: meal_type.to_string(),
            category: category.clone(),
        })?;

        portions.push(FoodPortion::new(food, PLACEHOLDER_GRAMS));
    }

    Ok(portions)
}

/// Role-based selection: one food per role, scored against the macro gap
/// that remains as earlier roles are filled.
pub fn select_roles<R: Rng>(
    catalog: &FoodCatalog,
    roles: &[RoleSpec],
    target: MacroTarget,
    usage: &UsageTracker,
    mode: RolePickMode,
    meal_type: MealType,
    rng: &mut R,
) -> Result<Vec<FoodPortion>> {
    let mut portions = Vec::with_capacity(roles.len());
    let mut current = MacroTarget::zero();

    for role in roles {
        let mut candidates: Vec<&Food> = catalog
            .foods_in_categories(&role.categories)
            .into_iter()
            .filter(|f| f.has_usable_macros())
            .collect();

        // Stable order keeps seeded runs reproducible.
        candidates.sort_by(|a, b| a.name.cmp(&b.name));

        let gap = target.minus(current);
        let picked = match mode {
            RolePickMode::BestFit => pick_best_fit(&candidates, gap),
            RolePickMode::VarietyWeighted => pick_weighted(&candidates, gap, usage, rng),
        };

        let food = picked.ok_or_else(|| PlanError::DataGap {
            meal: meal_type.to_string(),
            category: role.categories.join(", "),
        })?;

        let portion = FoodPortion::new(food.clone(), PLACEHOLDER_GRAMS);
        current.add(portion.macros());
        portions.push(portion);
    }

    Ok(portions)
}

fn pick_best_fit<'a>(candidates: &[&'a Food], gap: MacroTarget) -> Option<&'a Food> {
    candidates
        .iter()
        .min_by(|a, b| {
            let score_a = gap_match_score(&a.profile(), gap);
            let score_b = gap_match_score(&b.profile(), gap);
            score_a
                .partial_cmp(&score_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}

fn pick_weighted<'a, R: Rng>(
    candidates: &[&'a Food],
    gap: MacroTarget,
    usage: &UsageTracker,
    rng: &mut R,
) -> Option<&'a Food> {
    let weights: Vec<f64> = candidates
        .iter()
        .map(|f| usage.variety_score(f) * classify_feasibility(&f.profile(), gap).weight())
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        // Every candidate is infeasible for the current gap; fall back to
        // a uniform draw so selection still makes progress.
        return candidates.choose(rng).copied();
    }

    let mut roll = rng.gen_range(0.0..total);
    for (food, weight) in candidates.iter().copied().zip(&weights) {
        if roll < *weight {
            return Some(food);
        }
        roll -= weight;
    }

    candidates.last().copied()
}
