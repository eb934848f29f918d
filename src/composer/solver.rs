use tracing::debug;

use crate::composer::constants::{
    LEARNING_RATE, MAX_ITERATIONS, MAX_PORTION_GRAMS, MIN_PORTION_GRAMS, SEED_TOTAL_GRAMS,
    SINGULAR_DET_EPSILON,
};
use crate::models::MacroTarget;

/// Portion-solving strategy.
///
/// Both variants share one surface: given per-gram coefficient rows for
/// the selected foods and a macro target, return gram portions within
/// practical bounds whose totals land inside the tolerance, or `None`.
/// Singular systems and tolerance misses are ordinary `None` outcomes,
/// not errors; the composer retries with a fresh food selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortionSolver {
    /// Cramer's-rule solve of the 3×3 system. Exactly three foods.
    ExactLinear,
    /// Iterative gradient descent on squared error. Any food count.
    GradientDescent,
}

impl PortionSolver {
    /// Solve for gram portions.
    ///
    /// `coefficients[i]` is `[carbs, protein, fat]` per gram of food `i`.
    /// Returned portions are rounded to one decimal place and verified
    /// against `target` within `tolerance_grams` per axis after rounding.
    pub fn optimize(
        &self,
        coefficients: &[[f64; 3]],
        target: MacroTarget,
        tolerance_grams: f64,
    ) -> Option<Vec<f64>> {
        match self {
            PortionSolver::ExactLinear => solve_exact(coefficients, target, tolerance_grams),
            PortionSolver::GradientDescent => {
                solve_gradient_descent(coefficients, target, tolerance_grams)
            }
        }
    }
}

/// Macro totals achieved by a portion vector.
pub fn achieved_macros(coefficients: &[[f64; 3]], portions: &[f64]) -> MacroTarget {
    let mut totals = [0.0; 3];
    for (portion, coefficient) in portions.iter().zip(coefficients) {
        for (total, c) in totals.iter_mut().zip(coefficient) {
            *total += portion * c;
        }
    }
    MacroTarget::new(totals[0], totals[1], totals[2])
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Exact solve (N = 3)
// ─────────────────────────────────────────────────────────────────────────────

fn solve_exact(
    coefficients: &[[f64; 3]],
    target: MacroTarget,
    tolerance_grams: f64,
) -> Option<Vec<f64>> {
    if coefficients.len() != 3 {
        return None;
    }

    // Row i of the system is macro axis i across the three foods:
    // | c1 c2 c3 |   | p1 |   | target_carbs   |
    // | p1 p2 p3 | x | p2 | = | target_protein |
    // | f1 f2 f3 |   | p3 |   | target_fat     |
    let matrix = [
        [coefficients[0][0], coefficients[1][0], coefficients[2][0]],
        [coefficients[0][1], coefficients[1][1], coefficients[2][1]],
        [coefficients[0][2], coefficients[1][2], coefficients[2][2]],
    ];

    for variant in target_variations(target, tolerance_grams) {
        let vector = [variant.carbs, variant.protein, variant.fat];

        let Some(solution) = solve_cramer(&matrix, &vector) else {
            // Singular matrix: no variant of the target will help.
            return None;
        };

        if solution
            .iter()
            .any(|&p| p < MIN_PORTION_GRAMS || p > MAX_PORTION_GRAMS)
        {
            continue;
        }

        let portions: Vec<f64> = solution.iter().map(|&p| round_tenth(p)).collect();

        // The perturbed target is a search heuristic only; acceptance is
        // always judged against the original target.
        let actual = achieved_macros(coefficients, &portions);
        if actual.within_tolerance(target, tolerance_grams) {
            return Some(portions);
        }
    }

    None
}

/// Solve `matrix * x = vector` by Cramer's rule. None when singular.
fn solve_cramer(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> Option<[f64; 3]> {
    let det = determinant_3x3(matrix);
    if det.abs() < SINGULAR_DET_EPSILON {
        return None;
    }

    let mut solution = [0.0; 3];
    for (i, value) in solution.iter_mut().enumerate() {
        let mut modified = *matrix;
        for (row, &v) in modified.iter_mut().zip(vector) {
            row[i] = v;
        }
        *value = determinant_3x3(&modified) / det;
    }

    Some(solution)
}

fn determinant_3x3(m: &[[f64; 3]; 3]) -> f64 {
    let [a, b, c] = m[0];
    let [d, e, f] = m[1];
    let [g, h, i] = m[2];

    a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
}

/// Target variants to try: the exact target first, then every
/// combination of ±tolerance offsets per axis (the all-zero offset is
/// skipped since the exact target already covers it). Axes are clamped
/// at zero.
fn target_variations(target: MacroTarget, tolerance_grams: f64) -> Vec<MacroTarget> {
    let offsets = [-tolerance_grams, 0.0, tolerance_grams];
    let mut variations = vec![target];

    for &carb_offset in &offsets {
        for &protein_offset in &offsets {
            for &fat_offset in &offsets {
                if carb_offset == 0.0 && protein_offset == 0.0 && fat_offset == 0.0 {
                    continue;
                }

                variations.push(MacroTarget::new(
                    (target.carbs + carb_offset).max(0.0),
                    (target.protein + protein_offset).max(0.0),
                    (target.fat + fat_offset).max(0.0),
                ));
            }
        }
    }

    variations
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradient descent (any N)
// ─────────────────────────────────────────────────────────────────────────────

fn solve_gradient_descent(
    coefficients: &[[f64; 3]],
    target: MacroTarget,
    tolerance_grams: f64,
) -> Option<Vec<f64>> {
    if coefficients.is_empty() {
        return None;
    }

    let n = coefficients.len();
    let mut portions = vec![SEED_TOTAL_GRAMS / n as f64; n];
    let mut best_portions = portions.clone();
    let mut best_error = f64::INFINITY;

    for iteration in 0..MAX_ITERATIONS {
        let current = achieved_macros(coefficients, &portions);
        let errors = [
            target.carbs - current.carbs,
            target.protein - current.protein,
            target.fat - current.fat,
        ];
        let total_error: f64 = errors.iter().map(|e| e * e).sum();

        if total_error < best_error {
            best_error = total_error;
            best_portions.copy_from_slice(&portions);

            if best_error.sqrt() < tolerance_grams {
                debug!(iteration, error = best_error.sqrt(), "converged early");
                break;
            }
        }

        for (portion, coefficient) in portions.iter_mut().zip(coefficients) {
            let gradient: f64 = 2.0
                * errors
                    .iter()
                    .zip(coefficient)
                    .map(|(error, c)| error * c)
                    .sum::<f64>();

            *portion =
                (*portion + LEARNING_RATE * gradient).clamp(MIN_PORTION_GRAMS, MAX_PORTION_GRAMS);
        }
    }

    let portions: Vec<f64> = best_portions.iter().map(|&p| round_tenth(p)).collect();
    let actual = achieved_macros(coefficients, &portions);

    if actual.within_tolerance(target, tolerance_grams) {
        Some(portions)
    } else {
        debug!(
            error = best_error.sqrt(),
            tolerance = tolerance_grams,
            "gradient descent finished outside tolerance"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_determinant() {
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_float_absolute_eq!(determinant_3x3(&identity), 1.0);

        let singular = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        assert_float_absolute_eq!(determinant_3x3(&singular), 0.0);
    }

    #[test]
    fn test_cramer_identity_system() {
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let solution = solve_cramer(&identity, &[3.0, 7.0, 11.0]).unwrap();
        assert_float_absolute_eq!(solution[0], 3.0);
        assert_float_absolute_eq!(solution[1], 7.0);
        assert_float_absolute_eq!(solution[2], 11.0);
    }

    #[test]
    fn test_cramer_rejects_singular() {
        let singular = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        assert!(solve_cramer(&singular, &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_target_variation_grid() {
        let variations = target_variations(MacroTarget::new(60.0, 40.0, 20.0), 5.0);
        assert_eq!(variations.len(), 27);
        assert_eq!(variations[0], MacroTarget::new(60.0, 40.0, 20.0));
        // No variant repeats the exact target
        assert!(!variations[1..].contains(&variations[0]));
    }

    #[test]
    fn test_variations_clamped_at_zero() {
        let variations = target_variations(MacroTarget::new(2.0, 40.0, 20.0), 5.0);
        assert!(variations.iter().all(|v| v.carbs >= 0.0));
    }

    #[test]
    fn test_exact_solver_wrong_food_count() {
        let solver = PortionSolver::ExactLinear;
        let coefficients = vec![[0.5, 0.1, 0.1], [0.1, 0.5, 0.1]];
        let target = MacroTarget::new(50.0, 50.0, 20.0);
        assert!(solver.optimize(&coefficients, target, 5.0).is_none());
    }

    #[test]
    fn test_gradient_descent_diagonal_system() {
        // Three nearly independent foods: the feasible solution is well
        // inside the portion bounds, so descent must converge.
        let coefficients = vec![[0.75, 0.03, 0.01], [0.0, 0.30, 0.04], [0.0, 0.0, 0.95]];
        let target = MacroTarget::new(60.0, 38.0, 16.0);

        let portions = PortionSolver::GradientDescent
            .optimize(&coefficients, target, 8.0)
            .expect("feasible system should converge");

        assert_eq!(portions.len(), 3);
        for &p in &portions {
            assert!((MIN_PORTION_GRAMS..=MAX_PORTION_GRAMS).contains(&p));
        }

        let actual = achieved_macros(&coefficients, &portions);
        assert!(actual.within_tolerance(target, 8.0));
    }

    #[test]
    fn test_gradient_descent_unreachable_target() {
        // Pure-fat foods cannot produce carbs or protein; no tolerance
        // tier can absorb a 300 g carb error.
        let coefficients = vec![[0.0, 0.0, 0.9]; 5];
        let target = MacroTarget::new(300.0, 200.0, 10.0);

        assert!(PortionSolver::GradientDescent
            .optimize(&coefficients, target, 32.0)
            .is_none());
    }

    #[test]
    fn test_portions_rounded_to_tenth() {
        let coefficients = vec![[0.75, 0.03, 0.01], [0.0, 0.30, 0.04], [0.0, 0.0, 0.95]];
        let target = MacroTarget::new(60.0, 38.0, 16.0);

        let portions = PortionSolver::GradientDescent
            .optimize(&coefficients, target, 8.0)
            .unwrap();

        for &p in &portions {
            assert_float_absolute_eq!(p * 10.0, (p * 10.0).round(), 1e-9);
        }
    }
}
