/// Base tolerance per macro axis, in grams.
pub const MACRO_TOLERANCE_GRAMS: f64 = 8.0;

/// Tighter tolerance used by the exact-solve preset.
pub const EXACT_TOLERANCE_GRAMS: f64 = 5.0;

/// Tolerance multiplier after half the attempt budget fails.
pub const RELAXED_TOLERANCE_FACTOR: f64 = 2.0;

/// Tolerance multiplier for the single last-resort attempt.
pub const LAST_RESORT_TOLERANCE_FACTOR: f64 = 4.0;

/// Smallest practical portion, in grams.
pub const MIN_PORTION_GRAMS: f64 = 10.0;

/// Largest practical portion, in grams.
pub const MAX_PORTION_GRAMS: f64 = 500.0;

/// Gradient descent iteration cap.
pub const MAX_ITERATIONS: usize = 200;

/// Gradient descent step size. Fixed; no adaptive schedule.
pub const LEARNING_RATE: f64 = 0.5;

/// Total grams the gradient descent start vector sums to.
pub const SEED_TOTAL_GRAMS: f64 = 300.0;

/// Determinants below this magnitude are treated as singular.
pub const SINGULAR_DET_EPSILON: f64 = 0.001;

/// Selection + optimization attempts per meal.
pub const MAX_ATTEMPTS_PER_MEAL: usize = 10;

/// Attempt budget for the exact-solve preset.
pub const EXACT_MAX_ATTEMPTS: usize = 20;

/// Foods drawn per catalog sample batch during exactly-N selection.
pub const SAMPLE_BATCH_SIZE: usize = 5;

/// Empty sample batches tolerated before a category is a data gap.
pub const MAX_SAMPLE_BATCHES: usize = 10;

/// Placeholder grams assigned at selection time, before solving.
pub const PLACEHOLDER_GRAMS: f64 = 50.0;

// ─────────────────────────────────────────────────────────────────────────────
// Gap-match scoring
// ─────────────────────────────────────────────────────────────────────────────

/// A macro amount above this multiple of the gap counts as overshooting.
pub const GAP_OVERSHOOT_RATIO: f64 = 1.5;

/// Penalty weight applied to an overshooting macro amount.
pub const OVERSHOOT_PENALTY_WEIGHT: f64 = 2.0;

/// Reward weight for a macro amount close to the gap.
pub const CLOSE_MATCH_WEIGHT: f64 = 0.5;

/// Penalty weight when a food contributes nothing to a positive gap.
pub const MISSING_CONTRIBUTION_WEIGHT: f64 = 0.1;

/// Score for any food that adds to an already-exceeded macro.
pub const EXCEEDED_GAP_PENALTY: f64 = 1000.0;

/// Feasibility: a per-100g amount above this multiple of the largest gap
/// counts as gross overshoot.
pub const FEASIBILITY_OVERSHOOT_RATIO: f64 = 3.0;

/// Feasibility: a per-100g amount below this fraction of the largest gap
/// counts as minor help.
pub const FEASIBILITY_MINOR_FRACTION: f64 = 0.25;
