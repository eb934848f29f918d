use crate::composer::constants::{
    EXACT_MAX_ATTEMPTS, EXACT_TOLERANCE_GRAMS, LAST_RESORT_TOLERANCE_FACTOR,
    MACRO_TOLERANCE_GRAMS, MAX_ATTEMPTS_PER_MEAL, RELAXED_TOLERANCE_FACTOR,
};
use crate::composer::selection::RolePickMode;
use crate::composer::solver::PortionSolver;

/// Escalation tiers for tolerance-based acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceTier {
    Standard,
    Relaxed,
    LastResort,
}

impl std::fmt::Display for ToleranceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ToleranceTier::Standard => "standard",
            ToleranceTier::Relaxed => "relaxed",
            ToleranceTier::LastResort => "last-resort",
        };
        write!(f, "{}", name)
    }
}

/// The retry/relaxation policy for one composition run.
///
/// One value replaces the attempt caps and tolerance constants that were
/// otherwise duplicated per strategy.
#[derive(Debug, Clone)]
pub struct ComposePolicy {
    /// Selection + optimization attempts per meal, before the last-resort
    /// attempt.
    pub max_attempts: usize,

    /// Base tolerance per macro axis, in grams.
    pub tolerance_grams: f64,

    /// Portion-solving strategy.
    pub solver: PortionSolver,

    /// How role-based selection picks within a role.
    pub role_pick: RolePickMode,
}

impl Default for ComposePolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS_PER_MEAL,
            tolerance_grams: MACRO_TOLERANCE_GRAMS,
            solver: PortionSolver::GradientDescent,
            role_pick: RolePickMode::BestFit,
        }
    }
}

impl ComposePolicy {
    /// Preset matching the historical exact-solve path: 3-food meals,
    /// tighter tolerance, larger attempt budget.
    pub fn exact() -> Self {
        Self {
            max_attempts: EXACT_MAX_ATTEMPTS,
            tolerance_grams: EXACT_TOLERANCE_GRAMS,
            solver: PortionSolver::ExactLinear,
            role_pick: RolePickMode::BestFit,
        }
    }

    /// Tolerance in grams for a tier.
    pub fn tolerance_for(&self, tier: ToleranceTier) -> f64 {
        match tier {
            ToleranceTier::Standard => self.tolerance_grams,
            ToleranceTier::Relaxed => self.tolerance_grams * RELAXED_TOLERANCE_FACTOR,
            ToleranceTier::LastResort => self.tolerance_grams * LAST_RESORT_TOLERANCE_FACTOR,
        }
    }

    /// The widest tolerance this policy will ever accept.
    pub fn widest_tolerance(&self) -> f64 {
        self.tolerance_for(ToleranceTier::LastResort)
    }

    /// Tier for a given zero-based attempt index: standard tolerance for
    /// the first half of the budget, relaxed for the rest.
    pub fn tier_for_attempt(&self, attempt: usize) -> ToleranceTier {
        if attempt < self.max_attempts / 2 {
            ToleranceTier::Standard
        } else {
            ToleranceTier::Relaxed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_escalation() {
        let policy = ComposePolicy::default();
        assert_eq!(policy.tier_for_attempt(0), ToleranceTier::Standard);
        assert_eq!(policy.tier_for_attempt(4), ToleranceTier::Standard);
        assert_eq!(policy.tier_for_attempt(5), ToleranceTier::Relaxed);
        assert_eq!(policy.tier_for_attempt(9), ToleranceTier::Relaxed);
    }

    #[test]
    fn test_tolerance_tiers() {
        let policy = ComposePolicy::default();
        let base = policy.tolerance_for(ToleranceTier::Standard);
        assert_eq!(policy.tolerance_for(ToleranceTier::Relaxed), base * 2.0);
        assert_eq!(policy.widest_tolerance(), base * 4.0);
    }

    #[test]
    fn test_exact_preset() {
        let policy = ComposePolicy::exact();
        assert_eq!(policy.max_attempts, 20);
        assert_eq!(policy.tolerance_grams, 5.0);
        assert!(matches!(policy.solver, PortionSolver::ExactLinear));
    }
}
