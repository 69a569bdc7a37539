//! Stateless progress and mood evaluation for a single nest.

use nest_domain::{Nest, NestKind, NestMood, NestProgress};

/// Pure budget progress helpers. Safe to call from anywhere without locking.
pub struct BudgetProgress;

impl BudgetProgress {
    /// Remaining share of the budget, clamped to `[0, 1]`.
    ///
    /// Income nests always report `1.0`. An expense nest without a usable
    /// budget (missing, zero, negative or not finite) reports `0.0`.
    pub fn progress(budget: Option<f64>, spent: f64, kind: NestKind) -> f64 {
        if kind == NestKind::Income {
            return 1.0;
        }
        match budget {
            Some(budget) if budget.is_finite() && budget > 0.0 => {
                let ratio = (budget - spent) / budget;
                if ratio.is_nan() {
                    0.0
                } else {
                    ratio.clamp(0.0, 1.0)
                }
            }
            _ => 0.0,
        }
    }

    pub fn mood_from_progress(progress: f64) -> NestMood {
        NestMood::from_progress(progress)
    }

    pub fn evaluate(budget: Option<f64>, spent: f64, kind: NestKind) -> (f64, NestMood) {
        let progress = Self::progress(budget, spent, kind);
        (progress, Self::mood_from_progress(progress))
    }

    pub fn for_nest(nest: &Nest, spent: f64) -> NestProgress {
        let (progress, mood) = Self::evaluate(nest.budget, spent, nest.kind);
        NestProgress {
            nest_id: nest.id,
            name: nest.name.clone(),
            budget: nest.budget,
            spent,
            progress,
            mood,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn untouched_budget_is_positive() {
        let (progress, mood) = BudgetProgress::evaluate(Some(1000.0), 0.0, NestKind::Expense);
        assert_close(progress, 1.0);
        assert_eq!(mood, NestMood::Positive);
    }

    #[test]
    fn half_spent_budget_is_neutral() {
        let (progress, mood) = BudgetProgress::evaluate(Some(1000.0), 500.0, NestKind::Expense);
        assert_close(progress, 0.5);
        assert_eq!(mood, NestMood::Neutral);
    }

    #[test]
    fn overspent_budget_clamps_to_zero() {
        let (progress, mood) = BudgetProgress::evaluate(Some(1000.0), 1200.0, NestKind::Expense);
        assert_close(progress, 0.0);
        assert_eq!(mood, NestMood::Negative);
    }

    #[test]
    fn exact_thresholds_land_in_the_higher_band() {
        let (at_positive, mood) = BudgetProgress::evaluate(Some(100.0), 25.0, NestKind::Expense);
        assert_close(at_positive, 0.75);
        assert_eq!(mood, NestMood::Positive);

        let (at_neutral, mood) = BudgetProgress::evaluate(Some(100.0), 60.0, NestKind::Expense);
        assert_close(at_neutral, 0.4);
        assert_eq!(mood, NestMood::Neutral);
    }

    #[test]
    fn income_nests_are_always_full() {
        assert_close(BudgetProgress::progress(None, 9999.0, NestKind::Income), 1.0);
        assert_close(BudgetProgress::progress(Some(10.0), 50.0, NestKind::Income), 1.0);
    }

    #[test]
    fn missing_or_zero_budget_reports_empty_progress() {
        assert_close(BudgetProgress::progress(None, 0.0, NestKind::Expense), 0.0);
        assert_close(BudgetProgress::progress(Some(0.0), 0.0, NestKind::Expense), 0.0);
        assert_close(BudgetProgress::progress(Some(-5.0), 1.0, NestKind::Expense), 0.0);
        assert_close(BudgetProgress::progress(Some(f64::NAN), 1.0, NestKind::Expense), 0.0);
    }

    #[test]
    fn for_nest_carries_identity() {
        let nest = Nest::new("Coffee", NestKind::Expense).with_budget(40.0);
        let summary = BudgetProgress::for_nest(&nest, 10.0);
        assert_eq!(summary.nest_id, nest.id);
        assert_eq!(summary.name, "Coffee");
        assert_close(summary.progress, 0.75);
        assert_eq!(summary.mood, NestMood::Positive);
    }
}
