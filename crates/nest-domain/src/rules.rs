//! Reward constants for XP accrual and mood scoring.

use serde::{Deserialize, Serialize};

use crate::mood::DragonMood;

/// Tunable reward parameters. Every field falls back to its default when
/// missing from a serialized configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardRules {
    pub xp_per_level: u64,
    pub base_expense_xp: i64,
    pub photo_bonus: i64,
    pub min_xp_per_action: u64,
    pub mood_bonus: MoodBonuses,
    pub daily_login_mood: i64,
    pub budget_deltas: BudgetMoodDeltas,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            xp_per_level: 25,
            base_expense_xp: 5,
            photo_bonus: 2,
            min_xp_per_action: 1,
            mood_bonus: MoodBonuses::default(),
            daily_login_mood: 1,
            budget_deltas: BudgetMoodDeltas::default(),
        }
    }
}

impl RewardRules {
    /// Checks the rules for values that would break levelling.
    pub fn validate(&self) -> Result<(), String> {
        if self.xp_per_level == 0 {
            return Err("xp_per_level must be greater than zero".into());
        }
        Ok(())
    }

    /// XP granted for logging an expense while the dragon is in `mood`.
    pub fn expense_xp(&self, has_photo: bool, mood: DragonMood) -> u64 {
        let photo = if has_photo { self.photo_bonus } else { 0 };
        let raw = self
            .base_expense_xp
            .saturating_add(photo)
            .saturating_add(self.mood_bonus.for_mood(mood));
        u64::try_from(raw).map_or(self.min_xp_per_action, |xp| xp.max(self.min_xp_per_action))
    }

    /// Summed mood delta for a budget evaluation; every set flag contributes.
    pub fn budget_delta(&self, evaluation: &BudgetEvaluation) -> i64 {
        let deltas = &self.budget_deltas;
        [
            (evaluation.under_80_percent, deltas.under_80_percent),
            (evaluation.between_80_and_100, deltas.between_80_and_100),
            (evaluation.over_budget, deltas.over_budget),
            (evaluation.between_min_and_max_goal, deltas.between_min_and_max_goal),
            (evaluation.above_max_goal, deltas.above_max_goal),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .fold(0i64, |total, (_, delta)| total.saturating_add(*delta))
    }
}

/// Flat XP modifiers applied per dragon mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodBonuses {
    pub happy: i64,
    pub neutral: i64,
    pub angry: i64,
}

impl Default for MoodBonuses {
    fn default() -> Self {
        Self {
            happy: 3,
            neutral: 0,
            angry: -1,
        }
    }
}

impl MoodBonuses {
    pub fn for_mood(&self, mood: DragonMood) -> i64 {
        match mood {
            DragonMood::Happy => self.happy,
            DragonMood::Neutral => self.neutral,
            DragonMood::Angry => self.angry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetMoodDeltas {
    pub under_80_percent: i64,
    pub between_80_and_100: i64,
    pub over_budget: i64,
    pub between_min_and_max_goal: i64,
    pub above_max_goal: i64,
}

impl Default for BudgetMoodDeltas {
    fn default() -> Self {
        Self {
            under_80_percent: 2,
            between_80_and_100: 0,
            over_budget: -3,
            between_min_and_max_goal: 2,
            above_max_goal: -3,
        }
    }
}

/// Outcome flags of a periodic budget check. Flags are independent and may
/// be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetEvaluation {
    pub under_80_percent: bool,
    pub between_80_and_100: bool,
    pub over_budget: bool,
    pub between_min_and_max_goal: bool,
    pub above_max_goal: bool,
}

impl BudgetEvaluation {
    pub fn is_empty(&self) -> bool {
        *self == BudgetEvaluation::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_xp_applies_photo_and_mood_bonus() {
        let rules = RewardRules::default();
        assert_eq!(rules.expense_xp(false, DragonMood::Neutral), 5);
        assert_eq!(rules.expense_xp(false, DragonMood::Happy), 8);
        assert_eq!(rules.expense_xp(true, DragonMood::Happy), 10);
        assert_eq!(rules.expense_xp(false, DragonMood::Angry), 4);
        assert_eq!(rules.expense_xp(true, DragonMood::Angry), 6);
    }

    #[test]
    fn expense_xp_never_drops_below_minimum() {
        let rules = RewardRules {
            mood_bonus: MoodBonuses {
                angry: -20,
                ..MoodBonuses::default()
            },
            ..RewardRules::default()
        };
        assert_eq!(rules.expense_xp(false, DragonMood::Angry), 1);
    }

    #[test]
    fn extreme_configured_values_saturate() {
        let rules = RewardRules {
            base_expense_xp: i64::MAX,
            photo_bonus: i64::MAX,
            ..RewardRules::default()
        };
        assert_eq!(rules.expense_xp(true, DragonMood::Happy), i64::MAX as u64);

        let rules = RewardRules {
            min_xp_per_action: u64::MAX,
            ..RewardRules::default()
        };
        assert_eq!(rules.expense_xp(false, DragonMood::Neutral), u64::MAX);

        let rules = RewardRules {
            base_expense_xp: i64::MIN,
            mood_bonus: MoodBonuses {
                angry: i64::MIN,
                ..MoodBonuses::default()
            },
            ..RewardRules::default()
        };
        assert_eq!(rules.expense_xp(false, DragonMood::Angry), 1);
    }

    #[test]
    fn budget_delta_sums_every_set_flag() {
        let rules = RewardRules::default();
        assert_eq!(rules.budget_delta(&BudgetEvaluation::default()), 0);

        let mixed = BudgetEvaluation {
            under_80_percent: true,
            above_max_goal: true,
            ..BudgetEvaluation::default()
        };
        assert_eq!(rules.budget_delta(&mixed), -1);

        let all = BudgetEvaluation {
            under_80_percent: true,
            between_80_and_100: true,
            over_budget: true,
            between_min_and_max_goal: true,
            above_max_goal: true,
        };
        assert_eq!(rules.budget_delta(&all), -2);
    }

    #[test]
    fn zero_xp_per_level_is_rejected() {
        let rules = RewardRules {
            xp_per_level: 0,
            ..RewardRules::default()
        };
        assert!(rules.validate().is_err());
        assert!(RewardRules::default().validate().is_ok());
    }

    #[test]
    fn partial_rules_fill_in_defaults() {
        let rules: RewardRules = serde_json::from_str(r#"{"xp_per_level": 50}"#).unwrap();
        assert_eq!(rules.xp_per_level, 50);
        assert_eq!(rules.base_expense_xp, 5);
        assert_eq!(rules.mood_bonus, MoodBonuses::default());
    }
}
