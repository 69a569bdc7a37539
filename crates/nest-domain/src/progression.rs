//! Dragon progression: experience, level and mood.

use serde::{Deserialize, Serialize};

use crate::{common::DayCode, mood::DragonMood};

/// Snapshot of the dragon's progression.
///
/// Derived fields (`level`, `xp_into_level`, `mood`) are only ever computed
/// from the underlying totals by [`ProgressionState::derive`], so they cannot
/// drift from `total_xp` and `mood_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionState {
    total_xp: u64,
    level: u64,
    xp_into_level: u64,
    xp_per_level: u64,
    mood_score: i64,
    mood: DragonMood,
    last_login_day: DayCode,
}

impl ProgressionState {
    pub fn derive(
        total_xp: u64,
        mood_score: i64,
        last_login_day: DayCode,
        xp_per_level: u64,
    ) -> Self {
        let xp_per_level = xp_per_level.max(1);
        Self {
            total_xp,
            level: total_xp / xp_per_level,
            xp_into_level: total_xp % xp_per_level,
            xp_per_level,
            mood_score,
            mood: DragonMood::from_score(mood_score),
            last_login_day,
        }
    }

    pub fn from_record(record: &ProgressRecord, xp_per_level: u64) -> Self {
        Self::derive(
            record.xp,
            record.mood_score,
            DayCode::from_raw(record.last_login_ymd),
            xp_per_level,
        )
    }

    pub fn to_record(&self) -> ProgressRecord {
        ProgressRecord {
            xp: self.total_xp,
            mood_score: self.mood_score,
            last_login_ymd: self.last_login_day.raw(),
        }
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn xp_into_level(&self) -> u64 {
        self.xp_into_level
    }

    pub fn xp_per_level(&self) -> u64 {
        self.xp_per_level
    }

    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_per_level - self.xp_into_level
    }

    /// Fraction of the current level already earned, in `[0, 1)`.
    pub fn level_progress(&self) -> f64 {
        self.xp_into_level as f64 / self.xp_per_level as f64
    }

    pub fn mood_score(&self) -> i64 {
        self.mood_score
    }

    pub fn mood(&self) -> DragonMood {
        self.mood
    }

    pub fn last_login_day(&self) -> DayCode {
        self.last_login_day
    }
}

/// Persisted key-value record backing [`ProgressionState`]. Missing fields
/// default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub xp: u64,
    pub mood_score: i64,
    pub last_login_ymd: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_remainder_follow_total_xp() {
        let state = ProgressionState::derive(52, 0, DayCode::NONE, 25);
        assert_eq!(state.level(), 2);
        assert_eq!(state.xp_into_level(), 2);
        assert_eq!(state.xp_to_next_level(), 23);
        assert!((state.level_progress() - 0.08).abs() < 1e-9);
    }

    #[test]
    fn mood_follows_score() {
        assert_eq!(
            ProgressionState::derive(0, 3, DayCode::NONE, 25).mood(),
            DragonMood::Happy
        );
        assert_eq!(
            ProgressionState::derive(0, -7, DayCode::NONE, 25).mood(),
            DragonMood::Angry
        );
    }

    #[test]
    fn record_round_trips_through_state() {
        let record = ProgressRecord {
            xp: 77,
            mood_score: -4,
            last_login_ymd: 20240102,
        };
        let state = ProgressionState::from_record(&record, 25);
        assert_eq!(state.level(), 3);
        assert_eq!(state.to_record(), record);
    }

    #[test]
    fn missing_record_fields_default_to_zero() {
        let record: ProgressRecord = serde_json::from_str(r#"{"xp": 12}"#).unwrap();
        assert_eq!(record.xp, 12);
        assert_eq!(record.mood_score, 0);
        assert_eq!(record.last_login_ymd, 0);
    }
}
