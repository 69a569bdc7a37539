//! Discrete mood bands for the dragon and for individual nests.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Score at or above which the dragon is happy.
pub const HAPPY_SCORE_THRESHOLD: i64 = 2;
/// Score at or below which the dragon is angry.
pub const ANGRY_SCORE_THRESHOLD: i64 = -2;

/// Progress at or above which a nest is healthy.
pub const POSITIVE_PROGRESS_THRESHOLD: f64 = 0.75;
/// Progress at or above which a nest is merely okay.
pub const NEUTRAL_PROGRESS_THRESHOLD: f64 = 0.4;

/// Emotional band of the dragon, derived from the running mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragonMood {
    Happy,
    #[default]
    Neutral,
    Angry,
}

impl DragonMood {
    /// Bands a mood score. Edges are inclusive; `-1..=1` is neutral.
    pub fn from_score(score: i64) -> Self {
        if score >= HAPPY_SCORE_THRESHOLD {
            DragonMood::Happy
        } else if score <= ANGRY_SCORE_THRESHOLD {
            DragonMood::Angry
        } else {
            DragonMood::Neutral
        }
    }

    /// A score that is guaranteed to band back into `self`.
    pub fn representative_score(self) -> i64 {
        match self {
            DragonMood::Happy => HAPPY_SCORE_THRESHOLD,
            DragonMood::Neutral => 0,
            DragonMood::Angry => ANGRY_SCORE_THRESHOLD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DragonMood::Happy => "happy",
            DragonMood::Neutral => "neutral",
            DragonMood::Angry => "angry",
        }
    }
}

impl fmt::Display for DragonMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DragonMood {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(DragonMood::Happy),
            "neutral" => Ok(DragonMood::Neutral),
            "angry" => Ok(DragonMood::Angry),
            other => Err(format!("unknown mood `{}`", other)),
        }
    }
}

/// Health band of a single nest's spending progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestMood {
    Positive,
    Neutral,
    Negative,
}

impl NestMood {
    /// Bands a progress ratio. Each threshold belongs to the higher band.
    pub fn from_progress(progress: f64) -> Self {
        if progress >= POSITIVE_PROGRESS_THRESHOLD {
            NestMood::Positive
        } else if progress >= NEUTRAL_PROGRESS_THRESHOLD {
            NestMood::Neutral
        } else {
            NestMood::Negative
        }
    }
}

impl fmt::Display for NestMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NestMood::Positive => "positive",
            NestMood::Neutral => "neutral",
            NestMood::Negative => "negative",
        };
        f.write_str(label)
    }
}
