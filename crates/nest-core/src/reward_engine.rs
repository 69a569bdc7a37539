//! Dragon reward engine: XP accrual, levelling and mood scoring.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nest_domain::{BudgetEvaluation, DayCode, DragonMood, ProgressionState, RewardRules};
use tracing::{debug, info, warn};

use crate::{
    state_channel::{StateChannel, StateReceiver},
    storage::ProgressStore,
    time::Clock,
    CoreError,
};

/// Owns the dragon's [`ProgressionState`].
///
/// Every mutation runs under one lock from read to publish: the new state is
/// derived, written to the [`ProgressStore`], and only then made visible and
/// published to subscribers. A failed write leaves the state untouched.
pub struct RewardEngine {
    rules: RewardRules,
    store: Box<dyn ProgressStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<ProgressionState>,
    channel: StateChannel<ProgressionState>,
}

/// Fields to override on the next recompute; `None` keeps the current value.
#[derive(Debug, Default)]
struct StateUpdate {
    total_xp: Option<u64>,
    mood_score: Option<i64>,
    last_login_day: Option<DayCode>,
}

impl RewardEngine {
    /// Loads the stored record once; a missing record starts from zero.
    pub fn new(
        rules: RewardRules,
        store: Box<dyn ProgressStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        rules.validate().map_err(CoreError::Validation)?;
        let record = store.load()?.unwrap_or_default();
        let state = ProgressionState::from_record(&record, rules.xp_per_level);
        debug!(
            total_xp = state.total_xp(),
            mood_score = state.mood_score(),
            last_login = %state.last_login_day(),
            "reward engine loaded"
        );
        Ok(Self {
            rules,
            store,
            clock,
            channel: StateChannel::new(state.clone()),
            state: Mutex::new(state),
        })
    }

    pub fn rules(&self) -> &RewardRules {
        &self.rules
    }

    pub fn state(&self) -> ProgressionState {
        self.lock().clone()
    }

    pub fn subscribe(&self) -> StateReceiver<ProgressionState> {
        self.channel.subscribe()
    }

    /// Grants the daily mood bonus at most once per calendar day.
    pub fn on_daily_login(&self) -> Result<ProgressionState, CoreError> {
        let today = DayCode::from_date(self.clock.today());
        let mut state = self.lock();
        if state.last_login_day() == today {
            debug!(day = %today, "daily login already counted");
            return Ok(state.clone());
        }
        let update = StateUpdate {
            mood_score: Some(state.mood_score().saturating_add(self.rules.daily_login_mood)),
            last_login_day: Some(today),
            ..StateUpdate::default()
        };
        self.recompute_and_persist(&mut state, update)
    }

    /// Accrues XP for a logged expense. The mood bonus uses the mood held
    /// before this call; the mood itself is not changed.
    pub fn on_expense_logged(&self, has_photo: bool) -> Result<ProgressionState, CoreError> {
        let mut state = self.lock();
        let gained = self.rules.expense_xp(has_photo, state.mood());
        debug!(gained, has_photo, mood = %state.mood(), "expense logged");
        let update = StateUpdate {
            total_xp: Some(state.total_xp().saturating_add(gained)),
            ..StateUpdate::default()
        };
        self.recompute_and_persist(&mut state, update)
    }

    /// Applies the summed mood delta of a budget evaluation. XP is untouched.
    pub fn on_budget_evaluated(
        &self,
        evaluation: BudgetEvaluation,
    ) -> Result<ProgressionState, CoreError> {
        let mut state = self.lock();
        let delta = self.rules.budget_delta(&evaluation);
        debug!(delta, ?evaluation, "budget evaluated");
        let update = StateUpdate {
            mood_score: Some(state.mood_score().saturating_add(delta)),
            ..StateUpdate::default()
        };
        self.recompute_and_persist(&mut state, update)
    }

    /// Applies every evaluation of one budget period as a single mutation, so
    /// the period's deltas are persisted together or not at all. An empty
    /// batch leaves the state alone.
    pub fn on_budgets_evaluated(
        &self,
        evaluations: &[BudgetEvaluation],
    ) -> Result<ProgressionState, CoreError> {
        let mut state = self.lock();
        if evaluations.is_empty() {
            return Ok(state.clone());
        }
        let delta = evaluations
            .iter()
            .fold(0i64, |total, evaluation| {
                total.saturating_add(self.rules.budget_delta(evaluation))
            });
        debug!(delta, nests = evaluations.len(), "budget period evaluated");
        let update = StateUpdate {
            mood_score: Some(state.mood_score().saturating_add(delta)),
            ..StateUpdate::default()
        };
        self.recompute_and_persist(&mut state, update)
    }

    /// Forces the mood band by replacing the score with a representative
    /// value. Any accumulated score is discarded.
    pub fn set_overall_mood(&self, mood: DragonMood) -> Result<ProgressionState, CoreError> {
        let mut state = self.lock();
        let update = StateUpdate {
            mood_score: Some(mood.representative_score()),
            ..StateUpdate::default()
        };
        self.recompute_and_persist(&mut state, update)
    }

    fn recompute_and_persist(
        &self,
        state: &mut ProgressionState,
        update: StateUpdate,
    ) -> Result<ProgressionState, CoreError> {
        let next = ProgressionState::derive(
            update.total_xp.unwrap_or(state.total_xp()),
            update.mood_score.unwrap_or(state.mood_score()),
            update.last_login_day.unwrap_or(state.last_login_day()),
            self.rules.xp_per_level,
        );

        if let Err(err) = self.store.save(&next.to_record()) {
            warn!(error = %err, "could not save progress; state left unchanged");
            return Err(err);
        }

        if next.level() > state.level() {
            info!(from = state.level(), to = next.level(), "dragon levelled up");
        }
        if next.mood() != state.mood() {
            info!(from = %state.mood(), to = %next.mood(), "dragon mood changed");
        }

        *state = next.clone();
        self.channel.publish(next.clone());
        Ok(next)
    }

    fn lock(&self) -> MutexGuard<'_, ProgressionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RewardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardEngine")
            .field("rules", &self.rules)
            .field("state", &*self.lock())
            .finish()
    }
}
