//! Application context wiring configuration, storage and the reward engine.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use nest_config::{Config, ConfigManager};
use nest_core::{Clock, CoreError, NestService, NestStorage, RewardEngine, StateReceiver};
use nest_domain::{
    DayCode, DragonMood, Nest, NestBook, NestProgress, NestTransaction, ProgressionState,
};
use nest_storage_json::JsonStorage;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{clock::SystemClock, errors::Result};

/// Result of filing a transaction into a nest.
#[derive(Debug, Clone)]
pub struct LoggedTransaction {
    pub transaction_id: Uuid,
    pub nest: NestProgress,
    /// Updated progression when the transaction earned XP (expense nests only).
    pub progression: Option<ProgressionState>,
}

/// One explicitly constructed instance per running application. Owns the
/// reward engine and the nest book and persists both after every change.
pub struct DragonNest {
    config: Config,
    base_dir: PathBuf,
    clock: Arc<dyn Clock>,
    storage: Box<dyn NestStorage>,
    book: NestBook,
    engine: RewardEngine,
}

impl DragonNest {
    /// Opens the application rooted at `base_dir` using the stored config and
    /// the system clock. A default config file is written on first start.
    pub fn open(base_dir: &Path) -> Result<Self> {
        let manager = ConfigManager::with_base_dir(base_dir)?;
        let config = manager.load()?;
        if !manager.config_path().exists() {
            manager.save(&config)?;
            info!(path = %manager.config_path().display(), "default config written");
        }
        Self::with_clock(base_dir, config, Arc::new(SystemClock))
    }

    pub fn with_clock(base_dir: &Path, config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let data_dir = config.resolve_data_dir(base_dir);
        let storage = JsonStorage::new(data_dir)?;
        let engine = RewardEngine::new(
            config.rewards.clone(),
            Box::new(storage.clone()),
            clock.clone(),
        )?;
        Self::from_parts(base_dir, config, clock, Box::new(storage), engine)
    }

    /// Assembles the context from already constructed collaborators.
    pub fn from_parts(
        base_dir: &Path,
        config: Config,
        clock: Arc<dyn Clock>,
        storage: Box<dyn NestStorage>,
        engine: RewardEngine,
    ) -> Result<Self> {
        let book = storage.load_book()?;
        debug!(
            base_dir = %base_dir.display(),
            nests = book.nests.len(),
            transactions = book.transactions.len(),
            "dragon nest opened"
        );
        Ok(Self {
            config,
            base_dir: base_dir.to_path_buf(),
            clock,
            storage,
            book,
            engine,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn engine(&self) -> &RewardEngine {
        &self.engine
    }

    pub fn book(&self) -> &NestBook {
        &self.book
    }

    pub fn progression(&self) -> ProgressionState {
        self.engine.state()
    }

    pub fn subscribe(&self) -> StateReceiver<ProgressionState> {
        self.engine.subscribe()
    }

    /// Counts today's visit toward the dragon's mood.
    pub fn check_in(&self) -> Result<ProgressionState> {
        Ok(self.engine.on_daily_login()?)
    }

    pub fn set_mood(&self, mood: DragonMood) -> Result<ProgressionState> {
        Ok(self.engine.set_overall_mood(mood)?)
    }

    pub fn find_nest(&self, name: &str) -> Result<&Nest> {
        self.book
            .nest_by_name(name)
            .ok_or_else(|| CoreError::NestNotFound(name.trim().to_string()).into())
    }

    pub fn create_nest(&mut self, nest: Nest) -> Result<Uuid> {
        let mut book = self.book.clone();
        let id = NestService::add_nest(&mut book, nest)?;
        self.commit(book)?;
        info!(%id, "nest created");
        Ok(id)
    }

    pub fn remove_nest(&mut self, id: Uuid) -> Result<Nest> {
        let mut book = self.book.clone();
        let removed = NestService::remove_nest(&mut book, id)?;
        self.commit(book)?;
        info!(%id, "nest removed");
        Ok(removed)
    }

    /// Files an amount into a nest dated today. Expense nests also earn XP.
    /// The transaction is saved first and taken back out again when the XP
    /// cannot be saved, so a failed call leaves nothing behind.
    pub fn log_transaction(
        &mut self,
        nest_id: Uuid,
        amount: f64,
        note: Option<String>,
        has_photo: bool,
    ) -> Result<LoggedTransaction> {
        let mut transaction =
            NestTransaction::new(nest_id, amount, self.clock.today()).with_photo(has_photo);
        transaction.note = note;

        let previous = self.book.clone();
        let mut book = previous.clone();
        let transaction_id = NestService::record_transaction(&mut book, transaction)?;
        let is_expense = book.nest(nest_id).map(Nest::is_expense).unwrap_or(false);
        self.commit(book)?;

        let progression = if is_expense {
            match self.engine.on_expense_logged(has_photo) {
                Ok(state) => Some(state),
                Err(err) => {
                    self.restore(previous);
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        Ok(LoggedTransaction {
            transaction_id,
            nest: NestService::progress_for(&self.book, nest_id)?,
            progression,
        })
    }

    /// Runs the periodic budget check at most once per calendar day. Every
    /// nest with at least one outcome flag contributes to the mood change,
    /// applied in one engine mutation. Returns `None` when today's check has
    /// already been counted.
    pub fn evaluate_budgets(&mut self) -> Result<Option<ProgressionState>> {
        let today = DayCode::from_date(self.clock.today());
        if self.book.last_evaluated == today {
            debug!(day = %today, "budgets already evaluated today");
            return Ok(None);
        }

        let mut evaluations = Vec::new();
        for nest in &self.book.nests {
            let evaluation = NestService::evaluation_for(&self.book, nest.id)?;
            if evaluation.is_empty() {
                continue;
            }
            debug!(nest = %nest.name, ?evaluation, "feeding budget evaluation");
            evaluations.push(evaluation);
        }

        let previous = self.book.clone();
        let mut book = previous.clone();
        book.last_evaluated = today;
        book.touch();
        self.commit(book)?;

        match self.engine.on_budgets_evaluated(&evaluations) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                self.restore(previous);
                Err(err.into())
            }
        }
    }

    pub fn last_evaluated(&self) -> DayCode {
        self.book.last_evaluated
    }

    pub fn overview(&self) -> Vec<NestProgress> {
        NestService::overview(&self.book)
    }

    fn commit(&mut self, book: NestBook) -> Result<()> {
        self.storage.save_book(&book)?;
        self.book = book;
        Ok(())
    }

    /// Puts back the book as it was before a commit whose follow-up failed.
    fn restore(&mut self, previous: NestBook) {
        match self.storage.save_book(&previous) {
            Ok(()) => self.book = previous,
            Err(err) => warn!(error = %err, "could not roll back nest book"),
        }
    }
}
