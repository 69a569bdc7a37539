//! Business logic helpers for nest management and budget checks.

use nest_domain::{BudgetEvaluation, Nest, NestBook, NestProgress, NestTransaction};
use uuid::Uuid;

use crate::{budget_progress::BudgetProgress, CoreError};

/// Share of the budget below which spending counts as comfortably under.
pub const UNDER_BUDGET_RATIO: f64 = 0.8;

/// Provides validated operations over a [`NestBook`].
pub struct NestService;

impl NestService {
    /// Adds a nest after checking creation rules and name uniqueness.
    pub fn add_nest(book: &mut NestBook, nest: Nest) -> Result<Uuid, CoreError> {
        nest.validate()?;
        if book.nest_by_name(&nest.name).is_some() {
            return Err(CoreError::Validation(format!(
                "a nest named `{}` already exists",
                nest.name.trim()
            )));
        }
        Ok(book.add_nest(nest))
    }

    /// Removes a nest together with every transaction filed into it.
    pub fn remove_nest(book: &mut NestBook, id: Uuid) -> Result<Nest, CoreError> {
        book.remove_nest(id)
            .ok_or_else(|| CoreError::NestNotFound(id.to_string()))
    }

    /// Files a transaction into an existing nest.
    pub fn record_transaction(
        book: &mut NestBook,
        transaction: NestTransaction,
    ) -> Result<Uuid, CoreError> {
        transaction.validate()?;
        Self::nest(book, transaction.nest_id)?;
        Ok(book.add_transaction(transaction))
    }

    pub fn spent_for(book: &NestBook, id: Uuid) -> Result<f64, CoreError> {
        Self::nest(book, id)?;
        Ok(book.spent_for(id))
    }

    pub fn progress_for(book: &NestBook, id: Uuid) -> Result<NestProgress, CoreError> {
        let nest = Self::nest(book, id)?;
        Ok(BudgetProgress::for_nest(nest, book.spent_for(id)))
    }

    /// Progress for every nest, ordered by name.
    pub fn overview(book: &NestBook) -> Vec<NestProgress> {
        let mut rows: Vec<NestProgress> = book
            .nests
            .iter()
            .map(|nest| BudgetProgress::for_nest(nest, book.spent_for(nest.id)))
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        rows
    }

    /// Derives the periodic evaluation flags for one nest.
    ///
    /// Budget flags apply to expense nests with a positive budget and are
    /// mutually exclusive. Goal flags apply to any nest with a goal range.
    pub fn evaluation_for(book: &NestBook, id: Uuid) -> Result<BudgetEvaluation, CoreError> {
        let nest = Self::nest(book, id)?;
        let spent = book.spent_for(id);
        let mut evaluation = BudgetEvaluation::default();

        if let Some(budget) = nest.budget.filter(|b| nest.is_expense() && *b > 0.0) {
            let ratio = spent / budget;
            if ratio < UNDER_BUDGET_RATIO {
                evaluation.under_80_percent = true;
            } else if ratio <= 1.0 {
                evaluation.between_80_and_100 = true;
            } else {
                evaluation.over_budget = true;
            }
        }

        if let Some(goal) = nest.goal {
            if goal.contains(spent) {
                evaluation.between_min_and_max_goal = true;
            } else if spent > goal.max {
                evaluation.above_max_goal = true;
            }
        }

        Ok(evaluation)
    }

    fn nest(book: &NestBook, id: Uuid) -> Result<&Nest, CoreError> {
        book.nest(id)
            .ok_or_else(|| CoreError::NestNotFound(id.to_string()))
    }
}
