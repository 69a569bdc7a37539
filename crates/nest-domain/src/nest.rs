//! Nests (spending and income categories) and the transactions filed into them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A user-defined spending or income category with an optional budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nest {
    pub id: Uuid,
    pub name: String,
    pub kind: NestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalRange>,
    pub created_at: DateTime<Utc>,
}

impl Nest {
    pub fn new(name: impl Into<String>, kind: NestKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            budget: None,
            goal: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_goal(mut self, goal: GoalRange) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == NestKind::Expense
    }

    /// Checks the creation rules: a non-blank name, a strictly positive
    /// budget for expense nests, and a well-formed goal range.
    pub fn validate(&self) -> Result<(), NestValidationError> {
        if self.name.trim().is_empty() {
            return Err(NestValidationError::EmptyName);
        }
        match self.budget {
            None if self.is_expense() => return Err(NestValidationError::MissingBudget),
            Some(amount) if !amount.is_finite() || amount <= 0.0 => {
                return Err(NestValidationError::NonPositiveBudget(amount))
            }
            _ => {}
        }
        if let Some(goal) = &self.goal {
            goal.validate()?;
        }
        Ok(())
    }
}

impl Identifiable for Nest {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Nest {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NestKind {
    Expense,
    Income,
}

impl fmt::Display for NestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NestKind::Expense => "Expense",
            NestKind::Income => "Income",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for NestKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(NestKind::Expense),
            "income" => Ok(NestKind::Income),
            other => Err(format!("unknown nest kind `{}`", other)),
        }
    }
}

/// Inclusive target range for the amount filed into a nest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalRange {
    pub min: f64,
    pub max: f64,
}

impl GoalRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }

    pub fn validate(&self) -> Result<(), NestValidationError> {
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || self.min < 0.0 || self.min > self.max {
            return Err(NestValidationError::InvalidGoal {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A single amount filed into a nest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NestTransaction {
    pub id: Uuid,
    pub nest_id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub has_photo: bool,
}

impl NestTransaction {
    pub fn new(nest_id: Uuid, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            nest_id,
            amount,
            date,
            note: None,
            has_photo: false,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_photo(mut self, has_photo: bool) -> Self {
        self.has_photo = has_photo;
        self
    }

    pub fn validate(&self) -> Result<(), NestValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(NestValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl Identifiable for NestTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NestValidationError {
    EmptyName,
    MissingBudget,
    NonPositiveBudget(f64),
    InvalidGoal { min: f64, max: f64 },
    NonPositiveAmount(f64),
}

impl fmt::Display for NestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestValidationError::EmptyName => f.write_str("nest name must not be empty"),
            NestValidationError::MissingBudget => {
                f.write_str("expense nests require a budget")
            }
            NestValidationError::NonPositiveBudget(amount) => {
                write!(f, "budget must be greater than zero (got {})", amount)
            }
            NestValidationError::InvalidGoal { min, max } => {
                write!(f, "goal range {}..={} is not valid", min, max)
            }
            NestValidationError::NonPositiveAmount(amount) => {
                write!(f, "amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for NestValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_nest_requires_positive_budget() {
        let nest = Nest::new("Groceries", NestKind::Expense);
        assert_eq!(nest.validate(), Err(NestValidationError::MissingBudget));

        let zero = Nest::new("Groceries", NestKind::Expense).with_budget(0.0);
        assert_eq!(
            zero.validate(),
            Err(NestValidationError::NonPositiveBudget(0.0))
        );

        let ok = Nest::new("Groceries", NestKind::Expense).with_budget(400.0);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn income_nest_may_omit_budget() {
        let nest = Nest::new("Salary", NestKind::Income);
        assert!(nest.validate().is_ok());
    }

    #[test]
    fn blank_name_and_inverted_goal_are_rejected() {
        let blank = Nest::new("   ", NestKind::Income);
        assert_eq!(blank.validate(), Err(NestValidationError::EmptyName));

        let inverted = Nest::new("Savings", NestKind::Income).with_goal(GoalRange::new(50.0, 10.0));
        assert!(matches!(
            inverted.validate(),
            Err(NestValidationError::InvalidGoal { .. })
        ));
    }

    #[test]
    fn transaction_amount_must_be_positive() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let txn = NestTransaction::new(Uuid::new_v4(), -3.0, date);
        assert!(txn.validate().is_err());
        assert!(NestTransaction::new(Uuid::new_v4(), 3.0, date)
            .validate()
            .is_ok());
    }

    #[test]
    fn nest_survives_serialization_roundtrip() {
        let nest = Nest::new("Fun", NestKind::Expense)
            .with_budget(120.0)
            .with_goal(GoalRange::new(20.0, 100.0));
        let json = serde_json::to_string(&nest).expect("serialize");
        let restored: Nest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, nest);
    }
}
