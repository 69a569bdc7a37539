//! The nest book: every nest and the transactions filed into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::DayCode,
    mood::NestMood,
    nest::{Nest, NestTransaction},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestBook {
    #[serde(default)]
    pub nests: Vec<Nest>,
    #[serde(default)]
    pub transactions: Vec<NestTransaction>,
    /// Day of the last budget evaluation; one evaluation counts per day.
    #[serde(default)]
    pub last_evaluated: DayCode,
    pub updated_at: DateTime<Utc>,
}

impl Default for NestBook {
    fn default() -> Self {
        Self::new()
    }
}

impl NestBook {
    pub fn new() -> Self {
        Self {
            nests: Vec::new(),
            transactions: Vec::new(),
            last_evaluated: DayCode::NONE,
            updated_at: Utc::now(),
        }
    }

    pub fn nest(&self, id: Uuid) -> Option<&Nest> {
        self.nests.iter().find(|nest| nest.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn nest_by_name(&self, name: &str) -> Option<&Nest> {
        let wanted = name.trim();
        self.nests
            .iter()
            .find(|nest| nest.name.eq_ignore_ascii_case(wanted))
    }

    pub fn add_nest(&mut self, nest: Nest) -> Uuid {
        let id = nest.id;
        self.nests.push(nest);
        self.touch();
        id
    }

    /// Removes a nest together with its transactions.
    pub fn remove_nest(&mut self, id: Uuid) -> Option<Nest> {
        let index = self.nests.iter().position(|nest| nest.id == id)?;
        let removed = self.nests.remove(index);
        self.transactions.retain(|txn| txn.nest_id != id);
        self.touch();
        Some(removed)
    }

    pub fn add_transaction(&mut self, transaction: NestTransaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transactions_for(&self, nest_id: Uuid) -> impl Iterator<Item = &NestTransaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.nest_id == nest_id)
    }

    /// Sum of every transaction amount filed into the nest.
    pub fn spent_for(&self, nest_id: Uuid) -> f64 {
        self.transactions_for(nest_id).map(|txn| txn.amount).sum()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Progress and mood of a single nest, computed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NestProgress {
    pub nest_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub spent: f64,
    pub progress: f64,
    pub mood: NestMood,
}
