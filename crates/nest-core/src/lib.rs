//! nest-core
//!
//! Reward engine, budget progress evaluation and nest services for Dragon Nest.
//! Depends on nest-domain. No CLI, no terminal I/O, no direct file access:
//! persistence is reached through the traits in [`storage`].

pub mod budget_progress;
pub mod error;
pub mod nest_service;
pub mod reward_engine;
pub mod state_channel;
pub mod storage;
pub mod time;

pub use budget_progress::BudgetProgress;
pub use error::CoreError;
pub use nest_service::NestService;
pub use reward_engine::RewardEngine;
pub use state_channel::{StateChannel, StateReceiver};
pub use storage::{MemoryProgressStore, NestStorage, ProgressStore};
pub use time::{Clock, FixedClock};
