#![doc(test(attr(deny(warnings))))]

//! Dragon Nest tracks spending in nests and raises a dragon whose level and
//! mood follow the user's financial habits.
//!
//! [`app::DragonNest`] wires the reward engine, nest storage and configuration
//! together; the crates under `crates/` hold the domain model and rules.

pub mod app;
pub mod cli;
pub mod clock;
pub mod errors;
pub mod utils;

pub use app::{DragonNest, LoggedTransaction};
pub use errors::{AppError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Dragon Nest tracing initialized.");
    });
}
