//! nest-domain
//!
//! Pure domain models for Dragon Nest (moods, progression, nests, transactions).
//! No I/O, no CLI, no storage. Only data types, banding rules and core enums.

pub mod book;
pub mod common;
pub mod mood;
pub mod nest;
pub mod progression;
pub mod rules;

pub use book::*;
pub use common::*;
pub use mood::*;
pub use nest::*;
pub use progression::*;
pub use rules::*;
