pub mod accuracy;
pub mod circuit_breaker;
pub mod config;
pub mod curriculum;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod notifications;
pub mod persistence;
pub mod questions;
pub mod rewards;
pub mod state;

pub use config::engine::EngineConfig;
pub use difficulty::{Adjustment, DifficultyTier};
pub use engine::ProgressionEngine;
pub use error::ProgressError;
pub use ledger::{AnswerEvent, AnswerLedger};

// Unit tests that reach crate internals
#[cfg(test)]
#[path = "../tests/unit/mod.rs"]
mod unit_tests;
