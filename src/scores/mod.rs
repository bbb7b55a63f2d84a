//! High-score persistence, on the caller's side of the engine.
//!
//! The engine reports a final score; this module decides whether it is a new
//! best and stores it. Store failures are returned to the caller and never
//! affect engine state.

pub mod record;
pub mod store;

pub use record::{sort_best_first, ScoreRecord};
pub use store::{record_if_best, JsonlScoreStore, MemoryScoreStore, RecordOutcome, ScoreStore};
