//! Game engine: round state machine, reveal scheduling, scoring.
//!
//! `GameEngine` owns all mutable game state. Its inputs are two commands
//! (`start`, `submit_input`) and the passage of time (`advance`,
//! `advance_to`); its outputs are `EngineEvent`s and read-only state.

pub mod game;
pub mod views;

pub use game::GameEngine;
pub use views::{progress_text, status_text};
