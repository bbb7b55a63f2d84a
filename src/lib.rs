//! # recall-engine
//!
//! A sequence-memory ("simon says") game engine. The engine grows a random
//! sequence of symbols, reveals it step by step on a fixed cadence, then
//! checks the player's reproduction; one wrong symbol ends the game.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, storage, or navigation. The engine holds
//!    authoritative state and reports changes; presentation, high-score
//!    persistence, and haptics are collaborators.
//!
//! 2. **Explicit Time**: Every delay is an entry on a deadline queue driven
//!    by `advance`. Tests run a whole game without sleeping.
//!
//! 3. **Stale-Proof Scheduling**: Each reveal schedule has a generation.
//!    Timers from a superseded round fire as no-ops.
//!
//! ## Modules
//!
//! - `core`: Symbols, alphabet, RNG, configuration, observable state
//! - `schedule`: Virtual clock, generations, deadline queue
//! - `events`: Notifications, observers, feedback sink
//! - `engine`: `GameEngine` state machine and derived views
//! - `scores`: High-score records and stores (caller side)
//! - `runtime`: tokio single-consumer driver (feature `runtime`)
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod error;
pub mod schedule;
pub mod events;
pub mod engine;
pub mod scores;

#[cfg(feature = "runtime")]
pub mod runtime;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Alphabet, Symbol,
    GameRng,
    EngineConfig, TimingConfig,
    DisplayToken, FlashSignal, GameState, RoundPhase,
};

pub use crate::error::{ConfigError, RuntimeError, StoreError};

pub use crate::schedule::{Generation, ScheduledEvent, Tick, TimedAction, Timeline};

pub use crate::events::{
    EngineEvent, EventBatch,
    Feedback, FeedbackSink,
    Observer, ObserverRegistry, SubscriptionId,
};

pub use crate::engine::GameEngine;

pub use crate::scores::{
    record_if_best, JsonlScoreStore, MemoryScoreStore, RecordOutcome, ScoreRecord, ScoreStore,
};
