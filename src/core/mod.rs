//! Core engine types: symbols, RNG, configuration, observable state.
//!
//! These are the plain data building blocks. Timing lives in `schedule`,
//! the state machine in `engine`.

pub mod symbol;
pub mod rng;
pub mod config;
pub mod state;

pub use symbol::{Alphabet, Symbol, DEFAULT_LABELS};
pub use rng::GameRng;
pub use config::{EngineConfig, TimingConfig};
pub use state::{DisplayToken, FlashSignal, GameState, RoundPhase};
