//! Engine notifications.
//!
//! Every observable state change produces one event. Events are collected
//! while a command or timer runs and delivered once the change is complete,
//! in the order they happened.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DisplayToken, FlashSignal, RoundPhase, Symbol};

/// Something observable changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The round state machine moved.
    PhaseChanged(RoundPhase),

    /// A symbol was appended to the sequence.
    SequenceExtended { length: usize, symbol: Symbol },

    /// Another symbol of the reveal was lit.
    RevealProgressed { shown: usize, total: usize },

    /// Engine playback slot changed.
    EngineDisplayChanged(DisplayToken),

    /// Player tap slot changed.
    PlayerDisplayChanged(DisplayToken),

    /// A player submission was compared against the sequence.
    InputRecorded {
        index: usize,
        symbol: Symbol,
        correct: bool,
    },

    /// Correctness feedback was raised or cleared.
    FlashChanged(FlashSignal),

    /// The whole sequence was reproduced.
    RoundCompleted { length: usize, next_level: u32 },

    /// A mismatch ended the game with this score.
    GameOver { score: usize },
}

impl EngineEvent {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            EngineEvent::PhaseChanged(_) => "phase_changed",
            EngineEvent::SequenceExtended { .. } => "sequence_extended",
            EngineEvent::RevealProgressed { .. } => "reveal_progressed",
            EngineEvent::EngineDisplayChanged(_) => "engine_display_changed",
            EngineEvent::PlayerDisplayChanged(_) => "player_display_changed",
            EngineEvent::InputRecorded { .. } => "input_recorded",
            EngineEvent::FlashChanged(_) => "flash_changed",
            EngineEvent::RoundCompleted { .. } => "round_completed",
            EngineEvent::GameOver { .. } => "game_over",
        }
    }
}

/// Events produced by a single command or timer.
///
/// A round start produces around half a dozen; SmallVec keeps that off the heap.
pub type EventBatch = SmallVec<[EngineEvent; 8]>;
