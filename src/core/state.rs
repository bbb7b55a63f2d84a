//! Observable game state.
//!
//! `GameState` is everything a presentation layer needs to render a game:
//! phase, sequence, player progress, score, and the two display slots.
//!
//! Sequences use `im` persistent vectors so `GameEngine::snapshot` is an
//! O(1) clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Round state machine position.
///
/// Transitions are `Showing → Awaiting → (Showing | Over)`. `Over` holds
/// until the next `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The engine is revealing the sequence.
    #[default]
    Showing,
    /// The engine is waiting for player input.
    Awaiting,
    /// A mismatch ended the game.
    Over,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundPhase::Showing => "showing",
            RoundPhase::Awaiting => "awaiting",
            RoundPhase::Over => "over",
        };
        f.write_str(name)
    }
}

/// A display slot value: the lit symbol, or nothing.
///
/// Every change carries a fresh `id` so lighting the same symbol twice in a
/// row is still two distinct observations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayToken {
    /// Identity token, strictly increasing across both display slots.
    pub id: u64,
    /// Currently lit symbol.
    pub symbol: Option<Symbol>,
}

impl DisplayToken {
    /// Create a token.
    #[must_use]
    pub const fn new(id: u64, symbol: Option<Symbol>) -> Self {
        Self { id, symbol }
    }

    /// Is anything lit?
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.symbol.is_some()
    }
}

/// Transient correctness feedback for the last comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashSignal {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Authoritative game state.
///
/// Only the engine mutates this; consumers get clones via snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase.
    pub phase: RoundPhase,

    /// Symbols to reproduce. Append-only within a game.
    pub sequence: Vector<Symbol>,

    /// Player submissions this round. Never longer than `sequence`.
    pub player_input: Vector<Symbol>,

    /// Round counter (starts at 1).
    pub level: u32,

    /// Length of the last fully reproduced sequence.
    pub last_correct_length: usize,

    /// Symbols lit so far in the current reveal.
    pub shown_count: usize,

    /// Engine playback slot, used while `Showing`.
    pub engine_display: DisplayToken,

    /// Player tap slot, used while `Awaiting`.
    pub player_display: DisplayToken,

    /// Correctness feedback.
    pub flash: FlashSignal,
}

impl GameState {
    /// Create the pre-game state.
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }

    /// Length of the sequence.
    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Number of symbols entered this round.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.player_input.len()
    }

    /// Has the player reproduced the whole sequence this round?
    #[must_use]
    pub fn input_complete(&self) -> bool {
        !self.sequence.is_empty() && self.player_input.len() == self.sequence.len()
    }

    /// Score of the game so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.last_correct_length
    }
}
