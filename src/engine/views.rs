//! Derived read-only views for presentation layers.
//!
//! Pure functions of `GameState`; nothing here is stored.

use crate::core::{GameState, RoundPhase};

/// Progress through the current round.
///
/// While showing: symbols revealed so far over sequence length.
/// Otherwise: symbols entered over sequence length.
#[must_use]
pub fn progress_text(state: &GameState) -> String {
    let done = match state.phase {
        RoundPhase::Showing => state.shown_count,
        RoundPhase::Awaiting | RoundPhase::Over => state.player_input.len(),
    };
    format!("{}/{}", done, state.sequence.len())
}

/// Status line for a phase.
#[must_use]
pub const fn status_text(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Showing => "Memorize...",
        RoundPhase::Awaiting => "Repeat the combination",
        RoundPhase::Over => "Game over",
    }
}
