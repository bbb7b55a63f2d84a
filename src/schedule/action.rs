//! Actions the engine schedules for itself.

use serde::{Deserialize, Serialize};

/// A deferred state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimedAction {
    /// Light `sequence[index]` on the engine display.
    Reveal { index: usize },

    /// Clear the engine display after a reveal.
    Conceal,

    /// End the reveal and start accepting input.
    FinishReveal,

    /// Clear the player display if it still shows the tap with `token`.
    ReleaseInput { token: u64 },

    /// Clear the flash if it is still the one raised as `serial`.
    ClearFlash { serial: u64 },

    /// Extend the sequence and replay it.
    AdvanceRound,
}

impl TimedAction {
    /// Does this action belong to one reveal schedule?
    ///
    /// Round-bound actions are dropped when their generation is stale.
    /// `ClearFlash` is matched by serial instead.
    #[must_use]
    pub const fn is_round_bound(&self) -> bool {
        !matches!(self, TimedAction::ClearFlash { .. })
    }
}
