//! Virtual clock and deadline queue.
//!
//! The timeline never sleeps. Callers move it forward and it hands back due
//! entries one at a time, earliest deadline first, ties in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::TimedAction;

/// A point on the engine clock, in milliseconds since the engine was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// The engine epoch.
    pub const ZERO: Tick = Tick(0);

    /// Create a tick from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create a tick from an elapsed duration, truncated to milliseconds.
    #[must_use]
    pub fn from_duration(elapsed: Duration) -> Self {
        Self(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    /// Milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Elapsed time since the epoch.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// This tick plus `ms` milliseconds.
    #[must_use]
    pub const fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

/// Identifies one reveal schedule.
///
/// Bumped each time a `Showing` phase begins. Entries scheduled under an
/// older generation are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// A pending timed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// When the action fires.
    pub at: Tick,
    /// Generation captured at scheduling time.
    pub generation: Generation,
    /// What to do.
    pub action: TimedAction,
    /// Insertion order, breaks deadline ties.
    seq: u64,
}

impl ScheduledEvent {
    #[cfg(test)]
    pub(crate) fn for_test(at: Tick, generation: Generation, action: TimedAction) -> Self {
        Self {
            at,
            generation,
            action,
            seq: 0,
        }
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest deadline, then earliest insertion, is greatest
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deadline queue with its own clock.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    now: Tick,
    queue: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
}

impl Timeline {
    /// Create an empty timeline at the epoch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Number of pending entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Are there no pending entries?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Tick> {
        self.queue.peek().map(|e| e.at)
    }

    /// Schedule `action` to fire `delay_ms` after the current clock reading.
    pub fn schedule_after(
        &mut self,
        delay_ms: u64,
        generation: Generation,
        action: TimedAction,
    ) -> Tick {
        let at = self.now.after(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(ScheduledEvent {
            at,
            generation,
            action,
            seq,
        });
        at
    }

    /// Pop the next entry due at or before `target`.
    ///
    /// The clock moves to the entry's deadline, so anything scheduled while
    /// handling it is relative to when it fired.
    pub fn pop_due(&mut self, target: Tick) -> Option<ScheduledEvent> {
        if self.queue.peek()?.at > target {
            return None;
        }
        let entry = self.queue.pop()?;
        if entry.at > self.now {
            self.now = entry.at;
        }
        Some(entry)
    }

    /// Move the clock to `target` once nothing more is due.
    ///
    /// The clock never runs backwards.
    pub fn settle(&mut self, target: Tick) {
        if target > self.now {
            self.now = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timeline: &mut Timeline, target: Tick) -> Vec<(u64, TimedAction)> {
        let mut out = Vec::new();
        while let Some(entry) = timeline.pop_due(target) {
            out.push((entry.at.as_millis(), entry.action));
        }
        timeline.settle(target);
        out
    }

    #[test]
    fn test_tick() {
        let t = Tick::from_millis(100).after(50);
        assert_eq!(t.as_millis(), 150);
        assert_eq!(t.as_duration(), Duration::from_millis(150));
        assert_eq!(Tick::from_duration(Duration::from_micros(2_999)), Tick(2));
        assert_eq!(format!("{}", t), "t+150ms");
        assert_eq!(Tick(u64::MAX).after(1), Tick(u64::MAX));
    }

    #[test]
    fn test_generation() {
        let g = Generation::default();
        assert_eq!(g.next(), Generation(1));
        assert_eq!(format!("{}", g.next().next()), "Gen(2)");
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timeline = Timeline::new();
        let g = Generation(1);
        timeline.schedule_after(300, g, TimedAction::FinishReveal);
        timeline.schedule_after(100, g, TimedAction::Reveal { index: 0 });
        timeline.schedule_after(200, g, TimedAction::Conceal);

        let fired = drain(&mut timeline, Tick(1000));
        assert_eq!(
            fired,
            vec![
                (100, TimedAction::Reveal { index: 0 }),
                (200, TimedAction::Conceal),
                (300, TimedAction::FinishReveal),
            ]
        );
        assert_eq!(timeline.now(), Tick(1000));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut timeline = Timeline::new();
        let g = Generation(1);
        timeline.schedule_after(100, g, TimedAction::Conceal);
        timeline.schedule_after(100, g, TimedAction::AdvanceRound);
        timeline.schedule_after(100, g, TimedAction::FinishReveal);

        let fired: Vec<_> = drain(&mut timeline, Tick(100))
            .into_iter()
            .map(|(_, a)| a)
            .collect();
        assert_eq!(
            fired,
            vec![TimedAction::Conceal, TimedAction::AdvanceRound, TimedAction::FinishReveal]
        );
    }

    #[test]
    fn test_pop_due_respects_target() {
        let mut timeline = Timeline::new();
        timeline.schedule_after(500, Generation(1), TimedAction::Conceal);

        assert!(timeline.pop_due(Tick(499)).is_none());
        assert_eq!(timeline.next_deadline(), Some(Tick(500)));

        let entry = timeline.pop_due(Tick(500)).unwrap();
        assert_eq!(entry.generation, Generation(1));
        assert_eq!(timeline.now(), Tick(500));
    }

    #[test]
    fn test_schedule_relative_to_fire_time() {
        let mut timeline = Timeline::new();
        timeline.schedule_after(100, Generation(1), TimedAction::AdvanceRound);

        let _ = timeline.pop_due(Tick(1000)).unwrap();
        let at = timeline.schedule_after(50, Generation(2), TimedAction::Conceal);
        assert_eq!(at, Tick(150));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut timeline = Timeline::new();
        timeline.settle(Tick(200));
        timeline.settle(Tick(100));
        assert_eq!(timeline.now(), Tick(200));
    }
}
