//! Timed event scheduling.
//!
//! Reveal pacing, input holds, flash holds, and the round-advance delay are
//! all entries on one `Timeline`: `(deadline, action, generation)` triples
//! popped in deadline order. The engine compares each entry's generation
//! against its own before acting, so entries left over from a superseded
//! round fire as no-ops.

pub mod action;
pub mod timeline;

pub use action::TimedAction;
pub use timeline::{Generation, ScheduledEvent, Tick, Timeline};
