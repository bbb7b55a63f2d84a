//! Notification surface of the engine.
//!
//! The engine never renders anything. It reports state changes as
//! `EngineEvent`s to subscribed observers and comparison outcomes to an
//! optional `FeedbackSink`.

pub mod event;
pub mod observer;

pub use event::{EngineEvent, EventBatch};
pub use observer::{Feedback, FeedbackSink, Observer, ObserverRegistry, SubscriptionId};
