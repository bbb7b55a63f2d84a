//! Observers and the feedback sink.
//!
//! Observers receive every `EngineEvent` in order. The feedback sink is a
//! narrower collaborator that only hears about comparison outcomes, for
//! haptic or audio output.

use serde::{Deserialize, Serialize};

use super::event::EngineEvent;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Receives engine notifications.
///
/// Closures taking `&EngineEvent` are observers.
pub trait Observer: Send {
    fn notify(&mut self, event: &EngineEvent);
}

impl<F> Observer for F
where
    F: FnMut(&EngineEvent) + Send,
{
    fn notify(&mut self, event: &EngineEvent) {
        self(event)
    }
}

/// Ordered list of observers.
///
/// Delivery follows subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_id: u32,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Are there no observers?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer.
    pub fn dispatch(&mut self, event: &EngineEvent) {
        for (_, observer) in &mut self.observers {
            observer.notify(event);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Outcome of one comparison, for tactile or audio output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    Success,
    Failure,
}

/// Translates comparison outcomes into feedback.
///
/// The engine works the same with or without a sink.
pub trait FeedbackSink: Send {
    fn feedback(&mut self, feedback: Feedback);
}

impl<F> FeedbackSink for F
where
    F: FnMut(Feedback) + Send,
{
    fn feedback(&mut self, feedback: Feedback) {
        self(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundPhase;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        for name in ["first", "second"] {
            let log = Arc::clone(&log);
            registry.subscribe(Box::new(move |_: &EngineEvent| log.lock().unwrap().push(name)));
        }

        registry.dispatch(&EngineEvent::PhaseChanged(RoundPhase::Awaiting));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut registry = ObserverRegistry::new();

        let counter = Arc::clone(&count);
        let id = registry.subscribe(Box::new(move |_: &EngineEvent| *counter.lock().unwrap() += 1));
        assert_eq!(registry.len(), 1);

        registry.dispatch(&EngineEvent::GameOver { score: 0 });
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.dispatch(&EngineEvent::GameOver { score: 0 });

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_closure_feedback_sink() {
        let mut received = Vec::new();
        {
            let mut sink = |f: Feedback| received.push(f);
            sink.feedback(Feedback::Success);
            sink.feedback(Feedback::Failure);
        }
        assert_eq!(received, vec![Feedback::Success, Feedback::Failure]);
    }
}
