//! Synchronous publish/subscribe hub.
//!
//! DESIGN
//! ======
//! The bus is owned by the scene controller and handed the mutable context
//! (`C`) at dispatch time, so handlers mutate shared state without holding
//! references to each other. Delivery is single threaded and ordered:
//! events are processed FIFO, and each event reaches its subscribers in
//! registration order. Events emitted from inside a handler go through an
//! [`Outbox`] and are delivered after the current event completes, which
//! keeps dispatch free of re-entrancy.
//!
//! A failing handler is logged and counted; the remaining subscribers still
//! receive the event.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

use std::collections::VecDeque;

use crate::error::SceneError;

/// Topic that receives every event.
pub const ANY_TOPIC: &str = "*";

/// Events routable by the bus.
pub trait Topic {
    fn topic(&self) -> &str;
}

impl Topic for wire::Message {
    fn topic(&self) -> &str {
        self.kind()
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Events queued by a handler for delivery after the current event.
pub struct Outbox<E> {
    events: Vec<E>,
}

impl<E> Outbox<E> {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: E) {
        self.events.push(event);
    }
}

type Handler<C, E> = Box<dyn FnMut(&mut C, &E, &mut Outbox<E>) -> Result<(), SceneError>>;

struct Subscription<C, E> {
    id: SubscriptionId,
    topic: String,
    handler: Handler<C, E>,
}

/// Counters for one [`EventBus::dispatch`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events taken off the queue, including ones emitted by handlers.
    pub events: usize,
    /// Handler invocations.
    pub deliveries: usize,
    /// Handler invocations that returned an error.
    pub failures: usize,
}

pub struct EventBus<C, E> {
    subscriptions: Vec<Subscription<C, E>>,
    queue: VecDeque<E>,
    next_id: u64,
}

impl<C, E: Topic> EventBus<C, E> {
    #[must_use]
    pub fn new() -> Self {
        Self { subscriptions: Vec::new(), queue: VecDeque::new(), next_id: 0 }
    }

    /// Subscribe `handler` to `topic` (or [`ANY_TOPIC`]).
    pub fn on<F>(&mut self, topic: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &E, &mut Outbox<E>) -> Result<(), SceneError> + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription { id, topic: topic.into(), handler: Box::new(handler) });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Queue an event for the next [`dispatch`](Self::dispatch).
    pub fn emit(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Deliver queued events until the queue is empty.
    pub fn dispatch(&mut self, ctx: &mut C) -> DispatchReport {
        let mut report = DispatchReport::default();
        while let Some(event) = self.queue.pop_front() {
            report.events += 1;
            let mut outbox = Outbox::new();
            for sub in &mut self.subscriptions {
                if sub.topic != event.topic() && sub.topic != ANY_TOPIC {
                    continue;
                }
                report.deliveries += 1;
                if let Err(error) = (sub.handler)(ctx, &event, &mut outbox) {
                    report.failures += 1;
                    tracing::warn!(topic = event.topic(), subscription = sub.id.0, %error, "event handler failed");
                }
            }
            self.queue.extend(outbox.events);
        }
        report
    }

    /// Number of subscriptions that would receive an event on `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.topic == topic || s.topic == ANY_TOPIC)
            .count()
    }

    /// Events emitted but not yet dispatched.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<C, E: Topic> Default for EventBus<C, E> {
    fn default() -> Self {
        Self::new()
    }
}
