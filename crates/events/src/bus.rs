//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes facts after an aggregate has accepted a command. It
//! is not a store: the aggregate's own state is the source of truth, and a
//! subscriber that misses an event can always re-read the aggregate.

use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every message published after it was
/// created (broadcast semantics). Messages arrive in publish order.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// bus.publish(envelope)?;
/// for envelope in subscription.drain() {
///     announce(&envelope);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// Command → Aggregate (handle + apply) → Event Bus (publish) → Subscribers
/// ```
///
/// `publish()` can fail; the failure is surfaced to the caller, which may log
/// and continue since the aggregate already holds the new state.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
