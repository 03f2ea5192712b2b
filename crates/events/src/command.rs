use armory_core::ManagerId;

/// A command targets a specific aggregate (command abstraction).
///
/// Commands represent **intent**: a request that the aggregate may reject.
/// Accepted commands turn into events; rejected ones leave no trace in state.
///
/// - **Command**: "synthesize item 2 with item 3"
/// - **Event**: "ItemsSynthesized { target: 2, ingredient: 3, new_id: 4 }"
///
/// Commands own all their data (`'static`) so they can be queued, logged or
/// replayed from a script without borrowing from the caller.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> ManagerId;
}
