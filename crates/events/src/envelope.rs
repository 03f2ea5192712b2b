use serde::{Deserialize, Serialize};
use uuid::Uuid;

use armory_core::ManagerId;

/// Envelope for an event, containing stream metadata.
///
/// - `sequence_number` is monotonically increasing per aggregate stream and
///   equals the aggregate version right after the event was applied.
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: ManagerId,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_id: ManagerId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    /// Wrap a batch of freshly applied events.
    ///
    /// `version_before` is the aggregate version before the batch was applied;
    /// the envelopes are numbered `version_before + 1 ..`.
    pub fn wrap_batch(
        aggregate_id: ManagerId,
        aggregate_type: &str,
        version_before: u64,
        events: impl IntoIterator<Item = E>,
    ) -> Vec<Self> {
        events
            .into_iter()
            .zip(version_before + 1..)
            .map(|(payload, seq)| {
                Self::new(Uuid::now_v7(), aggregate_id, aggregate_type, seq, payload)
            })
            .collect()
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> ManagerId {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_batch_numbers_after_previous_version() {
        let manager = ManagerId::new();
        let envelopes = EventEnvelope::wrap_batch(manager, "test.stream", 4, ["a", "b"]);

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].sequence_number(), 5);
        assert_eq!(envelopes[1].sequence_number(), 6);
        assert_eq!(*envelopes[1].payload(), "b");
        assert_eq!(envelopes[0].aggregate_id(), manager);
        assert_eq!(envelopes[0].aggregate_type(), "test.stream");
        assert_ne!(envelopes[0].event_id(), envelopes[1].event_id());
    }
}
