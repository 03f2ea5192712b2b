//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an item, chosen by whoever constructs the item.
///
/// Item ids are plain integers: synthesis derives new ids arithmetically
/// (`max(a, b) + 1`), so ordering and successor matter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// The id immediately after this one, or `None` on overflow.
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("ItemId: {s:?}: {e}")))?;
        Ok(Self(value))
    }
}

/// Identifier of a manager (aggregate root holding items).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerId(Uuid);

impl ManagerId {
    /// Create a new identifier (UUIDv7, time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ManagerId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ManagerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ManagerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("ManagerId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_parses_trimmed_integers() {
        assert_eq!(" 42\n".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert_eq!("-3".parse::<ItemId>().unwrap(), ItemId::new(-3));
    }

    #[test]
    fn item_id_rejects_garbage() {
        let err = "sword".parse::<ItemId>().unwrap_err();
        match err {
            DomainError::InvalidIdentifier(msg) if msg.contains("sword") => {}
            other => panic!("Expected InvalidIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn successor_is_none_on_overflow() {
        assert_eq!(ItemId::new(3).successor(), Some(ItemId::new(4)));
        assert_eq!(ItemId::new(i64::MAX).successor(), None);
    }

    #[test]
    fn item_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ItemId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn manager_id_round_trips_through_display() {
        let id = ManagerId::new();
        assert_eq!(id.to_string().parse::<ManagerId>().unwrap(), id);
    }
}
