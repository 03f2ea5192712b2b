//! Inventory domain module.
//!
//! Items (weapons, armor, rings, shoes) and the bounded manager that owns
//! them, implemented as deterministic domain logic (no IO, no rendering).

pub mod item;
pub mod manager;

pub use item::{Item, ItemCategory, ItemKind, Level, Rank};
pub use manager::{
    AGGREGATE_TYPE, AddItem, InventoryCommand, InventoryEvent, ItemAdded, ItemLeveledUp,
    ItemManager, ItemRemoved, ItemsSynthesized, LevelUp, RemoveItem, Synthesize,
};
