//! Scripted sessions: a JSON array of steps run in order.
//!
//! ```json
//! [
//!   {"add": {"id": 1, "name": "Dagger", "level": 1, "rank": "A", "category": "weapon", "power": 10}},
//!   {"level_up": {"id": 1}},
//!   {"synthesize": {"target": 2, "ingredient": 3}},
//!   {"remove": {"id": 4}}
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use armory_core::{DomainResult, ItemId};
use armory_inventory::{Item, Rank};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Add(Item),
    Remove { id: ItemId },
    LevelUp { id: ItemId },
    Synthesize { target: ItemId, ingredient: ItemId },
}

pub fn parse(raw: &str) -> anyhow::Result<Vec<Step>> {
    serde_json::from_str(raw).context("script is not a JSON array of steps")
}

pub fn load(path: &Path) -> anyhow::Result<Vec<Step>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script at {}", path.display()))?;
    parse(&raw).with_context(|| format!("invalid script {}", path.display()))
}

/// The three items every interactive session starts with.
pub fn starter_items() -> DomainResult<Vec<Item>> {
    Ok(vec![
        Item::weapon(1, "Dagger", 1, Rank::A, 10)?,
        Item::armor(2, "Armor", 1, Rank::B, 5)?,
        Item::armor(3, "Armor II", 1, Rank::B, 3)?,
    ])
}
