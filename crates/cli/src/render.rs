//! Text and JSON views of the manager, plus one-line event announcements.

use serde::Serialize;

use armory_core::AggregateRoot;
use armory_inventory::{InventoryEvent, Item, ItemManager};

pub fn announce(event: &InventoryEvent) -> String {
    match event {
        InventoryEvent::ItemAdded(e) => format!("[ item added ]\n{}", e.item.describe()),
        InventoryEvent::ItemRemoved(e) => format!("[ item removed ] {}", e.item_id),
        InventoryEvent::ItemLeveledUp(e) => {
            format!("[ level up ] item {} is now level {}", e.item_id, e.level)
        }
        InventoryEvent::ItemsSynthesized(e) => format!(
            "[ synthesis ] {} + {} -> {} (rank {})",
            e.target_id, e.ingredient_id, e.new_id, e.rank
        ),
    }
}

pub fn text(manager: &ItemManager) -> String {
    let mut out = format!("Inventory ({}/{})\n", manager.len(), manager.capacity());
    for line in manager.list() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    capacity: usize,
    version: u64,
    items: &'a [Item],
}

pub fn json(manager: &ItemManager) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Snapshot {
        capacity: manager.capacity(),
        version: manager.version(),
        items: manager.items(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_core::ItemId;
    use armory_inventory::Rank;

    fn stocked() -> ItemManager {
        let mut manager = ItemManager::new(4).unwrap();
        manager.add(Item::ring(5, "Band", 2, Rank::B, 7).unwrap()).unwrap();
        manager.add(Item::shoe(6, "Boots", 0, Rank::C, 3).unwrap()).unwrap();
        manager
    }

    #[test]
    fn text_lists_items_under_a_header() {
        assert_eq!(
            text(&stocked()),
            "Inventory (2/4)\n\
             5, Name : Band, Level : 2, Rank : B, Magic : 7\n\
             6, Name : Boots, Level : 0, Rank : C, Speed : 3\n"
        );
    }

    #[test]
    fn json_snapshot_carries_capacity_and_items() {
        let value: serde_json::Value = serde_json::from_str(&json(&stocked()).unwrap()).unwrap();
        assert_eq!(value["capacity"], 4);
        assert_eq!(value["version"], 2);
        assert_eq!(value["items"][1]["category"], "shoe");
    }

    #[test]
    fn synthesis_announcement_names_all_ids() {
        let mut manager = stocked();
        let events = manager.synthesize(ItemId::new(5), ItemId::new(6)).unwrap();
        assert_eq!(announce(&events[0]), "[ synthesis ] 5 + 6 -> 7 (rank A)");
    }
}
