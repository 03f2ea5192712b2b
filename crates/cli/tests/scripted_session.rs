//! Black-box run of a scripted session through the public driver API.

use armory_cli::{Driver, Outcome, script};
use armory_core::{AggregateRoot, DomainError, ItemId};
use armory_inventory::Rank;

const REFERENCE_SCRIPT: &str = r#"[
    {"add": {"id": 1, "name": "Dagger", "level": 1, "rank": "A", "category": "weapon", "power": 10}},
    {"add": {"id": 2, "name": "Armor", "level": 1, "rank": "B", "category": "armor", "defence": 5}},
    {"add": {"id": 3, "name": "Armor II", "level": 1, "rank": "B", "category": "armor", "defence": 3}},
    {"level_up": {"id": 1}},
    {"synthesize": {"target": 2, "ingredient": 3}}
]"#;

fn ids(raw: &[i64]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::new).collect()
}

#[test]
fn reference_script_ends_with_items_one_and_four() {
    let steps = script::parse(REFERENCE_SCRIPT).unwrap();
    let mut driver = Driver::new(8, false, Vec::new()).unwrap();

    let outcomes = driver.run_script(&steps).unwrap();

    assert!(outcomes.iter().all(|o| matches!(o, Outcome::Applied(1))));
    let manager = driver.manager();
    assert_eq!(manager.ids(), ids(&[1, 4]));
    assert_eq!(manager.get(ItemId::new(1)).unwrap().level().value(), 2);
    assert_eq!(manager.get(ItemId::new(4)).unwrap().rank(), Rank::A);
    assert_eq!(manager.version(), 5);

    let text = String::from_utf8(driver.into_output()).unwrap();
    assert!(text.contains("[ level up ] item 1 is now level 2"));
    assert!(text.contains("[ synthesis ] 2 + 3 -> 4 (rank A)"));
    assert!(text.trim_end().ends_with(
        "Inventory (2/8)\n\
         1, Name : Dagger, Level : 2, Rank : A, Power : 10\n\
         4, Name : Armor, Level : 1, Rank : A, Defence : 5"
    ));
}

#[test]
fn rejected_steps_do_not_stop_the_script() {
    let steps = script::parse(
        r#"[
            {"add": {"id": 1, "name": "Band", "level": 0, "rank": "C", "category": "ring", "magic": 2}},
            {"add": {"id": 2, "name": "Boots", "level": 0, "rank": "C", "category": "shoe", "speed": 1}},
            {"remove": {"id": 9}},
            {"synthesize": {"target": 1, "ingredient": 9}},
            {"remove": {"id": 1}}
        ]"#,
    )
    .unwrap();
    let mut driver = Driver::new(1, false, Vec::new()).unwrap();

    let outcomes = driver.run_script(&steps).unwrap();

    assert_eq!(outcomes[0], Outcome::Applied(1));
    assert_eq!(
        outcomes[1],
        Outcome::Rejected(DomainError::CapacityExceeded { capacity: 1 })
    );
    assert_eq!(outcomes[2], Outcome::Rejected(DomainError::NotFound(ItemId::new(9))));
    assert!(matches!(outcomes[3], Outcome::Rejected(DomainError::InvalidIdentifier(_))));
    assert_eq!(outcomes[4], Outcome::Applied(1));
    assert!(driver.manager().is_empty());
}

#[test]
fn json_rendering_emits_one_snapshot_per_step() {
    let steps = script::parse(REFERENCE_SCRIPT).unwrap();
    let mut driver = Driver::new(8, true, Vec::new()).unwrap();
    driver.run_script(&steps).unwrap();

    let text = String::from_utf8(driver.into_output()).unwrap();
    assert_eq!(text.matches("\"capacity\": 8").count(), steps.len());
}
