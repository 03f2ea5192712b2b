use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use armory_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Entity, ItemId, ManagerId};
use armory_events::{Command, Event};

use crate::item::{Item, Level, Rank};

/// Aggregate type tag used on event envelopes.
pub const AGGREGATE_TYPE: &str = "inventory.manager";

/// Aggregate root: ItemManager.
///
/// Owns a bounded, ordered collection of items. Removals and synthesis close
/// gaps without reordering the survivors.
///
/// `add` refuses an id that is already present, but synthesis renumbers its
/// target to `max(target, ingredient) + 1` even when a third item already
/// carries that id. Once ids repeat, every lookup by id (`get`, `remove`,
/// `level_up`, synthesis) acts on the first match in sequence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemManager {
    id: ManagerId,
    capacity: usize,
    items: Vec<Item>,
    version: u64,
}

impl ItemManager {
    pub fn new(capacity: usize) -> DomainResult<Self> {
        Self::with_id(ManagerId::new(), capacity)
    }

    pub fn with_id(id: ManagerId, capacity: usize) -> DomainResult<Self> {
        if capacity == 0 {
            return Err(DomainError::validation("capacity must be at least 1"));
        }
        Ok(Self {
            id,
            capacity,
            items: Vec::with_capacity(capacity),
            version: 0,
        })
    }

    pub fn id_typed(&self) -> ManagerId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id_typed).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.has_id(&id))
    }

    /// `describe()` of every item, in order.
    pub fn list(&self) -> Vec<String> {
        self.items.iter().map(Item::describe).collect()
    }

    /// Run a command through `handle` + `apply`.
    ///
    /// The command is borrowed, so on rejection the caller still holds
    /// everything it carried (including an item that could not be added).
    pub fn execute(&mut self, command: &InventoryCommand) -> DomainResult<Vec<InventoryEvent>> {
        armory_events::execute(self, command)
    }

    /// Add `item` at the end of the collection.
    ///
    /// On rejection the item is dropped; build an [`AddItem`] and call
    /// [`ItemManager::execute`] to keep it.
    pub fn add(&mut self, item: Item) -> DomainResult<Vec<InventoryEvent>> {
        let cmd = InventoryCommand::AddItem(AddItem {
            manager_id: self.id,
            item,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)
    }

    pub fn remove(&mut self, item_id: ItemId) -> DomainResult<Vec<InventoryEvent>> {
        let cmd = InventoryCommand::RemoveItem(RemoveItem {
            manager_id: self.id,
            item_id,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)
    }

    /// Level up the item with `item_id`. At the level cap this succeeds
    /// without emitting anything.
    pub fn level_up(&mut self, item_id: ItemId) -> DomainResult<Vec<InventoryEvent>> {
        let cmd = InventoryCommand::LevelUp(LevelUp {
            manager_id: self.id,
            item_id,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)
    }

    /// Consume `ingredient_id` to raise `target_id` one rank and renumber it.
    pub fn synthesize(
        &mut self,
        target_id: ItemId,
        ingredient_id: ItemId,
    ) -> DomainResult<Vec<InventoryEvent>> {
        let cmd = InventoryCommand::Synthesize(Synthesize {
            manager_id: self.id,
            target_id,
            ingredient_id,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.has_id(&id))
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.has_id(&id))
    }

    /// Detach the item with `id`, shifting later items one slot left.
    fn detach(&mut self, id: ItemId) -> Option<Item> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }
}

impl AggregateRoot for ItemManager {
    type Id = ManagerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub manager_id: ManagerId,
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub manager_id: ManagerId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: LevelUp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub manager_id: ManagerId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesize {
    pub manager_id: ManagerId,
    pub target_id: ItemId,
    pub ingredient_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    LevelUp(LevelUp),
    Synthesize(Synthesize),
}

impl Command for InventoryCommand {
    fn target_aggregate_id(&self) -> ManagerId {
        match self {
            InventoryCommand::AddItem(c) => c.manager_id,
            InventoryCommand::RemoveItem(c) => c.manager_id,
            InventoryCommand::LevelUp(c) => c.manager_id,
            InventoryCommand::Synthesize(c) => c.manager_id,
        }
    }
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub manager_id: ManagerId,
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub manager_id: ManagerId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemLeveledUp. `level` is the level after the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLeveledUp {
    pub manager_id: ManagerId,
    pub item_id: ItemId,
    pub level: Level,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemsSynthesized. `rank` is the target's rank after the step.
///
/// The indexes are sequence positions before the step, so replay does not
/// depend on ids being unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsSynthesized {
    pub manager_id: ManagerId,
    pub target_id: ItemId,
    pub target_index: usize,
    pub ingredient_id: ItemId,
    pub ingredient_index: usize,
    pub new_id: ItemId,
    pub rank: Rank,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    ItemLeveledUp(ItemLeveledUp),
    ItemsSynthesized(ItemsSynthesized),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
            InventoryEvent::ItemLeveledUp(_) => "inventory.item.leveled_up",
            InventoryEvent::ItemsSynthesized(_) => "inventory.items.synthesized",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::ItemLeveledUp(e) => e.occurred_at,
            InventoryEvent::ItemsSynthesized(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ItemManager {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            InventoryEvent::ItemRemoved(e) => {
                self.detach(e.item_id);
            }
            InventoryEvent::ItemLeveledUp(e) => {
                if let Some(item) = self.item_mut(e.item_id) {
                    item.set_level(e.level);
                }
            }
            InventoryEvent::ItemsSynthesized(e) => {
                if e.ingredient_index < self.items.len() {
                    self.items.remove(e.ingredient_index);
                }
                let slot = if e.ingredient_index < e.target_index {
                    e.target_index - 1
                } else {
                    e.target_index
                };
                if let Some(target) = self.items.get_mut(slot) {
                    target.set_rank(e.rank);
                    target.set_id(e.new_id);
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.ensure_manager(command.target_aggregate_id())?;
        match command {
            InventoryCommand::AddItem(cmd) => self.handle_add(cmd),
            InventoryCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            InventoryCommand::LevelUp(cmd) => self.handle_level_up(cmd),
            InventoryCommand::Synthesize(cmd) => self.handle_synthesize(cmd),
        }
    }
}

impl ItemManager {
    fn ensure_manager(&self, manager_id: ManagerId) -> Result<(), DomainError> {
        if self.id != manager_id {
            return Err(DomainError::invariant("manager_id mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.is_full() {
            return Err(DomainError::capacity_exceeded(self.capacity));
        }
        let id = cmd.item.id_typed();
        if self.position(id).is_some() {
            return Err(DomainError::duplicate_id(id));
        }

        Ok(vec![InventoryEvent::ItemAdded(ItemAdded {
            manager_id: cmd.manager_id,
            item: cmd.item.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.position(cmd.item_id).is_none() {
            return Err(DomainError::not_found(cmd.item_id));
        }

        Ok(vec![InventoryEvent::ItemRemoved(ItemRemoved {
            manager_id: cmd.manager_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_level_up(&self, cmd: &LevelUp) -> Result<Vec<InventoryEvent>, DomainError> {
        let item = self
            .get(cmd.item_id)
            .ok_or_else(|| DomainError::not_found(cmd.item_id))?;

        let level = item.level();
        if level.is_max() {
            return Ok(Vec::new());
        }

        Ok(vec![InventoryEvent::ItemLeveledUp(ItemLeveledUp {
            manager_id: cmd.manager_id,
            item_id: cmd.item_id,
            level: level.advanced(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_synthesize(&self, cmd: &Synthesize) -> Result<Vec<InventoryEvent>, DomainError> {
        let mut target = None;
        let mut ingredient = None;
        for (index, item) in self.items.iter().enumerate() {
            if target.is_none() && item.has_id(&cmd.target_id) {
                target = Some(index);
            } else if ingredient.is_none() && item.has_id(&cmd.ingredient_id) {
                ingredient = Some(index);
            }
        }

        let (target, ingredient) = match (target, ingredient) {
            (Some(t), Some(i)) if cmd.target_id != cmd.ingredient_id => (t, i),
            (None, _) => {
                return Err(DomainError::invalid_id(format!(
                    "synthesis target {} not found",
                    cmd.target_id
                )));
            }
            _ if cmd.target_id == cmd.ingredient_id => {
                return Err(DomainError::invalid_id(format!(
                    "item {} cannot be synthesized with itself",
                    cmd.target_id
                )));
            }
            _ => {
                return Err(DomainError::invalid_id(format!(
                    "synthesis ingredient {} not found",
                    cmd.ingredient_id
                )));
            }
        };

        let new_id = cmd
            .target_id
            .max(cmd.ingredient_id)
            .successor()
            .ok_or_else(|| DomainError::invalid_id("synthesized id overflows"))?;

        Ok(vec![InventoryEvent::ItemsSynthesized(ItemsSynthesized {
            manager_id: cmd.manager_id,
            target_id: cmd.target_id,
            target_index: target,
            ingredient_id: cmd.ingredient_id,
            ingredient_index: ingredient,
            new_id,
            rank: self.items[target].rank().advanced(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
