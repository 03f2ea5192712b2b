use core::str::FromStr;

use serde::{Deserialize, Serialize};

use armory_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

/// Quality tier of an item, ordered `C < B < A < S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    C,
    B,
    A,
    S,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Rank::C, Rank::B, Rank::A, Rank::S];

    /// One step up the ladder; `S` stays `S`.
    pub fn advanced(self) -> Self {
        match self {
            Rank::C => Rank::B,
            Rank::B => Rank::A,
            Rank::A | Rank::S => Rank::S,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Rank::C => 'C',
            Rank::B => 'B',
            Rank::A => 'A',
            Rank::S => 'S',
        }
    }
}

impl ValueObject for Rank {}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Rank {
    type Error = DomainError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'C' => Ok(Rank::C),
            'B' => Ok(Rank::B),
            'A' => Ok(Rank::A),
            'S' => Ok(Rank::S),
            other => Err(DomainError::validation(format!(
                "unknown rank {other:?} (expected one of C, B, A, S)"
            ))),
        }
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(DomainError::validation(format!(
                "rank must be a single letter, got {s:?}"
            ))),
        }
    }
}

/// Item level, always within `0..=Level::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> DomainResult<Self> {
        if value > Self::MAX {
            return Err(DomainError::validation(format!(
                "level {value} is above the maximum of {}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_max(self) -> bool {
        self.0 == Self::MAX
    }

    /// One level higher, capped at `MAX`.
    pub fn advanced(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }
}

impl ValueObject for Level {}

impl TryFrom<u8> for Level {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Tag for the four item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Ring,
    Shoe,
}

impl ItemCategory {
    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Ring => "Ring",
            ItemCategory::Shoe => "Shoe",
        }
    }
}

impl core::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category-specific payload: the one attribute that differs per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ItemKind {
    Weapon { power: i64 },
    Armor { defence: i64 },
    Ring { magic: i64 },
    Shoe { speed: i64 },
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Weapon { .. } => ItemCategory::Weapon,
            ItemKind::Armor { .. } => ItemCategory::Armor,
            ItemKind::Ring { .. } => ItemCategory::Ring,
            ItemKind::Shoe { .. } => ItemCategory::Shoe,
        }
    }

    /// Label and value of the specialty attribute (e.g. `("Power", 10)`).
    pub fn specialty(&self) -> (&'static str, i64) {
        match *self {
            ItemKind::Weapon { power } => ("Power", power),
            ItemKind::Armor { defence } => ("Defence", defence),
            ItemKind::Ring { magic } => ("Magic", magic),
            ItemKind::Shoe { speed } => ("Speed", speed),
        }
    }
}

/// Entity: Item.
///
/// Common fields live here once; only `kind` varies between categories, and
/// it is only consulted when describing the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    id: ItemId,
    name: String,
    level: Level,
    rank: Rank,
    #[serde(flatten)]
    kind: ItemKind,
}

/// Wire shape of an [`Item`]; decoding goes through [`Item::new`].
#[derive(Deserialize)]
struct ItemRecord {
    id: i64,
    name: String,
    level: u8,
    rank: Rank,
    #[serde(flatten)]
    kind: ItemKind,
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Item::new(record.id, record.name, record.level, record.rank, record.kind)
    }
}

impl Item {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        level: u8,
        rank: Rank,
        kind: ItemKind,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id: ItemId::new(id),
            name,
            level: Level::new(level)?,
            rank,
            kind,
        })
    }

    pub fn weapon(
        id: i64,
        name: impl Into<String>,
        level: u8,
        rank: Rank,
        power: i64,
    ) -> DomainResult<Self> {
        Self::new(id, name, level, rank, ItemKind::Weapon { power })
    }

    pub fn armor(
        id: i64,
        name: impl Into<String>,
        level: u8,
        rank: Rank,
        defence: i64,
    ) -> DomainResult<Self> {
        Self::new(id, name, level, rank, ItemKind::Armor { defence })
    }

    pub fn ring(
        id: i64,
        name: impl Into<String>,
        level: u8,
        rank: Rank,
        magic: i64,
    ) -> DomainResult<Self> {
        Self::new(id, name, level, rank, ItemKind::Ring { magic })
    }

    pub fn shoe(
        id: i64,
        name: impl Into<String>,
        level: u8,
        rank: Rank,
        speed: i64,
    ) -> DomainResult<Self> {
        Self::new(id, name, level, rank, ItemKind::Shoe { speed })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    /// Renumber the item. No validation: uniqueness is the owner's concern.
    pub fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub(crate) fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub(crate) fn set_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }

    /// Move one rank up; a no-op at `S`.
    pub fn advance_rank(&mut self) {
        self.rank = self.rank.advanced();
    }

    /// Move one level up. Returns `false` (and changes nothing) at the cap.
    pub fn advance_level(&mut self) -> bool {
        if self.level.is_max() {
            return false;
        }
        self.level = self.level.advanced();
        true
    }

    /// One-line, human-readable summary of the item.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (label, value) = self.kind.specialty();
        write!(
            f,
            "{}, Name : {}, Level : {}, Rank : {}, {} : {}",
            self.id, self.name, self.level, self.rank, label, value
        )
    }
}
