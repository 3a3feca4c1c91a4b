//! Item module
//!
//! Items are plain values. Whoever holds an `Item` (a `Room` or the `Player`) owns it,
//! and picking one up moves it from one holder to the other.
use std::fmt::Display;

use crate::Id;

/// The closed set of item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Weapon,
    Potion,
    Key,
    QuestItem,
}
impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Potion => "potion",
            ItemKind::Key => "key",
            ItemKind::QuestItem => "quest item",
        };
        write!(f, "{label}")
    }
}

/// Anything that can be picked up and carried.
///
/// `value` is the item's worth in gold. `effect` is kind-dependent: hit points restored
/// by a potion, or the attack bonus granted by a weapon. Keys and quest items ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub value: u32,
    pub effect: u32,
}
impl Item {
    pub fn new(id: &str, name: &str, description: &str, kind: ItemKind, value: u32, effect: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
            value,
            effect,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.kind == ItemKind::Weapon
    }

    /// Attack bonus conferred when this item is equipped (zero for non-weapons).
    pub fn attack_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon => self.effect,
            ItemKind::Potion | ItemKind::Key | ItemKind::QuestItem => 0,
        }
    }
}

/// Methods common to things that hold items (rooms and the player).
pub trait ItemHolder {
    fn add_item(&mut self, item: Item);
    /// Remove and return the first held item whose name matches exactly.
    fn remove_item(&mut self, name: &str) -> Option<Item>;
    fn contains_item(&self, name: &str) -> bool;
}
