//! Player -- module for the protagonist
use crate::health::{HealthState, LifeState, LivingEntity};
use crate::item::{Item, ItemHolder};
use crate::{Id, WorldObject};

use log::info;

pub const PLAYER_MAX_HP: u32 = 100;
pub const PLAYER_BASE_ATTACK: u32 = 10;
pub const PLAYER_DEFENSE: u32 = 5;

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub description: String,
    pub health: HealthState,
    pub base_attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub inventory: Vec<Item>,
    /// Id of the inventory item currently wielded, if any.
    pub equipped: Option<Id>,
    /// Recovered memories, distinct, in the order they were found.
    pub memories: Vec<String>,
}
impl Default for Player {
    fn default() -> Player {
        Self {
            name: "Unknown".into(),
            description: "a wanderer with no memory of who they once were".into(),
            health: HealthState::new_at_max(PLAYER_MAX_HP),
            base_attack: PLAYER_BASE_ATTACK,
            defense: PLAYER_DEFENSE,
            gold: 0,
            inventory: Vec::new(),
            equipped: None,
            memories: Vec::new(),
        }
    }
}
impl WorldObject for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
impl Player {
    pub fn new(name: &str) -> Player {
        Player {
            name: name.to_string(),
            ..Player::default()
        }
    }

    /// Base attack plus the equipped weapon's bonus.
    pub fn attack(&self) -> u32 {
        self.base_attack + self.equipped_weapon().map_or(0, Item::attack_bonus)
    }

    /// Reference to the wielded weapon, if any.
    pub fn equipped_weapon(&self) -> Option<&Item> {
        let equipped = self.equipped.as_ref()?;
        self.inventory.iter().find(|item| &item.id == equipped)
    }

    /// Wield an inventory item. Any previously equipped weapon stays in the inventory.
    pub fn equip(&mut self, item_id: &str) {
        if self.inventory.iter().any(|item| item.id == item_id) {
            info!("{} equipped '{item_id}'", self.name);
            self.equipped = Some(item_id.to_string());
        }
    }

    /// Find an inventory item by exact name.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.name == name)
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Record a memory. Returns false if it was already known.
    pub fn add_memory(&mut self, memory: &str) -> bool {
        if self.has_memory(memory) {
            return false;
        }
        info!("{} recovered a memory: \"{memory}\"", self.name);
        self.memories.push(memory.to_string());
        true
    }

    pub fn has_memory(&self, memory: &str) -> bool {
        self.memories.iter().any(|m| m == memory)
    }
}
impl ItemHolder for Player {
    fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.inventory.iter().position(|item| item.name == name)?;
        let item = self.inventory.remove(idx);
        if self.equipped.as_ref() == Some(&item.id) {
            self.equipped = None;
        }
        Some(item)
    }

    fn contains_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|item| item.name == name)
    }
}
impl LivingEntity for Player {
    fn max_hp(&self) -> u32 {
        self.health.max_hp()
    }

    fn current_hp(&self) -> u32 {
        self.health.current_hp()
    }

    fn damage(&mut self, amount: u32) {
        self.health.damage(amount);
    }

    fn heal(&mut self, amount: u32) {
        self.health.heal(amount);
    }

    fn life_state(&self) -> LifeState {
        self.health.life_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn sword(id: &str, bonus: u32) -> Item {
        Item::new(id, id, "a blade", ItemKind::Weapon, 10, bonus)
    }

    #[test]
    fn attack_includes_equipped_weapon_bonus() {
        let mut player = Player::new("Tess");
        assert_eq!(player.attack(), PLAYER_BASE_ATTACK);

        player.add_item(sword("rusty sword", 5));
        player.equip("rusty sword");
        assert_eq!(player.attack(), PLAYER_BASE_ATTACK + 5);
    }

    #[test]
    fn equipping_replaces_previous_weapon_without_dropping_it() {
        let mut player = Player::new("Tess");
        player.add_item(sword("rusty sword", 5));
        player.add_item(sword("steel sword", 8));
        player.equip("rusty sword");
        player.equip("steel sword");

        assert_eq!(player.equipped.as_deref(), Some("steel sword"));
        assert!(player.contains_item("rusty sword"));
        assert_eq!(player.attack(), PLAYER_BASE_ATTACK + 8);
    }

    #[test]
    fn cannot_equip_what_you_do_not_carry() {
        let mut player = Player::new("Tess");
        player.equip("legendary blade");
        assert!(player.equipped.is_none());
    }

    #[test]
    fn memories_are_distinct_and_ordered() {
        let mut player = Player::default();
        assert!(player.add_memory("first"));
        assert!(player.add_memory("second"));
        assert!(!player.add_memory("first"));
        assert_eq!(player.memories, ["first", "second"]);
    }

    #[test]
    fn heal_never_exceeds_max() {
        let mut player = Player::default();
        player.damage(10);
        player.heal(50);
        assert_eq!(player.current_hp(), PLAYER_MAX_HP);
    }

    #[test]
    fn removing_equipped_item_unequips_it() {
        let mut player = Player::default();
        player.add_item(sword("iron dagger", 3));
        player.equip("iron dagger");
        let removed = player.remove_item("iron dagger");
        assert!(removed.is_some());
        assert!(player.equipped.is_none());
        assert_eq!(player.attack(), PLAYER_BASE_ATTACK);
    }
}
