//! Room definitions.
//!
//! Every location the player can stand in is a "Room". Rooms own the items lying in them and
//! the enemies lurking there, and carry exits keyed by direction that name neighboring rooms.

use std::collections::BTreeMap;

use crate::enemy::Enemy;
use crate::health::LivingEntity;
use crate::item::{Item, ItemHolder};
use crate::view::{EnemyLine, ExitLine, View, ViewItem};
use crate::world::EchoesWorld;
use crate::{Id, WorldObject};

/// Passive environmental effects that wear the player down each turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hazard {
    #[default]
    None,
    Poison,
    Cold,
    Hot,
    Cursed,
}
impl Hazard {
    /// Hit points lost for each turn spent in a room with this hazard.
    pub fn damage_per_turn(self) -> u32 {
        match self {
            Hazard::Poison | Hazard::Cursed => 2,
            Hazard::Cold | Hazard::Hot => 1,
            Hazard::None => 0,
        }
    }

    /// What the player is told hurt them.
    pub fn cause(self) -> &'static str {
        match self {
            Hazard::Poison => "poisonous air",
            Hazard::Cold => "the bitter cold",
            Hazard::Hot => "the searing heat",
            Hazard::Cursed => "a lingering curse",
            Hazard::None => "nothing",
        }
    }
}

/// Any visitable location in the game world.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub exits: BTreeMap<String, Id>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub visited: bool,
    pub hazard: Hazard,
    /// One-shot narrative text, shown the next time the room is described.
    pub special_event: Option<String>,
}
impl WorldObject for Room {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
impl ItemHolder for Room {
    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(idx))
    }

    fn contains_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}
impl Room {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            exits: BTreeMap::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            visited: false,
            hazard: Hazard::None,
            special_event: None,
        }
    }

    /// Add (or replace) the exit leading `direction`.
    pub fn add_exit(&mut self, direction: &str, to: &str) {
        self.exits.insert(direction.to_string(), to.to_string());
    }

    /// Id of the room reached by going `direction`, if there is one.
    pub fn exit_to(&self, direction: &str) -> Option<&Id> {
        self.exits.get(direction)
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn has_living_enemies(&self) -> bool {
        self.enemies.iter().any(LivingEntity::is_alive)
    }

    /// Index of the first enemy in the room that is still alive.
    pub fn living_enemy_index(&self) -> Option<usize> {
        self.enemies.iter().position(LivingEntity::is_alive)
    }

    /// Drop dead enemies from the room. Returns how many were removed.
    pub fn remove_dead_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(LivingEntity::is_alive);
        before - self.enemies.len()
    }

    /// Displays full description, exits, items and enemies for the `Room`.
    pub fn show(&self, world: &EchoesWorld, view: &mut View) {
        view.push(ViewItem::RoomDescription {
            name: self.name.clone(),
            description: self.description.clone(),
        });
        self.show_exits(world, view);
        if !self.items.is_empty() {
            view.push(ViewItem::RoomItems(self.items.iter().map(|i| i.name.clone()).collect()));
        }
        self.show_enemies(view);
    }

    /// Shows the list of exits, naming destinations the player has already seen.
    pub fn show_exits(&self, world: &EchoesWorld, view: &mut View) {
        let exit_lines = self
            .exits
            .iter()
            .map(|(direction, to)| {
                let dest = world.rooms.get(to);
                ExitLine {
                    direction: direction.clone(),
                    destination: dest.map_or_else(|| to.clone(), |room| room.name.clone()),
                    dest_visited: dest.is_some_and(|room| room.visited),
                }
            })
            .collect();
        view.push(ViewItem::RoomExits(exit_lines));
    }

    /// Shows living enemies, if any.
    pub fn show_enemies(&self, view: &mut View) {
        let enemy_lines: Vec<_> = self
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| EnemyLine {
                name: enemy.name.clone(),
                hp: enemy.current_hp(),
                max_hp: enemy.max_hp(),
                boss: enemy.is_boss(),
            })
            .collect();
        if !enemy_lines.is_empty() {
            view.push(ViewItem::RoomEnemies(enemy_lines));
        }
    }
}
