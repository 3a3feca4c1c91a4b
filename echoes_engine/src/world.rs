//! Data structures representing the game world.
//!
//! This module defines [`EchoesWorld`], which owns every room, the player and the
//! bookkeeping the turn loop needs (current location, turn count, boss flag).

use crate::{ECHOES_VERSION, Id, Player, Room};

use anyhow::{Result, anyhow};
use log::info;
use thiserror::Error;

use std::collections::HashMap;

/// Memory recorded when the Shadow Lord falls. Required for victory.
pub const BOSS_MEMORY: &str = "You have defeated the Shadow Lord and restored balance to the realm!";

/// Methods common to any named object in the world.
pub trait WorldObject {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Structural faults in the room graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("room id '{0}' is defined more than once")]
    DuplicateRoom(Id),
    #[error("exit '{direction}' from room '{from}' leads to unknown room '{to}'")]
    DanglingExit { from: Id, direction: String, to: Id },
    #[error("start room '{0}' does not exist")]
    MissingStartRoom(Id),
}

/// Complete state of the running game.
#[derive(Debug, Clone)]
pub struct EchoesWorld {
    pub rooms: HashMap<Id, Room>,
    pub player: Player,
    pub current_room: Id,
    pub turn_count: usize,
    pub boss_defeated: bool,
    pub version: String,
}
impl Default for EchoesWorld {
    fn default() -> Self {
        Self::new_empty()
    }
}
impl EchoesWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> EchoesWorld {
        let world = Self {
            rooms: HashMap::new(),
            player: Player::default(),
            current_room: Id::new(),
            turn_count: 0,
            boss_defeated: false,
            version: ECHOES_VERSION.to_string(),
        };
        info!("new, empty 'EchoesWorld' created");
        world
    }

    /// Add a room to the arena.
    /// # Errors
    /// - if a room with the same id is already present
    pub fn insert_room(&mut self, room: Room) -> Result<(), WorldError> {
        if self.rooms.contains_key(&room.id) {
            return Err(WorldError::DuplicateRoom(room.id));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    /// Obtain a reference to the room the player occupies.
    /// # Errors
    /// - if the current room id is not found
    pub fn player_room_ref(&self) -> Result<&Room> {
        self.rooms
            .get(&self.current_room)
            .ok_or_else(|| anyhow!("player's room id ({}) not found in world", self.current_room))
    }

    /// Obtain a mutable reference to the room the player occupies.
    /// # Errors
    /// - if the current room id is not found
    pub fn player_room_mut(&mut self) -> Result<&mut Room> {
        self.rooms
            .get_mut(&self.current_room)
            .ok_or_else(|| anyhow!("player's room id ({}) not found in world", self.current_room))
    }

    /// Check that the current room exists and that every exit resolves.
    /// # Errors
    /// - the first dangling exit or missing start room found
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&self.current_room) {
            return Err(WorldError::MissingStartRoom(self.current_room.clone()));
        }
        // sorted so the reported fault is stable between runs
        let mut room_ids: Vec<&Id> = self.rooms.keys().collect();
        room_ids.sort();
        for room_id in room_ids {
            let room = &self.rooms[room_id];
            for (direction, to) in &room.exits {
                if !self.rooms.contains_key(to) {
                    return Err(WorldError::DanglingExit {
                        from: room_id.clone(),
                        direction: direction.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Victory requires both the slain boss and the memory of slaying it.
    pub fn has_won(&self) -> bool {
        self.boss_defeated && self.player.has_memory(BOSS_MEMORY)
    }

    /// Display name of the player's current room, or its raw id if missing.
    pub fn current_room_name(&self) -> String {
        self.player_room_ref()
            .map_or_else(|_| self.current_room.clone(), |room| room.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_room_world() -> EchoesWorld {
        let mut world = EchoesWorld::new_empty();
        let mut hall = Room::new("hall", "Hall", "A long hall.");
        hall.add_exit("north", "attic");
        let mut attic = Room::new("attic", "Attic", "Dusty.");
        attic.add_exit("south", "hall");
        world.insert_room(hall).unwrap();
        world.insert_room(attic).unwrap();
        world.current_room = "hall".into();
        world
    }

    #[test]
    fn player_room_lookup() {
        let mut world = two_room_world();
        assert_eq!(world.player_room_ref().unwrap().name, "Hall");
        world.player_room_mut().unwrap().visited = true;
        assert!(world.rooms["hall"].visited);

        world.current_room = "void".into();
        assert!(world.player_room_ref().is_err());
        assert!(world.player_room_mut().is_err());
        assert_eq!(world.current_room_name(), "void");
    }

    #[test]
    fn duplicate_rooms_are_rejected() {
        let mut world = two_room_world();
        let err = world.insert_room(Room::new("hall", "Other Hall", "")).unwrap_err();
        assert_eq!(err, WorldError::DuplicateRoom("hall".into()));
        assert_eq!(world.rooms["hall"].name, "Hall");
    }

    #[test]
    fn validate_reports_dangling_exit() {
        let mut world = two_room_world();
        assert!(world.validate().is_ok());

        world.rooms.get_mut("attic").unwrap().add_exit("up", "roof");
        assert_eq!(
            world.validate(),
            Err(WorldError::DanglingExit {
                from: "attic".into(),
                direction: "up".into(),
                to: "roof".into(),
            })
        );
    }

    #[test]
    fn validate_requires_start_room() {
        let mut world = two_room_world();
        world.current_room = "cellar".into();
        assert_eq!(world.validate(), Err(WorldError::MissingStartRoom("cellar".into())));
    }

    #[test]
    fn winning_needs_flag_and_memory() {
        let mut world = two_room_world();
        world.boss_defeated = true;
        assert!(!world.has_won());
        world.player.add_memory(BOSS_MEMORY);
        assert!(world.has_won());

        world.boss_defeated = false;
        assert!(!world.has_won());
    }
}
